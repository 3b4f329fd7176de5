use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use timed_quiz::{
    catalog::{Catalog, Difficulty, DifficultyConfig, Question},
    state::{AppState, Feedback, Phase, Tick},
    tasks::spawn_countdown_timer,
};

fn small_catalog() -> Catalog {
    let questions = vec![
        Question::new(1, "2 + 2?", &["3", "4", "5"], 1, "Math"),
        Question::new(2, "Capital of France?", &["Paris", "Rome"], 0, "Geography"),
        Question::new(3, "H2O is?", &["Salt", "Water", "Air"], 1, "Science"),
        Question::new(4, "Largest planet?", &["Mars", "Jupiter"], 1, "Astronomy"),
        Question::new(5, "3 * 3?", &["6", "9", "12"], 1, "Math"),
    ];
    let difficulties = BTreeMap::from([
        (Difficulty::Easy, DifficultyConfig::new("Easy", 1, "green")),
        (Difficulty::Medium, DifficultyConfig::new("Medium", 2, "blue")),
        (Difficulty::Hard, DifficultyConfig::new("Hard", 3, "orange")),
        (Difficulty::Expert, DifficultyConfig::new("Expert", 4, "red")),
    ]);
    Catalog::new(questions, difficulties).expect("valid catalog")
}

fn new_state() -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), small_catalog()))
}

#[tokio::test(start_paused = true)]
async fn timer_expiry_finishes_the_quiz() {
    let state = new_state();
    state.start_quiz(Difficulty::Easy, Some("Huda")).unwrap();
    state.answer_question(1).unwrap();

    tokio::time::sleep(Duration::from_millis(30_500)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.session.phase(), Phase::InProgress);
    assert_eq!(snapshot.countdown.remaining_seconds(), 30);
    assert_eq!(snapshot.session.time_remaining(), 30);

    tokio::time::sleep(Duration::from_secs(31)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.session.phase(), Phase::Finished);
    assert_eq!(snapshot.countdown.remaining_seconds(), 0);
    assert!(!snapshot.countdown.is_active());
    assert_eq!(snapshot.session.score(&state.catalog.questions), 1);
    assert!(state.quiz.lock().unwrap().timer.is_none());

    let (last_action, _) = state.get_last_action();
    assert_eq!(last_action.as_deref(), Some("timer-expired"));
}

#[tokio::test(start_paused = true)]
async fn reset_stops_the_timer() {
    let state = new_state();
    state.start_quiz(Difficulty::Easy, Some("Omar")).unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;

    let snapshot = state.reset_quiz().unwrap();
    assert_eq!(snapshot.session.phase(), Phase::Entry);
    assert_eq!(snapshot.session.current_question_index(), None);
    assert!(snapshot.session.answers().is_empty());
    assert!(snapshot.name_draft.is_empty());

    tokio::time::sleep(Duration::from_secs(120)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.session.phase(), Phase::Entry);
    assert!(!snapshot.countdown.is_active());
}

#[tokio::test(start_paused = true)]
async fn restart_uses_the_new_tier_duration() {
    let state = new_state();
    state.start_quiz(Difficulty::Easy, Some("Mina")).unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let snapshot = state.start_quiz(Difficulty::Medium, Some("Mina")).unwrap();
    assert_eq!(snapshot.countdown.remaining_seconds(), 120);

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.countdown.remaining_seconds(), 118);
    assert_eq!(snapshot.session.difficulty(), Difficulty::Medium);
}

#[tokio::test(start_paused = true)]
async fn finishing_by_navigation_stops_the_timer() {
    let state = new_state();
    state.start_quiz(Difficulty::Hard, Some("Rana")).unwrap();
    for _ in 0..5 {
        state.next_question().unwrap();
    }

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.session.phase(), Phase::Finished);
    assert_eq!(snapshot.session.current_question_index(), Some(4));
    assert!(state.quiz.lock().unwrap().timer.is_none());

    let remaining = snapshot.countdown.remaining_seconds();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(state.snapshot().unwrap().countdown.remaining_seconds(), remaining);
}

#[tokio::test]
async fn blank_name_keeps_the_entry_view() {
    let state = new_state();
    state.set_name_draft("   ").unwrap();

    let snapshot = state.start_quiz(Difficulty::Easy, None).unwrap();
    assert_eq!(snapshot.session.phase(), Phase::Entry);
    assert!(state.quiz.lock().unwrap().timer.is_none());

    state.set_name_draft("Yusuf").unwrap();
    let snapshot = state.start_quiz(Difficulty::Expert, None).unwrap();
    assert_eq!(snapshot.session.phase(), Phase::InProgress);
    assert_eq!(snapshot.session.user_name(), "Yusuf");
    assert_eq!(snapshot.session.time_remaining(), 240);
}

#[tokio::test]
async fn answers_outside_the_question_are_ignored() {
    let state = new_state();
    state.start_quiz(Difficulty::Easy, Some("Sara")).unwrap();

    state.answer_question(2).unwrap();
    let snapshot = state.answer_question(7).unwrap();
    assert_eq!(snapshot.session.answer_for(0), Some(2));

    state.jump_to_question(1).unwrap();
    let snapshot = state.answer_question(2).unwrap();
    assert_eq!(snapshot.session.answer_for(1), None);
}

#[tokio::test]
async fn perfect_run_scores_full_marks() {
    let state = new_state();
    state.start_quiz(Difficulty::Medium, Some("Adam")).unwrap();

    for (index, correct) in [1, 0, 1, 1, 1].into_iter().enumerate() {
        state.jump_to_question(index).unwrap();
        state.answer_question(correct).unwrap();
    }
    state.jump_to_question(2).unwrap();
    let snapshot = state.finish_quiz("finish").unwrap();

    let score = snapshot.session.score(&state.catalog.questions);
    let percent = snapshot.session.percent(score);
    assert_eq!(score, 5);
    assert_eq!(percent, 100);
    assert_eq!(snapshot.session.feedback(percent), Feedback::Perfect);
}

#[tokio::test(start_paused = true)]
async fn timer_events_are_broadcast() {
    let state = new_state();
    let mut rx = state.subscribe_timer();

    state.start_quiz(Difficulty::Easy, Some("Lea")).unwrap();
    let first = rx.recv().await.unwrap();
    assert!(first.active);
    assert_eq!(first.remaining_seconds, 60);

    let next = rx.recv().await.unwrap();
    assert_eq!(next.remaining_seconds, 59);
    assert_eq!(next.generation, first.generation);

    state.finish_quiz("finish").unwrap();
    let stopped = rx.recv().await.unwrap();
    assert!(!stopped.active);
}

#[tokio::test(start_paused = true)]
async fn expiry_of_a_replaced_session_leaves_the_new_one_running() {
    let state = new_state();
    state.start_quiz(Difficulty::Easy, Some("Old")).unwrap();

    let old_generation = {
        let mut quiz = state.quiz.lock().unwrap();
        quiz.countdown.remaining_seconds = 1;
        quiz.generation
    };
    assert_eq!(state.tick_countdown(old_generation).unwrap(), Tick::Expired);

    // A new session starts before the old timer gets to finish its own
    state.start_quiz(Difficulty::Expert, Some("New")).unwrap();
    let snapshot = state.expire_quiz(old_generation).unwrap();

    assert_eq!(snapshot.session.phase(), Phase::InProgress);
    assert_eq!(snapshot.session.user_name(), "New");
    assert!(snapshot.countdown.is_active());
    assert!(state.quiz.lock().unwrap().timer.is_some());

    let current = state.quiz.lock().unwrap().generation;
    let snapshot = state.expire_quiz(current).unwrap();
    assert_eq!(snapshot.session.phase(), Phase::Finished);
}

#[tokio::test(start_paused = true)]
async fn expiry_callback_runs_exactly_once() {
    let state = new_state();
    state.start_quiz(Difficulty::Easy, Some("Zaid")).unwrap();

    // Swap the session's own timer for one with a counting callback
    let generation = {
        let mut quiz = state.quiz.lock().unwrap();
        quiz.timer.take();
        quiz.generation
    };
    let expirations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&expirations);
    let _timer = spawn_countdown_timer(Arc::clone(&state), generation, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let stale = Arc::new(AtomicUsize::new(0));
    let stale_counter = Arc::clone(&stale);
    let _stale_timer = spawn_countdown_timer(Arc::clone(&state), generation - 1, move |_| {
        stale_counter.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(70_500)).await;
    assert_eq!(expirations.load(Ordering::SeqCst), 1);
    assert_eq!(state.snapshot().unwrap().countdown.remaining_seconds(), 0);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(expirations.load(Ordering::SeqCst), 1);
    assert_eq!(stale.load(Ordering::SeqCst), 0);
}
