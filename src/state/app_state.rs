//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{Countdown, Phase, Session, Tick};
use crate::{
    catalog::{Catalog, Difficulty},
    tasks::{spawn_countdown_timer, TimerHandle},
};

/// Everything that changes during a quiz, guarded by one lock so readers
/// never see a half-applied transition
#[derive(Debug)]
pub struct QuizState {
    pub session: Session,
    pub countdown: Countdown,
    /// Name typed on the entry view before the quiz starts
    pub name_draft: String,
    /// Bumped on every start and reset; ticks from older timers are dropped
    pub generation: u64,
    pub timer: Option<TimerHandle>,
}

impl QuizState {
    fn new(question_count: usize) -> Self {
        Self {
            session: Session::new(question_count),
            countdown: Countdown::inactive(),
            name_draft: String::new(),
            generation: 0,
            timer: None,
        }
    }

    /// Stop the running timer, if any
    fn stop_timer(&mut self) {
        self.countdown.deactivate();
        if let Some(timer) = self.timer.take() {
            debug!("Stopping countdown timer for generation {}", timer.generation());
        }
    }

    fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            session: self.session.clone(),
            countdown: self.countdown.clone(),
            name_draft: self.name_draft.clone(),
        }
    }
}

/// Consistent copy of the quiz taken under the lock
#[derive(Debug, Clone)]
pub struct QuizSnapshot {
    pub session: Session,
    pub countdown: Countdown,
    pub name_draft: String,
}

/// Timer notification pushed to live subscribers
#[derive(Debug, Clone, Serialize)]
pub struct TimerEvent {
    pub generation: u64,
    pub active: bool,
    pub remaining_seconds: u64,
}

/// Main application state that owns the quiz session and its timer
#[derive(Debug)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub quiz: Mutex<QuizState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer tick notifications
    pub timer_tx: broadcast::Sender<TimerEvent>,
}

impl AppState {
    /// Create a new AppState with a fresh session over the catalog
    pub fn new(port: u16, host: String, catalog: Catalog) -> Self {
        let (timer_tx, _) = broadcast::channel(64);
        let question_count = catalog.question_count();

        Self {
            catalog: Arc::new(catalog),
            quiz: Mutex::new(QuizState::new(question_count)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_tx,
        }
    }

    /// Apply an update to the quiz and return the resulting snapshot
    pub fn update_quiz<F>(&self, action: &str, updater: F) -> Result<QuizSnapshot, String>
    where
        F: FnOnce(&mut QuizState),
    {
        let mut quiz = self.quiz.lock()
            .map_err(|e| format!("Failed to lock quiz state: {}", e))?;

        let before = quiz.session.phase();
        updater(&mut *quiz);
        let after = quiz.session.phase();

        // A session that left the in-progress phase must not keep ticking
        if after != Phase::InProgress && quiz.timer.is_some() {
            quiz.stop_timer();
            self.notify_timer(quiz.generation, &quiz.countdown);
        }

        let snapshot = quiz.snapshot();
        drop(quiz); // Release the lock early

        if before != after {
            info!("Quiz phase changed: {:?} -> {:?} ({})", before, after, action);
        }

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Store the name typed on the entry view
    pub fn set_name_draft(&self, name: &str) -> Result<QuizSnapshot, String> {
        self.update_quiz("name", |quiz| {
            if quiz.session.phase() == Phase::Entry {
                quiz.name_draft = name.to_string();
            }
        })
    }

    /// Start a new attempt and its countdown. A blank name leaves the
    /// session on the entry view.
    pub fn start_quiz(
        self: &Arc<Self>,
        difficulty: Difficulty,
        name: Option<&str>,
    ) -> Result<QuizSnapshot, String> {
        let Some(config) = self.catalog.difficulty(difficulty).cloned() else {
            warn!("Difficulty '{}' missing from catalog, ignoring start", difficulty);
            return self.snapshot();
        };

        self.update_quiz("start", |quiz| {
            let name = name.map(str::to_string).unwrap_or_else(|| quiz.name_draft.clone());
            if !quiz.session.start(&name, difficulty, &config, Utc::now()) {
                debug!("Ignoring start with a blank name");
                return;
            }

            quiz.stop_timer();
            quiz.generation += 1;
            quiz.countdown = Countdown::new(config.time_seconds(), true);
            let generation = quiz.generation;
            quiz.timer = Some(spawn_countdown_timer(
                Arc::clone(self),
                generation,
                move |state| {
                    if let Err(e) = state.expire_quiz(generation) {
                        warn!("Failed to finish quiz on timer expiry: {}", e);
                    }
                },
            ));

            info!(
                "Quiz started for '{}' on {} ({} seconds)",
                quiz.session.user_name(),
                difficulty,
                config.time_seconds()
            );
            self.notify_timer(quiz.generation, &quiz.countdown);
        })
    }

    /// Go to the next question, finishing on the last one
    pub fn next_question(&self) -> Result<QuizSnapshot, String> {
        self.update_quiz("next", |quiz| quiz.session.advance(Utc::now()))
    }

    /// Go to the previous question
    pub fn previous_question(&self) -> Result<QuizSnapshot, String> {
        self.update_quiz("previous", |quiz| quiz.session.retreat())
    }

    /// Go directly to a question
    pub fn jump_to_question(&self, index: usize) -> Result<QuizSnapshot, String> {
        self.update_quiz("jump", |quiz| quiz.session.jump_to(index))
    }

    /// Record an answer for the current question. Options the current
    /// question does not offer are ignored.
    pub fn answer_question(&self, option: usize) -> Result<QuizSnapshot, String> {
        let catalog = Arc::clone(&self.catalog);
        self.update_quiz("answer", |quiz| {
            let offered = quiz
                .session
                .current_question_index()
                .and_then(|index| catalog.question(index))
                .is_some_and(|question| question.has_option(option));

            if offered {
                quiz.session.record_answer(option);
            } else {
                debug!("Ignoring answer {} not offered by the current question", option);
            }
        })
    }

    /// Finish the quiz; repeated calls have no further effect
    pub fn finish_quiz(&self, action: &str) -> Result<QuizSnapshot, String> {
        self.update_quiz(action, |quiz| {
            if quiz.session.finish(Utc::now()) {
                info!("Quiz finished for '{}'", quiz.session.user_name());
            }
        })
    }

    /// Finish the session of `generation` when its countdown runs out.
    ///
    /// The generation is checked under the lock, so an expiry that races a
    /// restart or reset leaves the newer session alone.
    pub fn expire_quiz(&self, generation: u64) -> Result<QuizSnapshot, String> {
        self.update_quiz("timer-expired", |quiz| {
            if quiz.generation != generation {
                debug!("Ignoring expiry of replaced countdown {}", generation);
                return;
            }
            if quiz.session.finish(Utc::now()) {
                info!("Quiz finished for '{}' on timer expiry", quiz.session.user_name());
            }
        })
    }

    /// Drop the session and return to the entry view
    pub fn reset_quiz(&self) -> Result<QuizSnapshot, String> {
        self.update_quiz("reset", |quiz| {
            quiz.stop_timer();
            quiz.generation += 1;
            quiz.countdown = Countdown::inactive();
            quiz.session.reset();
            quiz.name_draft.clear();
        })
    }

    /// Advance the countdown of `generation` by one second.
    ///
    /// Called by the timer task; a tick from a replaced session is `Idle`.
    pub fn tick_countdown(&self, generation: u64) -> Result<Tick, String> {
        let mut quiz = self.quiz.lock()
            .map_err(|e| format!("Failed to lock quiz state: {}", e))?;

        if quiz.generation != generation || quiz.session.phase() != Phase::InProgress {
            return Ok(Tick::Idle);
        }

        let tick = quiz.countdown.tick();
        let remaining = quiz.countdown.remaining_seconds();
        quiz.session.set_time_remaining(remaining);
        if tick != Tick::Idle {
            self.notify_timer(generation, &quiz.countdown);
        }

        Ok(tick)
    }

    /// Current quiz snapshot
    pub fn snapshot(&self) -> Result<QuizSnapshot, String> {
        self.quiz.lock()
            .map(|quiz| quiz.snapshot())
            .map_err(|e| format!("Failed to lock quiz state: {}", e))
    }

    /// Subscribe to timer notifications
    pub fn subscribe_timer(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer_tx.subscribe()
    }

    fn notify_timer(&self, generation: u64, countdown: &Countdown) {
        let event = TimerEvent {
            generation,
            active: countdown.is_active(),
            remaining_seconds: countdown.remaining_seconds(),
        };
        // Sending fails when nobody is listening, which is the normal case
        if self.timer_tx.send(event).is_err() {
            debug!("No timer subscribers");
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
