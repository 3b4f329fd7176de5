//! API response structures
//!
//! Every quiz action answers with the view the client should render next.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    catalog::{Catalog, Difficulty, Question},
    state::{ElapsedTime, Feedback, Phase, QuestionStatus, QuizSnapshot},
};

/// API response structure for quiz action endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub view: QuizView,
}

impl ApiResponse {
    pub fn new(action: &str, view: QuizView) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            view,
        }
    }
}

/// One of the three views, tagged by phase
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizView {
    Entry(EntryView),
    InProgress(InProgressView),
    Results(ResultsView),
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub name: String,
    /// Start buttons stay disabled until a name is typed
    pub can_start: bool,
    pub difficulties: Vec<DifficultyOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyOption {
    pub difficulty: Difficulty,
    pub label: String,
    pub time_minutes: u64,
    pub accent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InProgressView {
    pub user_name: String,
    pub difficulty: Difficulty,
    pub difficulty_label: String,
    pub current_question_index: usize,
    pub question_number: usize,
    pub total_questions: usize,
    pub progress_percent: f64,
    pub time_remaining_seconds: u64,
    pub time_remaining_display: String,
    pub question: QuestionView,
    pub selected_option: Option<usize>,
    pub navigator: Vec<QuestionStatus>,
    pub can_go_back: bool,
    pub next_finishes: bool,
}

/// A question as shown to the user, without its answer
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub text: String,
    pub category: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub letter: char,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub user_name: String,
    pub difficulty_label: String,
    pub score: usize,
    pub total_questions: usize,
    pub percent: u8,
    pub elapsed: ElapsedTime,
    pub feedback: Feedback,
    pub feedback_message: String,
}

impl QuizView {
    /// Render the view for a snapshot
    pub fn render(snapshot: &QuizSnapshot, catalog: &Catalog, now: DateTime<Utc>) -> Self {
        let session = &snapshot.session;
        let difficulty_label = catalog
            .difficulty(session.difficulty())
            .map(|config| config.label.clone())
            .unwrap_or_else(|| session.difficulty().to_string());

        match session.phase() {
            Phase::Finished => {
                let score = session.score(&catalog.questions);
                let percent = session.percent(score);
                let feedback = session.feedback(percent);

                QuizView::Results(ResultsView {
                    user_name: session.user_name().to_string(),
                    difficulty_label,
                    score,
                    total_questions: session.question_count(),
                    percent,
                    elapsed: session.elapsed(now),
                    feedback,
                    feedback_message: feedback.message().to_string(),
                })
            }
            Phase::InProgress => {
                let current = session.current_question_index().and_then(|index| {
                    catalog.question(index).map(|question| (index, question))
                });
                match current {
                    Some((index, question)) => QuizView::InProgress(InProgressView {
                        user_name: session.user_name().to_string(),
                        difficulty: session.difficulty(),
                        difficulty_label,
                        current_question_index: index,
                        question_number: index + 1,
                        total_questions: session.question_count(),
                        progress_percent: session.progress_percent(),
                        time_remaining_seconds: snapshot.countdown.remaining_seconds(),
                        time_remaining_display: format_clock(snapshot.countdown.remaining_seconds()),
                        question: QuestionView::from_question(question),
                        selected_option: session.answer_for(index),
                        navigator: (0..session.question_count())
                            .map(|i| session.question_status(i))
                            .collect(),
                        can_go_back: index > 0,
                        next_finishes: session.is_last_question(),
                    }),
                    None => Self::entry(snapshot, catalog),
                }
            }
            Phase::Entry => Self::entry(snapshot, catalog),
        }
    }

    fn entry(snapshot: &QuizSnapshot, catalog: &Catalog) -> Self {
        QuizView::Entry(EntryView {
            name: snapshot.name_draft.clone(),
            can_start: !snapshot.name_draft.trim().is_empty(),
            difficulties: difficulty_options(catalog),
        })
    }
}

impl QuestionView {
    fn from_question(question: &Question) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            category: question.category.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| OptionView {
                    index,
                    letter: option_letter(index),
                    text: text.clone(),
                })
                .collect(),
        }
    }
}

/// Difficulty table in display order
pub fn difficulty_options(catalog: &Catalog) -> Vec<DifficultyOption> {
    catalog
        .difficulties
        .iter()
        .map(|(difficulty, config)| DifficultyOption {
            difficulty: *difficulty,
            label: config.label.clone(),
            time_minutes: config.time_minutes,
            accent: config.accent.clone(),
        })
        .collect()
}

/// `mm:ss` rendering of a second count
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map(char::from)
        .unwrap_or('?')
}

/// Status response with session and timer information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub phase: Phase,
    /// `-1` before the quiz starts
    pub current_question_index: i64,
    pub timer_active: bool,
    pub timer_remaining_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
