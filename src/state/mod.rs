//! State management module
//!
//! This module contains the quiz session, its countdown and the shared
//! application state that ties them together.

pub mod app_state;
pub mod results;
pub mod session;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, QuizSnapshot, QuizState, TimerEvent};
pub use results::{ElapsedTime, Feedback};
pub use session::{Phase, QuestionStatus, Session};
pub use timer_state::{Countdown, Tick};
