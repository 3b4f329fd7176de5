//! Timed Quiz - A state-managed HTTP server for timed multiple-choice quizzes
//!
//! This library provides the quiz session state machine, its countdown timer
//! and a JSON API that renders the entry, in-progress and results views.

pub mod catalog;
pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use catalog::{Catalog, Difficulty};
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
