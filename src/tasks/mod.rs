//! Background tasks module
//!
//! This module contains the countdown timer that runs alongside a quiz session.

pub mod countdown_timer;

// Re-export main items
pub use countdown_timer::{spawn_countdown_timer, TimerHandle};
