//! Difficulty tiers and their time allotments

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed difficulty tiers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers in display order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tier display label, allotted time and accent token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    pub label: String,
    pub time_minutes: u64,
    /// Opaque display token, passed through to clients untouched
    pub accent: String,
}

impl DifficultyConfig {
    pub fn new(label: &str, time_minutes: u64, accent: &str) -> Self {
        Self {
            label: label.to_string(),
            time_minutes,
            accent: accent.to_string(),
        }
    }

    /// Allotted time in seconds
    pub fn time_seconds(&self) -> u64 {
        self.time_minutes * 60
    }
}
