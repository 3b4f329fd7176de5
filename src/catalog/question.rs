//! Question structure

use serde::{Deserialize, Serialize};

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    pub category: String,
}

impl Question {
    pub fn new(id: u32, text: &str, options: &[&str], correct_answer: usize, category: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
            category: category.to_string(),
        }
    }

    pub fn is_correct(&self, option: usize) -> bool {
        self.correct_answer == option
    }

    pub fn has_option(&self, option: usize) -> bool {
        option < self.options.len()
    }
}
