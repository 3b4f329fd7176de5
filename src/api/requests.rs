//! API request bodies

use serde::Deserialize;

use crate::catalog::Difficulty;

/// Body of PUT /quiz/name
#[derive(Debug, Clone, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// Body of POST /quiz/start
#[derive(Debug, Clone, Deserialize)]
pub struct StartRequest {
    pub difficulty: Difficulty,
    /// Overrides the name typed on the entry view
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of POST /quiz/answer
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub option: usize,
}
