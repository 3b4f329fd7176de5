//! Quiz session state machine

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::results::{self, ElapsedTime, Feedback};
use crate::catalog::{Difficulty, DifficultyConfig, Question};

/// Derived UI mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Entry,
    InProgress,
    Finished,
}

/// Per-question state shown in the navigator grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Current,
    Answered,
    Unanswered,
}

/// One quiz attempt, from name entry to finish or reset.
///
/// Out-of-range or out-of-phase requests are ignored rather than reported;
/// every operation leaves the session in a valid state.
#[derive(Debug, Clone)]
pub struct Session {
    question_count: usize,
    user_name: String,
    difficulty: Difficulty,
    /// `None` until the session starts
    current_question_index: Option<usize>,
    answers: BTreeMap<usize, usize>,
    time_remaining: u64,
    is_finished: bool,
    start_time: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a fresh session over a question set of `question_count` entries
    pub fn new(question_count: usize) -> Self {
        Self {
            question_count,
            user_name: String::new(),
            difficulty: Difficulty::default(),
            current_question_index: None,
            answers: BTreeMap::new(),
            time_remaining: 0,
            is_finished: false,
            start_time: None,
            finished_at: None,
        }
    }

    /// Start the attempt. Returns false and changes nothing when the name is blank.
    pub fn start(
        &mut self,
        name: &str,
        difficulty: Difficulty,
        config: &DifficultyConfig,
        now: DateTime<Utc>,
    ) -> bool {
        let name = name.trim();
        if name.is_empty() || self.question_count == 0 {
            return false;
        }

        *self = Self {
            question_count: self.question_count,
            user_name: name.to_string(),
            difficulty,
            current_question_index: Some(0),
            answers: BTreeMap::new(),
            time_remaining: config.time_seconds(),
            is_finished: false,
            start_time: Some(now),
            finished_at: None,
        };
        true
    }

    /// Move to the next question, or finish when already on the last one
    pub fn advance(&mut self, now: DateTime<Utc>) {
        let Some(index) = self.active_index() else {
            return;
        };

        if index + 1 < self.question_count {
            self.current_question_index = Some(index + 1);
        } else {
            self.finish(now);
        }
    }

    /// Move to the previous question, stopping at the first
    pub fn retreat(&mut self) {
        if let Some(index) = self.active_index() {
            self.current_question_index = Some(index.saturating_sub(1));
        }
    }

    /// Go directly to any question
    pub fn jump_to(&mut self, index: usize) {
        if self.active_index().is_some() && index < self.question_count {
            self.current_question_index = Some(index);
        }
    }

    /// Record (or replace) the answer for the current question
    pub fn record_answer(&mut self, option: usize) {
        if let Some(index) = self.active_index() {
            self.answers.insert(index, option);
        }
    }

    /// Mark the session finished. Returns true only on the first call.
    pub fn finish(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_finished || self.current_question_index.is_none() {
            return false;
        }
        self.is_finished = true;
        self.finished_at = Some(now);
        true
    }

    /// Return to the created state
    pub fn reset(&mut self) {
        *self = Self::new(self.question_count);
    }

    /// Store the countdown value reported by the timer
    pub fn set_time_remaining(&mut self, seconds: u64) {
        if self.phase() == Phase::InProgress {
            self.time_remaining = seconds;
        }
    }

    fn active_index(&self) -> Option<usize> {
        if self.is_finished {
            None
        } else {
            self.current_question_index
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.current_question_index, self.is_finished) {
            (None, _) => Phase::Entry,
            (Some(_), false) => Phase::InProgress,
            (Some(_), true) => Phase::Finished,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current_question_index(&self) -> Option<usize> {
        self.current_question_index
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn answer_for(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index
            .is_some_and(|index| index + 1 == self.question_count)
    }

    /// Width of the progress bar, `(index + 1) / N * 100`
    pub fn progress_percent(&self) -> f64 {
        match self.current_question_index {
            Some(index) if self.question_count > 0 => {
                (index + 1) as f64 / self.question_count as f64 * 100.0
            }
            _ => 0.0,
        }
    }

    pub fn question_status(&self, index: usize) -> QuestionStatus {
        if self.current_question_index == Some(index) {
            QuestionStatus::Current
        } else if self.answers.contains_key(&index) {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        }
    }

    /// Number of questions answered correctly
    pub fn score(&self, questions: &[Question]) -> usize {
        questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                self.answer_for(*index)
                    .is_some_and(|option| question.is_correct(option))
            })
            .count()
    }

    pub fn percent(&self, score: usize) -> u8 {
        results::percent(score, self.question_count)
    }

    /// Time from start to finish, or to `now` while still running
    pub fn elapsed(&self, now: DateTime<Utc>) -> ElapsedTime {
        let Some(start) = self.start_time else {
            return ElapsedTime::from_seconds(0);
        };
        let end = self.finished_at.unwrap_or(now);
        ElapsedTime::from_millis((end - start).num_milliseconds())
    }

    pub fn feedback(&self, percent: u8) -> Feedback {
        Feedback::from_percent(percent)
    }
}
