//! Quiz catalog module
//!
//! This module contains the static question set and difficulty table. Both are
//! read-only for the lifetime of the process, either built in or loaded from a
//! JSON file at startup.

pub mod builtin;
pub mod difficulty;
pub mod question;

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use difficulty::{Difficulty, DifficultyConfig};
pub use question::Question;

/// Question set plus difficulty table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub questions: Vec<Question>,
    pub difficulties: BTreeMap<Difficulty, DifficultyConfig>,
}

impl Catalog {
    /// Build a catalog and validate it
    pub fn new(
        questions: Vec<Question>,
        difficulties: BTreeMap<Difficulty, DifficultyConfig>,
    ) -> anyhow::Result<Self> {
        let catalog = Self { questions, difficulties };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Self {
        Self {
            questions: builtin::questions(),
            difficulties: builtin::difficulties(),
        }
    }

    /// Parse and validate a catalog from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let catalog: Catalog = serde_json::from_str(json).context("Invalid catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, or fall back to the built-in one
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            info!("Using built-in catalog");
            return Ok(Self::builtin());
        };

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_json(&json)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

        info!(
            "Loaded catalog from {}: {} questions",
            path.display(),
            catalog.questions.len()
        );
        Ok(catalog)
    }

    /// Check the catalog invariants
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.questions.is_empty() {
            bail!("Catalog has no questions");
        }

        for question in &self.questions {
            if question.options.len() < 2 {
                bail!("Question {} needs at least two options", question.id);
            }
            if !question.has_option(question.correct_answer) {
                bail!(
                    "Question {} has correct answer {} but only {} options",
                    question.id,
                    question.correct_answer,
                    question.options.len()
                );
            }
        }

        for tier in Difficulty::ALL {
            match self.difficulties.get(&tier) {
                None => bail!("Difficulty table is missing tier '{}'", tier),
                Some(config) if config.time_minutes == 0 => {
                    bail!("Difficulty '{}' must allot at least one minute", tier)
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Config for a tier; every tier is present once validated
    pub fn difficulty(&self, tier: Difficulty) -> Option<&DifficultyConfig> {
        self.difficulties.get(&tier)
    }
}
