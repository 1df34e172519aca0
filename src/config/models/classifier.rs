//! Classifier thresholds

use super::*;
use serde::{Deserialize, Serialize};

/// Thresholds for the error-text classifier and the request validator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum trimmed length, in characters
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Minimum weighted score for a valid error message
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    /// Halve the score of long texts with few error words
    #[serde(default = "default_dilution_penalty")]
    pub dilution_penalty: bool,
    /// Maximum accepted length, in characters (request validation)
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            min_score: default_min_score(),
            dilution_penalty: default_dilution_penalty(),
            max_length: default_max_length(),
        }
    }
}

impl ClassifierConfig {
    /// Merge classifier configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.min_length != default_min_length() {
            self.min_length = other.min_length;
        }
        if other.min_score != default_min_score() {
            self.min_score = other.min_score;
        }
        if !other.dilution_penalty {
            self.dilution_penalty = false;
        }
        if other.max_length != default_max_length() {
            self.max_length = other.max_length;
        }
        self
    }

    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_score == 0 {
            return Err("Classifier min_score cannot be 0".to_string());
        }
        if self.max_length < self.min_length {
            return Err(format!(
                "Classifier max_length ({}) is below min_length ({})",
                self.max_length, self.min_length
            ));
        }
        Ok(())
    }
}

fn default_dilution_penalty() -> bool {
    true
}
