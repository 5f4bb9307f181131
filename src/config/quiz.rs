//! Adaptive quiz configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::questions::AdaptiveQuestionRanker;

/// Quiz configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// Bonus weight for frequently answered questions
    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f64,

    /// Weight of live power over the plans still in play
    #[serde(default = "default_info_gain_weight")]
    pub info_gain_weight: f64,

    /// Penalty weight for questions users abandon at
    #[serde(default = "default_friction_weight")]
    pub friction_weight: f64,

    /// Stop after this many answers
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// Stop once this few plans survive elimination
    #[serde(default = "default_min_plans_remaining")]
    pub min_plans_remaining: usize,

    /// YAML question bank replacing the built-in one
    pub question_bank_path: Option<String>,
}

impl QuizConfig {
    /// Ranker built from the configured weights
    pub fn ranker(&self) -> AdaptiveQuestionRanker {
        AdaptiveQuestionRanker::new(
            self.popularity_weight,
            self.info_gain_weight,
            self.friction_weight,
        )
    }

    /// Validate quiz configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let weights = [
            ("popularity_weight", self.popularity_weight),
            ("info_gain_weight", self.info_gain_weight),
            ("friction_weight", self.friction_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValidationError::InvalidQuizWeight(name));
            }
        }
        if self.max_questions == 0 {
            return Err(ValidationError::InvalidMaxQuestions);
        }
        Ok(())
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            popularity_weight: default_popularity_weight(),
            info_gain_weight: default_info_gain_weight(),
            friction_weight: default_friction_weight(),
            max_questions: default_max_questions(),
            min_plans_remaining: default_min_plans_remaining(),
            question_bank_path: None,
        }
    }
}

fn default_popularity_weight() -> f64 {
    AdaptiveQuestionRanker::default().popularity_weight
}

fn default_info_gain_weight() -> f64 {
    AdaptiveQuestionRanker::default().info_gain_weight
}

fn default_friction_weight() -> f64 {
    AdaptiveQuestionRanker::default().friction_weight
}

fn default_max_questions() -> usize {
    10
}

fn default_min_plans_remaining() -> usize {
    3
}
