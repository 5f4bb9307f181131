//! Settings shared by the quiz handlers.

use std::collections::HashMap;

use crate::config::{FeatureFlags, QuizConfig};
use crate::domain::catalog::Plan;
use crate::domain::preferences::PreferenceKey;
use crate::domain::questions::{AdaptiveQuestionRanker, QuestionTelemetry, RankingContext};
use crate::domain::recommendation::WeightTable;

/// Ranker weights and stopping rule for a quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizHandlerConfig {
    pub ranker: AdaptiveQuestionRanker,
    /// Complete once this many questions have been answered or skipped.
    pub max_questions: usize,
    /// Complete once this few plans survive elimination.
    pub min_plans_remaining: usize,
    /// Add live power over the surviving plans to question priority.
    pub enable_info_gain: bool,
}

impl QuizHandlerConfig {
    pub fn from_config(quiz: &QuizConfig, features: &FeatureFlags) -> Self {
        Self {
            ranker: quiz.ranker(),
            max_questions: quiz.max_questions,
            min_plans_remaining: quiz.min_plans_remaining,
            enable_info_gain: features.enable_info_gain,
        }
    }

    /// True when the quiz has gathered enough to stop.
    pub fn should_stop(&self, answered: usize, plans_remaining: usize) -> bool {
        answered >= self.max_questions || plans_remaining <= self.min_plans_remaining
    }

    pub(crate) fn ranking_context<'a>(
        &self,
        survivors: &'a [&'a Plan],
        table: &'a WeightTable,
        telemetry: &'a HashMap<PreferenceKey, QuestionTelemetry>,
    ) -> RankingContext<'a> {
        RankingContext {
            remaining_plans: self.enable_info_gain.then_some(survivors),
            table: Some(table),
            telemetry: Some(telemetry),
        }
    }
}

impl Default for QuizHandlerConfig {
    fn default() -> Self {
        Self::from_config(&QuizConfig::default(), &FeatureFlags::default())
    }
}
