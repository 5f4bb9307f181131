//! Result types produced by the recommendation pipeline.

use serde::{Deserialize, Serialize};

use super::{Elimination, ScoreBreakdownEntry};
use crate::domain::catalog::Plan;
use crate::domain::foundation::Percentage;

/// A plan with its score for one recommendation call.
///
/// Built fresh per call and never persisted by the domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlan<'a> {
    pub plan: &'a Plan,
    pub total_score: f64,
    pub score_breakdown: Vec<ScoreBreakdownEntry>,
    pub verification_flags: Vec<String>,
}

impl ScoredPlan<'_> {
    pub fn completeness_score(&self) -> f64 {
        self.plan.completeness_score()
    }

    /// Points earned in a category, by category label.
    pub fn points_in(&self, category: &str) -> f64 {
        self.score_breakdown
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.points)
            .unwrap_or(0.0)
    }
}

/// One recommended plan, with everything needed to explain its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// 1-based position in the recommendation list.
    pub rank: usize,
    pub plan: Plan,
    pub raw_score: f64,
    /// Raw score relative to the top result, 0-100.
    pub relative_score: Percentage,
    /// Up to three highest-scoring categories.
    pub top_drivers: Vec<ScoreBreakdownEntry>,
    /// Only set on rank 1 when a runner-up exists.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trade_off_vs_runner_up: Option<String>,
    pub verification_needed: bool,
    pub verification_flags: Vec<String>,
    pub completeness_score: f64,
}

/// Ranked results plus the plans that never reached scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub results: Vec<ComparisonResult>,
    /// Hard-requirement failures, in catalog order.
    pub eliminated: Vec<Elimination>,
}
