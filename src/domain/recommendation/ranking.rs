//! Tie-Break Resolver - Three-level ordering of scored plans.
//!
//! Precedence:
//! 1. Higher score, unless the gap is within the closeness threshold
//! 2. Higher completeness
//! 3. Fewer verification flags
//! 4. Plan name, then plan id
//!
//! "Within threshold" is not transitive (80 ~ 84 ~ 88 but 80 !~ 88), so a
//! plain comparator sort would not be a total order. `rank` instead walks
//! the score-descending list and groups it into bands anchored at each
//! band's highest score; plans within a band are ordered by levels 2-4.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::ScoredPlan;

/// Reference closeness threshold, in points.
pub const DEFAULT_CLOSENESS_THRESHOLD: f64 = 5.0;

/// Which comparator level decided between two plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieBreakLevel {
    Score,
    Completeness,
    VerificationFlags,
    PlanName,
}

/// Orders scored plans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieBreakResolver {
    closeness_threshold: f64,
}

impl TieBreakResolver {
    /// Creates a resolver. Negative or non-finite thresholds are treated as 0.
    pub fn new(closeness_threshold: f64) -> Self {
        let closeness_threshold = if closeness_threshold.is_finite() {
            closeness_threshold.max(0.0)
        } else {
            0.0
        };
        Self {
            closeness_threshold,
        }
    }

    pub fn closeness_threshold(&self) -> f64 {
        self.closeness_threshold
    }

    /// True when two scores are close enough to count as tied.
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.closeness_threshold
    }

    /// Sorts plans best-first into a deterministic total order.
    pub fn rank<'a>(&self, mut plans: Vec<ScoredPlan<'a>>) -> Vec<ScoredPlan<'a>> {
        plans.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| Self::by_data_quality(a, b))
        });

        let mut ranked = Vec::with_capacity(plans.len());
        let mut band: Vec<ScoredPlan<'a>> = Vec::new();
        let mut anchor: Option<f64> = None;

        for plan in plans {
            match anchor {
                Some(top) if top - plan.total_score <= self.closeness_threshold => band.push(plan),
                _ => {
                    Self::flush_band(&mut band, &mut ranked);
                    anchor = Some(plan.total_score);
                    band.push(plan);
                }
            }
        }
        Self::flush_band(&mut band, &mut ranked);

        ranked
    }

    /// Pairwise precedence: `Less` means `a` ranks above `b`.
    pub fn compare(&self, a: &ScoredPlan<'_>, b: &ScoredPlan<'_>) -> Ordering {
        if !self.is_close(a.total_score, b.total_score) {
            return b.total_score.total_cmp(&a.total_score);
        }
        Self::by_data_quality(a, b)
    }

    /// The comparator level that puts `winner` above `runner_up`.
    pub fn deciding_level(&self, winner: &ScoredPlan<'_>, runner_up: &ScoredPlan<'_>) -> TieBreakLevel {
        if !self.is_close(winner.total_score, runner_up.total_score) {
            return TieBreakLevel::Score;
        }
        if winner.completeness_score() != runner_up.completeness_score() {
            return TieBreakLevel::Completeness;
        }
        if winner.verification_flags.len() != runner_up.verification_flags.len() {
            return TieBreakLevel::VerificationFlags;
        }
        TieBreakLevel::PlanName
    }

    fn flush_band<'a>(band: &mut Vec<ScoredPlan<'a>>, ranked: &mut Vec<ScoredPlan<'a>>) {
        band.sort_by(Self::by_data_quality);
        ranked.append(band);
    }

    /// Levels 2-4.
    fn by_data_quality(a: &ScoredPlan<'_>, b: &ScoredPlan<'_>) -> Ordering {
        b.completeness_score()
            .total_cmp(&a.completeness_score())
            .then_with(|| a.verification_flags.len().cmp(&b.verification_flags.len()))
            .then_with(|| a.plan.plan_name().cmp(b.plan.plan_name()))
            .then_with(|| a.plan.plan_id().cmp(b.plan.plan_id()))
    }
}

impl Default for TieBreakResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSENESS_THRESHOLD)
    }
}
