//! Recommendation Orchestrator - Eliminate, score, rank, and explain.

use super::elimination::EliminationFilter;
use super::ranking::{TieBreakLevel, TieBreakResolver};
use super::results::{ComparisonResult, Recommendation, ScoredPlan};
use super::scoring_engine::{ScoreBreakdownEntry, ScoringEngine};
use super::weights::WeightTable;
use crate::domain::catalog::Plan;
use crate::domain::foundation::Percentage;
use crate::domain::preferences::UserPreferences;

/// Number of breakdown entries reported as top drivers.
const TOP_DRIVER_COUNT: usize = 3;

/// Produces ranked, explained recommendations from a plan list.
///
/// Holds only configuration; the plan list is passed per call so that
/// concurrent requests can work against different catalogs.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    weights: WeightTable,
    resolver: TieBreakResolver,
}

impl RecommendationEngine {
    pub fn new(weights: WeightTable, resolver: TieBreakResolver) -> Self {
        Self { weights, resolver }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn resolver(&self) -> &TieBreakResolver {
        &self.resolver
    }

    /// Returns the best `top_n` plans, best first.
    ///
    /// Empty input, full elimination, or `top_n == 0` yield an empty list.
    pub fn recommend(
        &self,
        plans: &[Plan],
        preferences: &UserPreferences,
        top_n: usize,
    ) -> Vec<ComparisonResult> {
        self.recommend_explained(plans, preferences, top_n).results
    }

    /// Like [`Self::recommend`], also reporting the plans removed by hard
    /// requirements in catalog order.
    pub fn recommend_explained(
        &self,
        plans: &[Plan],
        preferences: &UserPreferences,
        top_n: usize,
    ) -> Recommendation {
        let (survivors, eliminated) = EliminationFilter::partition(plans, preferences, &self.weights);
        let results = if top_n == 0 {
            Vec::new()
        } else {
            self.rank(self.score_survivors(survivors, preferences), top_n)
        };
        Recommendation { results, eliminated }
    }

    fn score_survivors<'a>(
        &self,
        survivors: Vec<&'a Plan>,
        preferences: &UserPreferences,
    ) -> Vec<ScoredPlan<'a>> {
        survivors
            .into_iter()
            .map(|plan| {
                let result = ScoringEngine::score(plan, preferences, &self.weights);
                ScoredPlan {
                    plan,
                    total_score: result.score,
                    score_breakdown: result.breakdown,
                    verification_flags: result.verification_flags,
                }
            })
            .collect()
    }

    fn rank(&self, scored: Vec<ScoredPlan<'_>>, top_n: usize) -> Vec<ComparisonResult> {
        let mut ranked = self.resolver.rank(scored);
        ranked.truncate(top_n);

        let top_raw = ranked.first().map(|s| s.total_score).unwrap_or(0.0);
        let trade_off = match ranked.as_slice() {
            [winner, runner_up, ..] => Some(self.explain_trade_off(winner, runner_up)),
            _ => None,
        };

        ranked
            .into_iter()
            .enumerate()
            .map(|(index, scored)| ComparisonResult {
                rank: index + 1,
                plan: scored.plan.clone(),
                raw_score: scored.total_score,
                relative_score: Percentage::from_ratio(scored.total_score, top_raw),
                top_drivers: top_drivers(&scored.score_breakdown),
                trade_off_vs_runner_up: if index == 0 { trade_off.clone() } else { None },
                verification_needed: !scored.verification_flags.is_empty(),
                completeness_score: scored.completeness_score(),
                verification_flags: scored.verification_flags,
            })
            .collect()
    }

    fn explain_trade_off(&self, winner: &ScoredPlan<'_>, runner_up: &ScoredPlan<'_>) -> String {
        let rival = runner_up.plan.plan_name();
        let within = format!(
            "Within {} points of {}",
            fmt_points(self.resolver.closeness_threshold()),
            rival
        );

        match self.resolver.deciding_level(winner, runner_up) {
            TieBreakLevel::Score => {
                let mut text = format!(
                    "{} points ahead of {}",
                    fmt_points(winner.total_score - runner_up.total_score),
                    rival
                );
                let mut stronger = Vec::new();
                let mut weaker = Vec::new();
                for entry in &winner.score_breakdown {
                    let delta = entry.points - runner_up.points_in(&entry.category);
                    if delta > 0.0 {
                        stronger.push(format!("{} (+{})", entry.category, fmt_points(delta)));
                    } else if delta < 0.0 {
                        weaker.push(format!("{} (-{})", entry.category, fmt_points(-delta)));
                    }
                }
                if !stronger.is_empty() {
                    text.push_str(&format!("; stronger on: {}", stronger.join(", ")));
                }
                if !weaker.is_empty() {
                    text.push_str(&format!("; weaker on: {}", weaker.join(", ")));
                }
                text
            }
            TieBreakLevel::Completeness => format!(
                "{}; ranked higher on data completeness ({} vs {})",
                within,
                Percentage::from_ratio(winner.completeness_score(), 1.0),
                Percentage::from_ratio(runner_up.completeness_score(), 1.0)
            ),
            TieBreakLevel::VerificationFlags => format!(
                "{}; fewer unverified benefits ({} vs {})",
                within,
                winner.verification_flags.len(),
                runner_up.verification_flags.len()
            ),
            TieBreakLevel::PlanName => {
                format!("{}; equal on data quality, ordered by plan name", within)
            }
        }
    }
}

/// Highest non-zero breakdown entries, ties kept in table order.
fn top_drivers(breakdown: &[ScoreBreakdownEntry]) -> Vec<ScoreBreakdownEntry> {
    let mut drivers: Vec<_> = breakdown.iter().filter(|e| e.points > 0.0).cloned().collect();
    drivers.sort_by(|a, b| b.points.total_cmp(&a.points));
    drivers.truncate(TOP_DRIVER_COUNT);
    drivers
}

fn fmt_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{BenefitField, HospitalCover, Insurer, PlanTier};
    use crate::domain::preferences::{PreferenceKey, PreferenceValue};
    use crate::domain::recommendation::{Comparison, ScoringRule};

    fn prefs(pairs: &[(PreferenceKey, PreferenceValue)]) -> UserPreferences {
        let mut prefs = UserPreferences::new();
        for (key, value) in pairs {
            prefs.set(*key, *value).unwrap();
        }
        prefs
    }

    fn names(results: &[ComparisonResult]) -> Vec<&str> {
        results.iter().map(|r| r.plan.plan_name()).collect()
    }

    #[test]
    fn keeps_matching_and_unknown_plans_after_elimination() {
        let plans = vec![
            Plan::builder("p1", Insurer::Vhi, "P1", PlanTier::Mid)
                .flag(BenefitField::MaternityCover, true)
                .build()
                .unwrap(),
            Plan::builder("p2", Insurer::Laya, "P2", PlanTier::Mid)
                .flag(BenefitField::MaternityCover, false)
                .build()
                .unwrap(),
            Plan::builder("p3", Insurer::IrishLife, "P3", PlanTier::Mid)
                .flag(BenefitField::MaternityCover, false)
                .build()
                .unwrap(),
            Plan::builder("p4", Insurer::Level, "P4", PlanTier::Mid)
                .unknown(BenefitField::MaternityCover)
                .build()
                .unwrap(),
        ];
        let p = prefs(&[(PreferenceKey::MaternityNeeded, PreferenceValue::Flag(true))]);

        let results = RecommendationEngine::default().recommend(&plans, &p, 10);

        assert_eq!(names(&results), vec!["P1", "P4"]);
        assert_eq!(results[0].raw_score, 15.0);
        assert!(!results[0].verification_needed);
        assert_eq!(results[1].raw_score, 0.0);
        assert_eq!(results[1].verification_flags, vec!["Maternity cover not verified"]);
    }

    #[test]
    fn close_scores_rank_the_more_complete_plan_first() {
        // A scores 83 at 60% completeness, B scores 80 at 90%: within the 5-point threshold
        let table = WeightTable::new(
            "close-scores",
            vec![
                ScoringRule::new(
                    PreferenceKey::HospitalCoverLevel,
                    BenefitField::HospitalCover,
                    6.0,
                    Comparison::AtLeast,
                ),
                ScoringRule::new(PreferenceKey::DentalNeeded, BenefitField::DentalCover, 77.0, Comparison::Included)
                    .hard(),
            ],
        )
        .unwrap();
        let a = Plan::builder("a", Insurer::Vhi, "A", PlanTier::High)
            .hospital(HospitalCover::Private)
            .flag(BenefitField::DentalCover, true)
            .flag(BenefitField::OpticalCover, true)
            .flag(BenefitField::OutpatientCover, true)
            .flag(BenefitField::MaternityCover, true)
            .flag(BenefitField::GpVisits, true)
            .build()
            .unwrap();
        let b = Plan::builder("b", Insurer::Laya, "B", PlanTier::High)
            .all_flags(true)
            .hospital(HospitalCover::SemiPrivate)
            .unknown(BenefitField::OpticalCover)
            .build()
            .unwrap();
        let p = prefs(&[
            (
                PreferenceKey::HospitalCoverLevel,
                PreferenceValue::HospitalLevel(HospitalCover::Private),
            ),
            (PreferenceKey::DentalNeeded, PreferenceValue::Flag(true)),
        ]);

        let engine = RecommendationEngine::new(table, TieBreakResolver::default());
        let results = engine.recommend(&[a, b], &p, 5);

        assert_eq!(names(&results), vec!["B", "A"]);
        assert_eq!(results[0].raw_score, 80.0);
        assert_eq!(results[1].raw_score, 83.0);
        assert_eq!(results[1].relative_score, Percentage::HUNDRED);
        assert_eq!(
            results[0].trade_off_vs_runner_up.as_deref(),
            Some("Within 5 points of A; ranked higher on data completeness (90% vs 60%)")
        );
    }

    #[test]
    fn explained_recommendation_reports_eliminations_once() {
        let plans = vec![
            Plan::builder("d1", Insurer::Vhi, "With Dental", PlanTier::Mid)
                .flag(BenefitField::DentalCover, true)
                .build()
                .unwrap(),
            Plan::builder("d0", Insurer::Laya, "Without Dental", PlanTier::Mid)
                .flag(BenefitField::DentalCover, false)
                .build()
                .unwrap(),
        ];
        let p = prefs(&[(PreferenceKey::DentalNeeded, PreferenceValue::Flag(true))]);

        let explained = RecommendationEngine::default().recommend_explained(&plans, &p, 5);

        assert_eq!(names(&explained.results), vec!["With Dental"]);
        assert_eq!(explained.eliminated.len(), 1);
        assert_eq!(explained.eliminated[0].plan_id.as_str(), "d0");

        let none = RecommendationEngine::default().recommend_explained(&plans, &p, 0);
        assert!(none.results.is_empty());
        assert_eq!(none.eliminated.len(), 1);
    }

    #[test]
    fn empty_preferences_score_everything_zero() {
        let plans = vec![
            Plan::builder("x", Insurer::Vhi, "X", PlanTier::Basic).build().unwrap(),
            Plan::builder("y", Insurer::Laya, "Y", PlanTier::Premium)
                .all_flags(true)
                .hospital(HospitalCover::HiTech)
                .build()
                .unwrap(),
        ];

        let results = RecommendationEngine::default().recommend(&plans, &UserPreferences::new(), 10);

        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.raw_score, 0.0);
            assert_eq!(result.relative_score, Percentage::ZERO);
            assert!(result.verification_flags.is_empty());
            assert!(!result.verification_needed);
            assert!(result.top_drivers.is_empty());
        }
        // tie on score, Y is complete and X is not
        assert_eq!(names(&results), vec!["Y", "X"]);
    }

    #[test]
    fn score_gap_explains_gains_and_losses() {
        let strong = Plan::builder("s", Insurer::Vhi, "Strong", PlanTier::Premium)
            .hospital(HospitalCover::HiTech)
            .unknown(BenefitField::DentalCover)
            .build()
            .unwrap();
        let weak = Plan::builder("w", Insurer::Laya, "Weak", PlanTier::Mid)
            .hospital(HospitalCover::Private)
            .flag(BenefitField::DentalCover, true)
            .build()
            .unwrap();
        let p = prefs(&[
            (
                PreferenceKey::HospitalCoverLevel,
                PreferenceValue::HospitalLevel(HospitalCover::HiTech),
            ),
            (PreferenceKey::DentalNeeded, PreferenceValue::Flag(true)),
        ]);

        let results = RecommendationEngine::default().recommend(&[weak, strong], &p, 3);

        assert_eq!(names(&results), vec!["Strong", "Weak"]);
        assert_eq!(
            results[0].trade_off_vs_runner_up.as_deref(),
            Some("11.5 points ahead of Weak; stronger on: Hospital cover (+17.5); weaker on: Dental cover (-6)")
        );
        assert!(results[1].trade_off_vs_runner_up.is_none());
        assert_eq!(results[1].relative_score, Percentage::new(67));
    }

    #[test]
    fn top_drivers_are_the_three_highest_non_zero_entries() {
        let plan = Plan::builder("p", Insurer::Vhi, "P", PlanTier::Premium)
            .all_flags(true)
            .hospital(HospitalCover::HiTech)
            .flag(BenefitField::MaternityCover, false)
            .build()
            .unwrap();
        let p = prefs(&[
            (PreferenceKey::DentalNeeded, PreferenceValue::Flag(true)),
            (PreferenceKey::OpticalNeeded, PreferenceValue::Flag(true)),
            (PreferenceKey::GpVisitsNeeded, PreferenceValue::Flag(true)),
            (PreferenceKey::OutpatientNeeded, PreferenceValue::Flag(true)),
            (PreferenceKey::PhysiotherapyNeeded, PreferenceValue::Flag(true)),
        ]);

        let results = RecommendationEngine::default().recommend(&[plan], &p, 1);

        let drivers: Vec<_> = results[0].top_drivers.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(drivers, vec!["Outpatient cover", "GP visits", "Dental cover"]);
        assert!(results[0].trade_off_vs_runner_up.is_none());
        assert_eq!(results[0].relative_score, Percentage::HUNDRED);
    }

    #[test]
    fn top_n_limits_and_zero_returns_nothing() {
        let plans: Vec<Plan> = (0..5)
            .map(|i| {
                Plan::builder(format!("p{}", i), Insurer::Vhi, format!("Plan {}", i), PlanTier::Mid)
                    .build()
                    .unwrap()
            })
            .collect();
        let engine = RecommendationEngine::default();

        assert_eq!(engine.recommend(&plans, &UserPreferences::new(), 2).len(), 2);
        assert!(engine.recommend(&plans, &UserPreferences::new(), 0).is_empty());
        assert!(engine.recommend(&[], &UserPreferences::new(), 3).is_empty());
    }

    #[test]
    fn results_do_not_depend_on_catalog_order() {
        let mut plans: Vec<Plan> = (0..6)
            .map(|i| {
                let mut builder =
                    Plan::builder(format!("p{}", i), Insurer::Vhi, format!("Plan {}", i), PlanTier::Mid);
                if i % 2 == 0 {
                    builder = builder.flag(BenefitField::DentalCover, true);
                }
                if i % 3 == 0 {
                    builder = builder.hospital(HospitalCover::Private);
                }
                builder.build().unwrap()
            })
            .collect();
        let p = prefs(&[
            (PreferenceKey::DentalNeeded, PreferenceValue::Flag(true)),
            (
                PreferenceKey::HospitalCoverLevel,
                PreferenceValue::HospitalLevel(HospitalCover::SemiPrivate),
            ),
        ]);
        let engine = RecommendationEngine::default();

        let first = engine.recommend(&plans, &p, 6);
        plans.reverse();
        let second = engine.recommend(&plans, &p, 6);

        assert_eq!(first, second);
    }

    #[test]
    fn fmt_points_drops_trailing_zero() {
        assert_eq!(fmt_points(5.0), "5");
        assert_eq!(fmt_points(17.5), "17.5");
    }
}
