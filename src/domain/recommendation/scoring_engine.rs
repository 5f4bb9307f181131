//! Scoring Engine - Weighted match score of one plan against one preference set.

use serde::{Deserialize, Serialize};

use super::weights::{RuleOutcome, WeightTable};
use crate::domain::catalog::{BenefitField, Plan};
use crate::domain::preferences::UserPreferences;

/// Points a plan earned for one preference dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdownEntry {
    pub category: String,
    pub field: BenefitField,
    pub points: f64,
    pub max_points: f64,
}

/// Score, explanation, and data-quality flags for one plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanScore {
    pub score: f64,
    pub breakdown: Vec<ScoreBreakdownEntry>,
    pub verification_flags: Vec<String>,
}

impl PlanScore {
    /// Points earned in a category (0.0 when the category was not scored).
    pub fn points_for(&self, field: BenefitField) -> f64 {
        self.breakdown
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.points)
            .unwrap_or(0.0)
    }
}

/// Builds the text of a verification flag for a category.
pub fn verification_flag(category: &str) -> String {
    format!("{} not verified", category)
}

/// Stateless scorer driven by a [`WeightTable`].
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores a plan.
    ///
    /// # Algorithm
    /// For each table rule whose preference was answered with a request:
    /// - plan field known: award the rule's points (0 for a miss)
    /// - plan field unknown: award 0 and raise a verification flag
    ///
    /// # Edge Cases
    /// - Unanswered preference: no entry, no flag (missing user data, not plan data)
    /// - Answer `false`: nothing was requested, no entry, no flag
    /// - Preference with no rule in the table: ignored
    ///
    /// `UserPreferences` is validated when it is built, so there is no
    /// malformed-input path here.
    pub fn score(plan: &Plan, preferences: &UserPreferences, table: &WeightTable) -> PlanScore {
        let mut result = PlanScore::default();

        for rule in table.rules() {
            let Some(wanted) = preferences.get(rule.preference) else {
                continue;
            };

            let points = match rule.evaluate(wanted, plan.benefit(rule.field)) {
                RuleOutcome::NotRequested => continue,
                RuleOutcome::Unknown => {
                    result
                        .verification_flags
                        .push(verification_flag(&rule.category));
                    0.0
                }
                RuleOutcome::Points(points) => points,
            };

            result.score += points;
            result.breakdown.push(ScoreBreakdownEntry {
                category: rule.category.clone(),
                field: rule.field,
                points,
                max_points: rule.weight,
            });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{HospitalCover, Insurer, PlanTier};
    use crate::domain::preferences::{PreferenceKey, PreferenceValue};
    use proptest::prelude::*;

    fn prefs(pairs: &[(PreferenceKey, PreferenceValue)]) -> UserPreferences {
        let mut prefs = UserPreferences::new();
        for (key, value) in pairs {
            prefs.set(*key, *value).unwrap();
        }
        prefs
    }

    fn plan() -> Plan {
        Plan::builder("p1", Insurer::Vhi, "Company Plan Plus", PlanTier::High)
            .hospital(HospitalCover::Private)
            .flag(BenefitField::MaternityCover, true)
            .flag(BenefitField::DentalCover, false)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_preferences_score_zero_without_flags() {
        let result = ScoringEngine::score(&plan(), &UserPreferences::new(), WeightTable::standard());
        assert_eq!(result.score, 0.0);
        assert!(result.breakdown.is_empty());
        assert!(result.verification_flags.is_empty());
    }

    #[test]
    fn awards_weight_for_included_benefit() {
        let p = prefs(&[(PreferenceKey::MaternityNeeded, PreferenceValue::Flag(true))]);
        let result = ScoringEngine::score(&plan(), &p, WeightTable::standard());
        assert_eq!(result.score, 15.0);
        assert_eq!(result.points_for(BenefitField::MaternityCover), 15.0);
        assert!(result.verification_flags.is_empty());
    }

    #[test]
    fn explicit_exclusion_scores_zero_without_flag() {
        let p = prefs(&[(PreferenceKey::DentalNeeded, PreferenceValue::Flag(true))]);
        let result = ScoringEngine::score(&plan(), &p, WeightTable::standard());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.breakdown.len(), 1);
        assert!(result.verification_flags.is_empty());
    }

    #[test]
    fn unknown_field_scores_zero_and_flags() {
        let p = prefs(&[(PreferenceKey::OpticalNeeded, PreferenceValue::Flag(true))]);
        let result = ScoringEngine::score(&plan(), &p, WeightTable::standard());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.points_for(BenefitField::OpticalCover), 0.0);
        assert_eq!(result.verification_flags, vec!["Optical cover not verified"]);
    }

    #[test]
    fn declined_preference_adds_nothing() {
        let p = prefs(&[(PreferenceKey::OpticalNeeded, PreferenceValue::Flag(false))]);
        let result = ScoringEngine::score(&plan(), &p, WeightTable::standard());
        assert!(result.breakdown.is_empty());
        assert!(result.verification_flags.is_empty());
    }

    #[test]
    fn hospital_level_uses_at_least_comparison() {
        let p = prefs(&[(
            PreferenceKey::HospitalCoverLevel,
            PreferenceValue::HospitalLevel(HospitalCover::HiTech),
        )]);
        let result = ScoringEngine::score(&plan(), &p, WeightTable::standard());
        assert_eq!(result.score, 17.5);
    }

    #[test]
    fn breakdown_follows_table_order() {
        let p = prefs(&[
            (PreferenceKey::DentalNeeded, PreferenceValue::Flag(true)),
            (PreferenceKey::MaternityNeeded, PreferenceValue::Flag(true)),
            (
                PreferenceKey::HospitalCoverLevel,
                PreferenceValue::HospitalLevel(HospitalCover::Public),
            ),
        ]);
        let result = ScoringEngine::score(&plan(), &p, WeightTable::standard());
        let categories: Vec<_> = result.breakdown.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Hospital cover", "Maternity cover", "Dental cover"]);
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn preference_without_rule_is_ignored() {
        let table = WeightTable::from_yaml(
            r#"
version: "dental-only"
rules:
  - preference: dentalNeeded
    field: dentalCover
    category: Dental
    weight: 10
    comparison: INCLUDED
"#,
        )
        .unwrap();
        let p = prefs(&[(PreferenceKey::OpticalNeeded, PreferenceValue::Flag(true))]);
        let result = ScoringEngine::score(&plan(), &p, &table);
        assert_eq!(result, PlanScore::default());
    }

    fn tri_state() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
    }

    proptest! {
        #[test]
        fn unknown_answered_field_is_zero_and_flagged(
            index in 1usize..BenefitField::ALL.len(),
            others in tri_state(),
        ) {
            let field = BenefitField::ALL[index];
            let rule = WeightTable::standard()
                .rules()
                .iter()
                .find(|r| r.field == field)
                .unwrap();

            let plan = Plan::builder("p", Insurer::Level, "Level", PlanTier::Basic)
                .all_flags(others.unwrap_or(true))
                .unknown(field)
                .build()
                .unwrap();
            let p = prefs(&[(rule.preference, PreferenceValue::Flag(true))]);
            let result = ScoringEngine::score(&plan, &p, WeightTable::standard());

            prop_assert_eq!(result.points_for(field), 0.0);
            prop_assert!(result
                .verification_flags
                .iter()
                .any(|f| f.contains(field.label())));
        }

        #[test]
        fn score_is_bounded_by_table_max(
            flags in proptest::collection::vec(tri_state(), 9),
            answers in proptest::collection::vec(proptest::option::of(any::<bool>()), 9),
        ) {
            let mut builder = Plan::builder("p", Insurer::Vhi, "Any", PlanTier::Mid)
                .hospital(HospitalCover::Private);
            for (field, flag) in BenefitField::ALL[1..].iter().zip(&flags) {
                builder = match flag {
                    Some(v) => builder.flag(*field, *v),
                    None => builder.unknown(*field),
                };
            }
            let plan = builder.build().unwrap();

            let mut p = UserPreferences::new();
            for (key, answer) in PreferenceKey::ALL[1..].iter().zip(&answers) {
                if let Some(a) = answer {
                    p.set(*key, PreferenceValue::Flag(*a)).unwrap();
                }
            }

            let table = WeightTable::standard();
            let result = ScoringEngine::score(&plan, &p, table);
            prop_assert!(result.score >= 0.0);
            prop_assert!(result.score <= table.max_score());
        }
    }
}
