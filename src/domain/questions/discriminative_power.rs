//! Discriminative Power Calculator - How sharply an answer splits the plans.
//!
//! `power = |matching - non_matching| / total`, a fraction in [0, 1]. A plan
//! whose field is unknown cannot be shown to match, so it counts as
//! non-matching.

use super::question::{AnswerOption, QuestionAnswerStat};
use crate::domain::catalog::{BenefitField, BenefitValue, Plan};
use crate::domain::preferences::{PreferenceKey, PreferenceValue};
use crate::domain::recommendation::WeightTable;

/// Stateless calculator over a plan population.
pub struct DiscriminativePowerCalculator;

impl DiscriminativePowerCalculator {
    /// Statistics for one answer, judged against one plan field.
    pub fn power(
        key: PreferenceKey,
        field: BenefitField,
        answer: &AnswerOption,
        plans: &[&Plan],
    ) -> QuestionAnswerStat {
        let matching_count = plans
            .iter()
            .filter(|plan| Self::matches(plan.benefit(field), answer.value))
            .count();
        let non_matching_count = plans.len() - matching_count;

        QuestionAnswerStat {
            question_key: key,
            answer_value: answer.label.clone(),
            matching_count,
            non_matching_count,
            discriminative_power: Self::split_power(matching_count, non_matching_count),
        }
    }

    /// Statistics for every answer to one question.
    ///
    /// The plan field a question speaks to comes from the weight table; a
    /// question with no rule has no statistics.
    pub fn answer_stats(
        key: PreferenceKey,
        plans: &[&Plan],
        table: &WeightTable,
    ) -> Vec<QuestionAnswerStat> {
        let Some(rule) = table.rule_for(key) else {
            return Vec::new();
        };
        AnswerOption::all_for(key)
            .iter()
            .map(|answer| Self::power(key, rule.field, answer, plans))
            .collect()
    }

    /// Mean of the answer-level powers.
    pub fn question_power(key: PreferenceKey, plans: &[&Plan], table: &WeightTable) -> f64 {
        let stats = Self::answer_stats(key, plans, table);
        if stats.is_empty() {
            return 0.0;
        }
        stats.iter().map(|s| s.discriminative_power).sum::<f64>() / stats.len() as f64
    }

    /// `|matching - non_matching| / total`, 0 for an empty population.
    pub fn split_power(matching: usize, non_matching: usize) -> f64 {
        let total = matching + non_matching;
        if total == 0 {
            return 0.0;
        }
        matching.abs_diff(non_matching) as f64 / total as f64
    }

    /// True when a plan's field definitively satisfies the answer.
    ///
    /// Flags match on equality so that a `NO` answer matches plans that
    /// explicitly exclude the benefit. Levels match at or above the answer.
    fn matches(actual: BenefitValue, answer: PreferenceValue) -> bool {
        match (actual, answer) {
            (BenefitValue::Flag(included), PreferenceValue::Flag(wanted)) => included == wanted,
            (BenefitValue::Hospital(level), PreferenceValue::HospitalLevel(wanted)) => level >= wanted,
            _ => false,
        }
    }
}
