//! Adaptive Question Ranker - Picks the next quiz question.
//!
//! effective priority = base priority + information gain - friction penalty
//!
//! - base priority: stored power, plus a popularity bonus scaled by the
//!   question's share of the most-answered question's responses
//! - information gain: live power over the plans still in play
//! - friction penalty: how often users abandon the quiz at this question

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::discriminative_power::DiscriminativePowerCalculator;
use super::question::{Question, QuestionType};
use crate::domain::catalog::Plan;
use crate::domain::preferences::PreferenceKey;
use crate::domain::recommendation::WeightTable;

/// Observed behaviour for one question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTelemetry {
    pub question_key: PreferenceKey,
    /// Times the question was served.
    pub impressions: u64,
    /// Times it was answered.
    pub responses: u64,
}

impl QuestionTelemetry {
    pub fn new(question_key: PreferenceKey) -> Self {
        Self {
            question_key,
            impressions: 0,
            responses: 0,
        }
    }

    /// Share of impressions that were never answered, in [0, 1].
    pub fn abandon_rate(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        let abandoned = self.impressions.saturating_sub(self.responses);
        abandoned as f64 / self.impressions as f64
    }
}

/// What the caller knows beyond the pool itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingContext<'a> {
    /// Plans still in play; `None` disables information gain.
    pub remaining_plans: Option<&'a [&'a Plan]>,
    /// Needed to map questions to plan fields for information gain.
    pub table: Option<&'a WeightTable>,
    pub telemetry: Option<&'a HashMap<PreferenceKey, QuestionTelemetry>>,
}

/// The question to ask next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestion {
    pub question_key: PreferenceKey,
    pub question_text: String,
    pub question_type: QuestionType,
    /// Stored power, a fraction in [0, 1].
    pub discriminative_power: f64,
    pub effective_priority: f64,
    /// 1-based position in the ranked pool.
    pub rank: usize,
}

/// Weights applied on top of stored power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveQuestionRanker {
    pub popularity_weight: f64,
    pub info_gain_weight: f64,
    pub friction_weight: f64,
}

impl Default for AdaptiveQuestionRanker {
    fn default() -> Self {
        Self {
            popularity_weight: 0.1,
            info_gain_weight: 0.5,
            friction_weight: 0.3,
        }
    }
}

struct Candidate<'q> {
    question: &'q Question,
    power_rank: usize,
    priority: f64,
}

impl AdaptiveQuestionRanker {
    pub fn new(popularity_weight: f64, info_gain_weight: f64, friction_weight: f64) -> Self {
        Self {
            popularity_weight,
            info_gain_weight,
            friction_weight,
        }
    }

    /// Highest-priority active question not yet asked.
    pub fn next_question(
        &self,
        pool: &[Question],
        asked: &[PreferenceKey],
        context: &RankingContext<'_>,
    ) -> Option<NextQuestion> {
        self.rank_pool(pool, asked, context).into_iter().next()
    }

    /// Every askable question, best first.
    ///
    /// Ties on priority fall back to stored-power order, then question key.
    pub fn rank_pool(
        &self,
        pool: &[Question],
        asked: &[PreferenceKey],
        context: &RankingContext<'_>,
    ) -> Vec<NextQuestion> {
        let mut askable: Vec<&Question> = pool
            .iter()
            .filter(|q| q.is_active() && !asked.contains(&q.question_key()))
            .collect();
        askable.sort_by(|a, b| by_stored_power(a, b));

        let max_responses = askable.iter().map(|q| q.total_responses()).max().unwrap_or(0);

        let mut candidates: Vec<Candidate<'_>> = askable
            .into_iter()
            .enumerate()
            .map(|(power_rank, question)| Candidate {
                question,
                power_rank,
                priority: self.priority(question, max_responses, context),
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.priority
                .total_cmp(&a.priority)
                .then_with(|| a.power_rank.cmp(&b.power_rank))
        });

        candidates
            .into_iter()
            .enumerate()
            .map(|(index, c)| NextQuestion {
                question_key: c.question.question_key(),
                question_text: c.question.question_text().to_string(),
                question_type: c.question.question_type(),
                discriminative_power: c.question.discriminative_power(),
                effective_priority: c.priority,
                rank: index + 1,
            })
            .collect()
    }

    fn priority(&self, question: &Question, max_responses: u64, context: &RankingContext<'_>) -> f64 {
        let popularity = if max_responses == 0 {
            0.0
        } else {
            question.total_responses() as f64 / max_responses as f64
        };
        let base = question.discriminative_power() + self.popularity_weight * popularity;

        let info_gain = match (context.remaining_plans, context.table) {
            (Some(plans), Some(table)) => {
                self.info_gain_weight
                    * DiscriminativePowerCalculator::question_power(question.question_key(), plans, table)
            }
            _ => 0.0,
        };

        let friction = context
            .telemetry
            .and_then(|t| t.get(&question.question_key()))
            .map(|t| self.friction_weight * t.abandon_rate())
            .unwrap_or(0.0);

        base + info_gain - friction
    }
}

/// Descending stored power, then question key.
pub(crate) fn by_stored_power(a: &Question, b: &Question) -> Ordering {
    b.discriminative_power()
        .total_cmp(&a.discriminative_power())
        .then_with(|| a.question_key().as_str().cmp(b.question_key().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{BenefitField, Insurer, PlanTier};
    use crate::domain::questions::QuestionAnswerStat;

    fn question(key: PreferenceKey, power: f64) -> Question {
        let mut q = Question::new(key, format!("{}?", key)).unwrap();
        q.refresh_power(&[QuestionAnswerStat {
            question_key: key,
            answer_value: "YES".to_string(),
            matching_count: 0,
            non_matching_count: 0,
            discriminative_power: power,
        }]);
        q
    }

    fn keys(ranked: &[NextQuestion]) -> Vec<PreferenceKey> {
        ranked.iter().map(|n| n.question_key).collect()
    }

    #[test]
    fn empty_pool_has_no_next_question() {
        let ranker = AdaptiveQuestionRanker::default();
        assert!(ranker.next_question(&[], &[], &RankingContext::default()).is_none());
    }

    #[test]
    fn without_context_orders_by_stored_power() {
        let pool = vec![
            question(PreferenceKey::DentalNeeded, 0.2),
            question(PreferenceKey::MaternityNeeded, 0.6),
            question(PreferenceKey::OpticalNeeded, 0.4),
        ];
        let ranked = AdaptiveQuestionRanker::default().rank_pool(&pool, &[], &RankingContext::default());

        assert_eq!(
            keys(&ranked),
            vec![
                PreferenceKey::MaternityNeeded,
                PreferenceKey::OpticalNeeded,
                PreferenceKey::DentalNeeded
            ]
        );
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn asked_and_inactive_questions_are_skipped() {
        let mut inactive = question(PreferenceKey::OpticalNeeded, 0.9);
        inactive.set_active(false);
        let pool = vec![
            question(PreferenceKey::MaternityNeeded, 0.8),
            inactive,
            question(PreferenceKey::DentalNeeded, 0.1),
        ];

        let next = AdaptiveQuestionRanker::default()
            .next_question(&pool, &[PreferenceKey::MaternityNeeded], &RankingContext::default())
            .unwrap();
        assert_eq!(next.question_key, PreferenceKey::DentalNeeded);
    }

    #[test]
    fn equal_priority_falls_back_to_key_order() {
        let pool = vec![
            question(PreferenceKey::OpticalNeeded, 0.5),
            question(PreferenceKey::DentalNeeded, 0.5),
        ];
        let next = AdaptiveQuestionRanker::default()
            .next_question(&pool, &[], &RankingContext::default())
            .unwrap();
        assert_eq!(next.question_key, PreferenceKey::DentalNeeded);
    }

    #[test]
    fn friction_demotes_frequently_abandoned_questions() {
        let pool = vec![
            question(PreferenceKey::MaternityNeeded, 0.5),
            question(PreferenceKey::DentalNeeded, 0.4),
        ];
        let mut telemetry = HashMap::new();
        telemetry.insert(
            PreferenceKey::MaternityNeeded,
            QuestionTelemetry {
                question_key: PreferenceKey::MaternityNeeded,
                impressions: 10,
                responses: 5,
            },
        );
        let context = RankingContext {
            telemetry: Some(&telemetry),
            ..RankingContext::default()
        };

        let next = AdaptiveQuestionRanker::default()
            .next_question(&pool, &[], &context)
            .unwrap();
        // 0.5 - 0.3 * 0.5 = 0.35 < 0.4
        assert_eq!(next.question_key, PreferenceKey::DentalNeeded);
    }

    #[test]
    fn popularity_breaks_near_ties() {
        let mut popular = question(PreferenceKey::DentalNeeded, 0.45);
        for _ in 0..10 {
            popular.record_response();
        }
        let pool = vec![question(PreferenceKey::MaternityNeeded, 0.5), popular];

        let next = AdaptiveQuestionRanker::default()
            .next_question(&pool, &[], &RankingContext::default())
            .unwrap();
        assert_eq!(next.question_key, PreferenceKey::DentalNeeded);
    }

    #[test]
    fn information_gain_adds_live_power_over_remaining_plans() {
        let plans: Vec<Plan> = (0..4)
            .map(|i| {
                Plan::builder(format!("p{}", i), Insurer::Vhi, format!("P{}", i), PlanTier::Mid)
                    .flag(BenefitField::MaternityCover, true)
                    .flag(BenefitField::DentalCover, i % 2 == 0)
                    .build()
                    .unwrap()
            })
            .collect();
        let remaining: Vec<&Plan> = plans.iter().collect();
        let pool = vec![
            question(PreferenceKey::MaternityNeeded, 0.3),
            question(PreferenceKey::DentalNeeded, 0.2),
        ];
        let context = RankingContext {
            remaining_plans: Some(remaining.as_slice()),
            table: Some(WeightTable::standard()),
            telemetry: None,
        };

        let ranked = AdaptiveQuestionRanker::default().rank_pool(&pool, &[], &context);
        // maternity: 4 vs 0 for both answers, live power 1.0; dental: 2 vs 2, live power 0
        assert_eq!(ranked[0].question_key, PreferenceKey::MaternityNeeded);
        assert!((ranked[0].effective_priority - 0.8).abs() < 1e-9);
        assert!((ranked[1].effective_priority - 0.2).abs() < 1e-9);
    }

    #[test]
    fn abandon_rate_handles_no_impressions() {
        assert_eq!(QuestionTelemetry::new(PreferenceKey::GpVisitsNeeded).abandon_rate(), 0.0);
    }
}
