//! Completeness Calculator - Data-quality score from unknown key fields.

use serde::{Deserialize, Serialize};

use super::plan::{BenefitField, Benefits};

/// The fixed, ordered key-field set every plan is measured against.
pub const KEY_FIELDS: &[BenefitField] = &BenefitField::ALL;

/// How much of a plan's key data is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completeness {
    pub null_key_count: usize,
    pub known_key_count: usize,
    pub completeness_score: f64,
}

/// Pure calculator for plan completeness.
pub struct CompletenessCalculator;

impl CompletenessCalculator {
    /// Counts unknown key fields and derives `(N - unknown) / N`.
    ///
    /// # Edge Cases
    /// - Empty key-field set: score 1.0 (nothing can be unknown)
    /// - Duplicated fields in `key_fields` count once per occurrence
    pub fn calculate(benefits: &Benefits, key_fields: &[BenefitField]) -> Completeness {
        let total = key_fields.len();
        let null_key_count = key_fields
            .iter()
            .filter(|field| benefits.get(**field).is_unknown())
            .count();
        let known_key_count = total - null_key_count;

        let completeness_score = if total == 0 {
            1.0
        } else {
            known_key_count as f64 / total as f64
        };

        Completeness {
            null_key_count,
            known_key_count,
            completeness_score,
        }
    }

    /// Lists the unknown key fields, in key-field order.
    pub fn unknown_fields(benefits: &Benefits, key_fields: &[BenefitField]) -> Vec<BenefitField> {
        key_fields
            .iter()
            .copied()
            .filter(|field| benefits.get(*field).is_unknown())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::HospitalCover;
    use proptest::prelude::*;

    fn fully_known() -> Benefits {
        Benefits {
            hospital_cover: Some(HospitalCover::Private),
            outpatient_cover: Some(true),
            gp_visits: Some(false),
            maternity_cover: Some(true),
            mental_health_cover: Some(false),
            overseas_emergency: Some(true),
            dental_cover: Some(false),
            optical_cover: Some(true),
            physiotherapy: Some(false),
            consultant_choice: Some(true),
        }
    }

    #[test]
    fn all_known_scores_one() {
        let c = CompletenessCalculator::calculate(&fully_known(), KEY_FIELDS);
        assert_eq!(c.null_key_count, 0);
        assert_eq!(c.completeness_score, 1.0);
    }

    #[test]
    fn all_unknown_scores_zero() {
        let c = CompletenessCalculator::calculate(&Benefits::default(), KEY_FIELDS);
        assert_eq!(c.null_key_count, KEY_FIELDS.len());
        assert_eq!(c.completeness_score, 0.0);
    }

    #[test]
    fn explicit_false_counts_as_known() {
        let benefits = Benefits {
            dental_cover: Some(false),
            ..Benefits::default()
        };
        let c = CompletenessCalculator::calculate(&benefits, &[BenefitField::DentalCover]);
        assert_eq!(c.null_key_count, 0);
    }

    #[test]
    fn empty_key_set_is_complete() {
        let c = CompletenessCalculator::calculate(&Benefits::default(), &[]);
        assert_eq!(c.null_key_count, 0);
        assert_eq!(c.completeness_score, 1.0);
    }

    #[test]
    fn unknown_fields_lists_in_key_order() {
        let benefits = Benefits {
            hospital_cover: Some(HospitalCover::Public),
            ..fully_known()
        };
        let benefits = Benefits {
            dental_cover: None,
            outpatient_cover: None,
            ..benefits
        };
        assert_eq!(
            CompletenessCalculator::unknown_fields(&benefits, KEY_FIELDS),
            vec![BenefitField::OutpatientCover, BenefitField::DentalCover]
        );
    }

    fn tri_state() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
    }

    proptest! {
        #[test]
        fn known_plus_unknown_is_key_count(
            flags in proptest::collection::vec(tri_state(), 9),
            hospital in proptest::option::of(0usize..4),
        ) {
            let benefits = Benefits {
                hospital_cover: hospital.map(|i| HospitalCover::ALL[i]),
                outpatient_cover: flags[0],
                gp_visits: flags[1],
                maternity_cover: flags[2],
                mental_health_cover: flags[3],
                overseas_emergency: flags[4],
                dental_cover: flags[5],
                optical_cover: flags[6],
                physiotherapy: flags[7],
                consultant_choice: flags[8],
            };
            let c = CompletenessCalculator::calculate(&benefits, KEY_FIELDS);
            prop_assert_eq!(c.null_key_count + c.known_key_count, KEY_FIELDS.len());
            prop_assert!((0.0..=1.0).contains(&c.completeness_score));
            let expected = c.known_key_count as f64 / KEY_FIELDS.len() as f64;
            prop_assert!((c.completeness_score - expected).abs() < 1e-12);
        }
    }
}
