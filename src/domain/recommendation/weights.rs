//! Weight Table - Declarative mapping from preferences to plan fields and points.
//!
//! Each row says which plan field answers a preference, how many points a
//! match is worth, how the two are compared, and whether a definitive
//! mismatch eliminates the plan. Tables are versioned data: a new scoring
//! formula is a new table, not new code.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::catalog::{BenefitField, BenefitValue};
use crate::domain::foundation::ValidationError;
use crate::domain::preferences::{PreferenceKey, PreferenceKind, PreferenceValue};

/// Version tag of the built-in table.
pub const DEFAULT_WEIGHT_TABLE_VERSION: &str = "2024.1";

/// How a plan field is compared against the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparison {
    /// Yes/no benefit: full points when the plan includes it.
    Included,
    /// Ordered level: full points at or above the wanted level, half one level below.
    AtLeast,
}

/// Result of applying one rule to one plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    /// The answer does not ask for anything (e.g. "no, I don't need dental").
    NotRequested,
    /// The user asked, the plan's data is unknown.
    Unknown,
    /// Points awarded; zero for a definitive miss.
    Points(f64),
}

/// One row of the weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRule {
    pub preference: PreferenceKey,
    pub field: BenefitField,
    pub category: String,
    pub weight: f64,
    pub comparison: Comparison,
    #[serde(default)]
    pub hard_requirement: bool,
}

impl ScoringRule {
    /// Creates a rule labelled with the field's display name.
    pub fn new(
        preference: PreferenceKey,
        field: BenefitField,
        weight: f64,
        comparison: Comparison,
    ) -> Self {
        Self {
            preference,
            field,
            category: field.label().to_string(),
            weight,
            comparison,
            hard_requirement: false,
        }
    }

    /// Marks the rule as a hard requirement.
    pub fn hard(mut self) -> Self {
        self.hard_requirement = true;
        self
    }

    /// Scores a plan's field value against an answer.
    pub fn evaluate(&self, wanted: PreferenceValue, actual: BenefitValue) -> RuleOutcome {
        match (wanted, actual) {
            (PreferenceValue::Flag(false), _) => RuleOutcome::NotRequested,
            (_, BenefitValue::Unknown) => RuleOutcome::Unknown,
            (PreferenceValue::Flag(true), BenefitValue::Flag(included)) => {
                RuleOutcome::Points(if included { self.weight } else { 0.0 })
            }
            (PreferenceValue::HospitalLevel(level), BenefitValue::Hospital(plan_level)) => {
                match plan_level.levels_below(level) {
                    0 => RuleOutcome::Points(self.weight),
                    1 => RuleOutcome::Points(self.weight / 2.0),
                    _ => RuleOutcome::Points(0.0),
                }
            }
            // Kind mismatches are rejected when the table is built.
            _ => RuleOutcome::NotRequested,
        }
    }

    /// True when the plan definitively fails a hard requirement.
    ///
    /// Unknown data never conflicts.
    pub fn conflicts(&self, wanted: PreferenceValue, actual: BenefitValue) -> bool {
        if !self.hard_requirement {
            return false;
        }
        match (wanted, actual) {
            (PreferenceValue::Flag(true), BenefitValue::Flag(false)) => true,
            (PreferenceValue::HospitalLevel(level), BenefitValue::Hospital(plan_level)) => {
                plan_level < level
            }
            _ => false,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ValidationError::invalid_format(
                self.preference.as_str(),
                format!("weight must be a non-negative number, got {}", self.weight),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::empty_field("category"));
        }

        let field_is_level = self.field == BenefitField::HospitalCover;
        let consistent = match (self.preference.kind(), self.comparison) {
            (PreferenceKind::Flag, Comparison::Included) => !field_is_level,
            (PreferenceKind::HospitalLevel, Comparison::AtLeast) => field_is_level,
            _ => false,
        };
        if !consistent {
            return Err(ValidationError::invalid_format(
                self.preference.as_str(),
                format!(
                    "{:?} comparison cannot map this preference to {}",
                    self.comparison,
                    self.field.label()
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct WeightTableRecord {
    version: String,
    rules: Vec<ScoringRule>,
}

impl TryFrom<WeightTableRecord> for WeightTable {
    type Error = ValidationError;

    fn try_from(record: WeightTableRecord) -> Result<Self, Self::Error> {
        WeightTable::new(record.version, record.rules)
    }
}

/// A validated, versioned set of scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightTableRecord")]
pub struct WeightTable {
    version: String,
    rules: Vec<ScoringRule>,
}

// Every benefit the user asks for is required; hospital level is scored on a sliding scale.
static DEFAULT_TABLE: Lazy<WeightTable> = Lazy::new(|| {
    use BenefitField as F;
    use Comparison::*;
    use PreferenceKey as P;

    WeightTable {
        version: DEFAULT_WEIGHT_TABLE_VERSION.to_string(),
        rules: vec![
            ScoringRule::new(P::HospitalCoverLevel, F::HospitalCover, 35.0, AtLeast),
            ScoringRule::new(P::OutpatientNeeded, F::OutpatientCover, 20.0, Included).hard(),
            ScoringRule::new(P::MaternityNeeded, F::MaternityCover, 15.0, Included).hard(),
            ScoringRule::new(P::MentalHealthNeeded, F::MentalHealthCover, 12.0, Included).hard(),
            ScoringRule::new(P::OverseasEmergencyNeeded, F::OverseasEmergency, 10.0, Included)
                .hard(),
            ScoringRule::new(P::GpVisitsNeeded, F::GpVisits, 8.0, Included).hard(),
            ScoringRule::new(P::ConsultantChoiceNeeded, F::ConsultantChoice, 8.0, Included).hard(),
            ScoringRule::new(P::DentalNeeded, F::DentalCover, 6.0, Included).hard(),
            ScoringRule::new(P::OpticalNeeded, F::OpticalCover, 5.0, Included).hard(),
            ScoringRule::new(P::PhysiotherapyNeeded, F::Physiotherapy, 5.0, Included).hard(),
        ],
    }
});

impl WeightTable {
    /// Builds a table, validating every rule and rejecting duplicate preferences.
    pub fn new(version: impl Into<String>, rules: Vec<ScoringRule>) -> Result<Self, ValidationError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(ValidationError::empty_field("version"));
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.preference) {
                return Err(ValidationError::duplicate(
                    "preference",
                    rule.preference.as_str(),
                ));
            }
        }

        Ok(Self { version, rules })
    }

    /// The built-in table.
    pub fn standard() -> &'static WeightTable {
        &DEFAULT_TABLE
    }

    /// Parses a table from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("weightTable", e.to_string()))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rules in table order.
    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn rule_for(&self, preference: PreferenceKey) -> Option<&ScoringRule> {
        self.rules.iter().find(|r| r.preference == preference)
    }

    /// Highest score any plan can reach under this table.
    pub fn max_score(&self) -> f64 {
        self.rules.iter().map(|r| r.weight).sum()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}
