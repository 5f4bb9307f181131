//! Plan - A catalog entry for one insurer's product.
//!
//! Benefit fields are tri-state: `Some(true)` (included), `Some(false)`
//! (explicitly excluded) or `None` (unknown). Unknown is never read as
//! excluded anywhere in the domain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::completeness::{CompletenessCalculator, KEY_FIELDS};
use crate::domain::foundation::{PlanId, ValidationError};

/// Health insurers on the Irish market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Insurer {
    Vhi,
    Laya,
    IrishLife,
    Level,
}

impl fmt::Display for Insurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Insurer::Vhi => "VHI",
            Insurer::Laya => "Laya Healthcare",
            Insurer::IrishLife => "Irish Life Health",
            Insurer::Level => "Level Health",
        };
        write!(f, "{}", s)
    }
}

/// Market positioning of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanTier {
    Basic,
    Mid,
    High,
    Premium,
}

/// Hospital accommodation level, ordered from least to most cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HospitalCover {
    Public,
    SemiPrivate,
    Private,
    HiTech,
}

impl HospitalCover {
    /// All levels in ascending order.
    pub const ALL: [HospitalCover; 4] = [
        HospitalCover::Public,
        HospitalCover::SemiPrivate,
        HospitalCover::Private,
        HospitalCover::HiTech,
    ];

    /// Wire name, as used in JSON and answer values.
    pub fn as_str(&self) -> &'static str {
        match self {
            HospitalCover::Public => "PUBLIC",
            HospitalCover::SemiPrivate => "SEMI_PRIVATE",
            HospitalCover::Private => "PRIVATE",
            HospitalCover::HiTech => "HI_TECH",
        }
    }

    /// Parses a wire name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    /// Number of levels `self` sits below `wanted` (0 when it meets it).
    pub fn levels_below(&self, wanted: HospitalCover) -> usize {
        (wanted as usize).saturating_sub(*self as usize)
    }
}

/// The benefit attributes of a plan that preferences can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BenefitField {
    HospitalCover,
    OutpatientCover,
    GpVisits,
    MaternityCover,
    MentalHealthCover,
    OverseasEmergency,
    DentalCover,
    OpticalCover,
    Physiotherapy,
    ConsultantChoice,
}

impl BenefitField {
    pub const ALL: [BenefitField; 10] = [
        BenefitField::HospitalCover,
        BenefitField::OutpatientCover,
        BenefitField::GpVisits,
        BenefitField::MaternityCover,
        BenefitField::MentalHealthCover,
        BenefitField::OverseasEmergency,
        BenefitField::DentalCover,
        BenefitField::OpticalCover,
        BenefitField::Physiotherapy,
        BenefitField::ConsultantChoice,
    ];

    /// Human-readable label used in explanations and verification flags.
    pub fn label(&self) -> &'static str {
        match self {
            BenefitField::HospitalCover => "Hospital cover",
            BenefitField::OutpatientCover => "Outpatient cover",
            BenefitField::GpVisits => "GP visits",
            BenefitField::MaternityCover => "Maternity cover",
            BenefitField::MentalHealthCover => "Mental health cover",
            BenefitField::OverseasEmergency => "Overseas emergency cover",
            BenefitField::DentalCover => "Dental cover",
            BenefitField::OpticalCover => "Optical cover",
            BenefitField::Physiotherapy => "Physiotherapy",
            BenefitField::ConsultantChoice => "Consultant choice",
        }
    }
}

/// The value a plan holds for one benefit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitValue {
    Unknown,
    Flag(bool),
    Hospital(HospitalCover),
}

impl BenefitValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, BenefitValue::Unknown)
    }
}

impl From<Option<bool>> for BenefitValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(BenefitValue::Unknown, BenefitValue::Flag)
    }
}

impl From<Option<HospitalCover>> for BenefitValue {
    fn from(value: Option<HospitalCover>) -> Self {
        value.map_or(BenefitValue::Unknown, BenefitValue::Hospital)
    }
}

/// Tri-state benefit attributes. Absent and `null` both deserialize as unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefits {
    #[serde(default)]
    pub hospital_cover: Option<HospitalCover>,
    #[serde(default)]
    pub outpatient_cover: Option<bool>,
    #[serde(default)]
    pub gp_visits: Option<bool>,
    #[serde(default)]
    pub maternity_cover: Option<bool>,
    #[serde(default)]
    pub mental_health_cover: Option<bool>,
    #[serde(default)]
    pub overseas_emergency: Option<bool>,
    #[serde(default)]
    pub dental_cover: Option<bool>,
    #[serde(default)]
    pub optical_cover: Option<bool>,
    #[serde(default)]
    pub physiotherapy: Option<bool>,
    #[serde(default)]
    pub consultant_choice: Option<bool>,
}

impl Benefits {
    /// Reads one benefit field.
    pub fn get(&self, field: BenefitField) -> BenefitValue {
        match self.flag_slot(field) {
            Some(flag) => (*flag).into(),
            None => self.hospital_cover.into(),
        }
    }

    /// Writes one benefit field, rejecting values of the wrong kind.
    pub fn set(&mut self, field: BenefitField, value: BenefitValue) -> Result<(), ValidationError> {
        match value {
            BenefitValue::Hospital(level) => {
                if field != BenefitField::HospitalCover {
                    return Err(ValidationError::wrong_type(
                        field.label(),
                        "boolean",
                        "hospital cover level",
                    ));
                }
                self.hospital_cover = Some(level);
            }
            BenefitValue::Flag(flag) => match self.flag_slot_mut(field) {
                Some(slot) => *slot = Some(flag),
                None => {
                    return Err(ValidationError::wrong_type(
                        field.label(),
                        "hospital cover level",
                        "boolean",
                    ));
                }
            },
            BenefitValue::Unknown => match self.flag_slot_mut(field) {
                Some(slot) => *slot = None,
                None => self.hospital_cover = None,
            },
        }
        Ok(())
    }

    /// Boolean storage for a field; `None` for hospital cover.
    fn flag_slot(&self, field: BenefitField) -> Option<&Option<bool>> {
        match field {
            BenefitField::HospitalCover => None,
            BenefitField::OutpatientCover => Some(&self.outpatient_cover),
            BenefitField::GpVisits => Some(&self.gp_visits),
            BenefitField::MaternityCover => Some(&self.maternity_cover),
            BenefitField::MentalHealthCover => Some(&self.mental_health_cover),
            BenefitField::OverseasEmergency => Some(&self.overseas_emergency),
            BenefitField::DentalCover => Some(&self.dental_cover),
            BenefitField::OpticalCover => Some(&self.optical_cover),
            BenefitField::Physiotherapy => Some(&self.physiotherapy),
            BenefitField::ConsultantChoice => Some(&self.consultant_choice),
        }
    }

    fn flag_slot_mut(&mut self, field: BenefitField) -> Option<&mut Option<bool>> {
        match field {
            BenefitField::HospitalCover => None,
            BenefitField::OutpatientCover => Some(&mut self.outpatient_cover),
            BenefitField::GpVisits => Some(&mut self.gp_visits),
            BenefitField::MaternityCover => Some(&mut self.maternity_cover),
            BenefitField::MentalHealthCover => Some(&mut self.mental_health_cover),
            BenefitField::OverseasEmergency => Some(&mut self.overseas_emergency),
            BenefitField::DentalCover => Some(&mut self.dental_cover),
            BenefitField::OpticalCover => Some(&mut self.optical_cover),
            BenefitField::Physiotherapy => Some(&mut self.physiotherapy),
            BenefitField::ConsultantChoice => Some(&mut self.consultant_choice),
        }
    }
}

/// Raw plan shape as it arrives on the wire, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanRecord {
    #[serde(default)]
    plan_id: Option<String>,
    insurer: Insurer,
    #[serde(default)]
    plan_name: Option<String>,
    plan_tier: PlanTier,
    #[serde(flatten)]
    benefits: Benefits,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    last_verified: Option<NaiveDate>,
}

impl TryFrom<PlanRecord> for Plan {
    type Error = ValidationError;

    fn try_from(record: PlanRecord) -> Result<Self, Self::Error> {
        let plan_id = PlanId::new(record.plan_id.unwrap_or_default())?;
        let plan_name = record.plan_name.unwrap_or_default();
        if plan_name.trim().is_empty() {
            return Err(ValidationError::empty_field("planName"));
        }
        let mut plan = Plan {
            plan_id,
            insurer: record.insurer,
            plan_name,
            plan_tier: record.plan_tier,
            benefits: record.benefits,
            source_url: record.source_url,
            last_verified: record.last_verified,
            null_key_count: 0,
            completeness_score: 0.0,
        };
        plan.recompute_completeness();
        Ok(plan)
    }
}

/// One insurer's product with derived data-quality fields.
///
/// `null_key_count` and `completeness_score` are derived from the benefit
/// fields and recomputed on every construction and mutation. Values for them
/// in incoming JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PlanRecord")]
pub struct Plan {
    plan_id: PlanId,
    insurer: Insurer,
    plan_name: String,
    plan_tier: PlanTier,
    #[serde(flatten)]
    benefits: Benefits,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_verified: Option<NaiveDate>,
    null_key_count: usize,
    completeness_score: f64,
}

impl Plan {
    /// Creates a builder for constructing a plan.
    pub fn builder(
        plan_id: impl Into<String>,
        insurer: Insurer,
        plan_name: impl Into<String>,
        plan_tier: PlanTier,
    ) -> PlanBuilder {
        PlanBuilder {
            plan_id: plan_id.into(),
            insurer,
            plan_name: plan_name.into(),
            plan_tier,
            benefits: Benefits::default(),
            source_url: None,
            last_verified: None,
        }
    }

    pub fn plan_id(&self) -> &PlanId {
        &self.plan_id
    }

    pub fn insurer(&self) -> Insurer {
        self.insurer
    }

    pub fn plan_name(&self) -> &str {
        &self.plan_name
    }

    pub fn plan_tier(&self) -> PlanTier {
        self.plan_tier
    }

    pub fn benefits(&self) -> &Benefits {
        &self.benefits
    }

    /// Reads one benefit field.
    pub fn benefit(&self, field: BenefitField) -> BenefitValue {
        self.benefits.get(field)
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn last_verified(&self) -> Option<NaiveDate> {
        self.last_verified
    }

    /// Number of unknown key fields.
    pub fn null_key_count(&self) -> usize {
        self.null_key_count
    }

    /// Fraction of key fields that are known, in [0, 1].
    pub fn completeness_score(&self) -> f64 {
        self.completeness_score
    }

    /// Updates one benefit field and refreshes the derived completeness.
    pub fn set_benefit(
        &mut self,
        field: BenefitField,
        value: BenefitValue,
    ) -> Result<(), ValidationError> {
        self.benefits.set(field, value)?;
        self.recompute_completeness();
        Ok(())
    }

    fn recompute_completeness(&mut self) {
        let completeness = CompletenessCalculator::calculate(&self.benefits, KEY_FIELDS);
        self.null_key_count = completeness.null_key_count;
        self.completeness_score = completeness.completeness_score;
    }
}

/// Builder for [`Plan`].
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    plan_id: String,
    insurer: Insurer,
    plan_name: String,
    plan_tier: PlanTier,
    benefits: Benefits,
    source_url: Option<String>,
    last_verified: Option<NaiveDate>,
}

impl PlanBuilder {
    /// Sets the hospital cover level.
    pub fn hospital(mut self, level: HospitalCover) -> Self {
        self.benefits.hospital_cover = Some(level);
        self
    }

    /// Sets a boolean benefit. Hospital cover is ignored here; use [`Self::hospital`].
    pub fn flag(mut self, field: BenefitField, included: bool) -> Self {
        if let Some(slot) = self.benefits.flag_slot_mut(field) {
            *slot = Some(included);
        }
        self
    }

    /// Sets every boolean benefit at once.
    pub fn all_flags(mut self, included: bool) -> Self {
        for field in BenefitField::ALL {
            if let Some(slot) = self.benefits.flag_slot_mut(field) {
                *slot = Some(included);
            }
        }
        self
    }

    /// Marks a field as unknown.
    pub fn unknown(mut self, field: BenefitField) -> Self {
        // Unknown is always a legal value for every field.
        let _ = self.benefits.set(field, BenefitValue::Unknown);
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn last_verified(mut self, date: NaiveDate) -> Self {
        self.last_verified = Some(date);
        self
    }

    /// Validates identity fields and derives completeness.
    pub fn build(self) -> Result<Plan, ValidationError> {
        Plan::try_from(PlanRecord {
            plan_id: Some(self.plan_id),
            insurer: self.insurer,
            plan_name: Some(self.plan_name),
            plan_tier: self.plan_tier,
            benefits: self.benefits,
            source_url: self.source_url,
            last_verified: self.last_verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic_plan() -> Plan {
        Plan::builder("vhi-1", Insurer::Vhi, "Health Plus", PlanTier::Mid)
            .hospital(HospitalCover::SemiPrivate)
            .flag(BenefitField::MaternityCover, true)
            .flag(BenefitField::DentalCover, false)
            .build()
            .unwrap()
    }

    #[test]
    fn hospital_levels_are_ordered() {
        assert!(HospitalCover::Public < HospitalCover::SemiPrivate);
        assert!(HospitalCover::Private < HospitalCover::HiTech);
        assert_eq!(HospitalCover::Public.levels_below(HospitalCover::Private), 2);
        assert_eq!(HospitalCover::HiTech.levels_below(HospitalCover::Private), 0);
    }

    #[test]
    fn hospital_cover_parses_wire_names() {
        assert_eq!(HospitalCover::parse("SEMI_PRIVATE"), Some(HospitalCover::SemiPrivate));
        assert_eq!(HospitalCover::parse("semi_private"), None);
    }

    #[test]
    fn benefit_distinguishes_false_from_unknown() {
        let plan = basic_plan();
        assert_eq!(plan.benefit(BenefitField::MaternityCover), BenefitValue::Flag(true));
        assert_eq!(plan.benefit(BenefitField::DentalCover), BenefitValue::Flag(false));
        assert_eq!(plan.benefit(BenefitField::OpticalCover), BenefitValue::Unknown);
    }

    #[test]
    fn builder_derives_completeness() {
        let plan = basic_plan();
        // hospital, maternity, dental known; seven unknown
        assert_eq!(plan.null_key_count(), 7);
        assert!((plan.completeness_score() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn builder_rejects_empty_name() {
        let result = Plan::builder("vhi-1", Insurer::Vhi, " ", PlanTier::Basic).build();
        assert_eq!(result, Err(ValidationError::empty_field("planName")));
    }

    #[test]
    fn set_benefit_recomputes_completeness() {
        let mut plan = basic_plan();
        plan.set_benefit(BenefitField::OpticalCover, BenefitValue::Flag(true))
            .unwrap();
        assert_eq!(plan.null_key_count(), 6);

        plan.set_benefit(BenefitField::MaternityCover, BenefitValue::Unknown)
            .unwrap();
        assert_eq!(plan.null_key_count(), 7);
    }

    #[test]
    fn set_benefit_rejects_wrong_kind() {
        let mut plan = basic_plan();
        assert!(plan
            .set_benefit(BenefitField::HospitalCover, BenefitValue::Flag(true))
            .is_err());
        assert!(plan
            .set_benefit(
                BenefitField::DentalCover,
                BenefitValue::Hospital(HospitalCover::Private)
            )
            .is_err());
        // Failed writes leave the plan untouched
        assert_eq!(plan, basic_plan());
    }

    #[test]
    fn deserializes_null_and_absent_as_unknown() {
        let plan: Plan = serde_json::from_value(json!({
            "planId": "laya-1",
            "insurer": "LAYA",
            "planName": "Simply Connect",
            "planTier": "BASIC",
            "hospitalCover": null,
            "maternityCover": false
        }))
        .unwrap();

        assert_eq!(plan.benefit(BenefitField::HospitalCover), BenefitValue::Unknown);
        assert_eq!(plan.benefit(BenefitField::GpVisits), BenefitValue::Unknown);
        assert_eq!(plan.benefit(BenefitField::MaternityCover), BenefitValue::Flag(false));
        assert_eq!(plan.null_key_count(), 9);
    }

    #[test]
    fn deserialization_ignores_supplied_completeness() {
        let plan: Plan = serde_json::from_value(json!({
            "planId": "laya-1",
            "insurer": "LAYA",
            "planName": "Simply Connect",
            "planTier": "BASIC",
            "nullKeyCount": 0,
            "completenessScore": 1.0
        }))
        .unwrap();

        assert_eq!(plan.null_key_count(), 10);
        assert_eq!(plan.completeness_score(), 0.0);
    }

    #[test]
    fn deserialization_rejects_missing_identity() {
        let result: Result<Plan, _> = serde_json::from_value(json!({
            "insurer": "VHI",
            "planName": "No Id",
            "planTier": "HIGH"
        }));
        assert!(result.is_err());

        let result: Result<Plan, _> = serde_json::from_value(json!({
            "planId": "x",
            "insurer": "NOT_AN_INSURER",
            "planName": "Bad",
            "planTier": "HIGH"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_derived_fields_in_camel_case() {
        let value = serde_json::to_value(basic_plan()).unwrap();
        assert_eq!(value["planId"], "vhi-1");
        assert_eq!(value["hospitalCover"], "SEMI_PRIVATE");
        assert_eq!(value["opticalCover"], serde_json::Value::Null);
        assert_eq!(value["nullKeyCount"], 7);
    }

    #[test]
    fn serialized_plan_reads_back_identically() {
        let plan = Plan::builder("irish-life-4", Insurer::IrishLife, "4D Health 1", PlanTier::High)
            .hospital(HospitalCover::HiTech)
            .all_flags(true)
            .source_url("https://example.ie/4d")
            .last_verified(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .build()
            .unwrap();

        let json = serde_json::to_string(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
        assert_eq!(back.completeness_score(), 1.0);
    }
}
