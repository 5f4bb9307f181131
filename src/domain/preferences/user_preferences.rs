//! UserPreferences - A user's sparse quiz answers at a point in time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::catalog::HospitalCover;
use crate::domain::foundation::ValidationError;

/// What kind of answer a preference key takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    /// `true` / `false`
    Flag,
    /// One of the hospital cover levels
    HospitalLevel,
}

/// Every preference the quiz can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceKey {
    HospitalCoverLevel,
    OutpatientNeeded,
    MaternityNeeded,
    MentalHealthNeeded,
    OverseasEmergencyNeeded,
    GpVisitsNeeded,
    DentalNeeded,
    OpticalNeeded,
    PhysiotherapyNeeded,
    ConsultantChoiceNeeded,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 10] = [
        PreferenceKey::HospitalCoverLevel,
        PreferenceKey::OutpatientNeeded,
        PreferenceKey::MaternityNeeded,
        PreferenceKey::MentalHealthNeeded,
        PreferenceKey::OverseasEmergencyNeeded,
        PreferenceKey::GpVisitsNeeded,
        PreferenceKey::DentalNeeded,
        PreferenceKey::OpticalNeeded,
        PreferenceKey::PhysiotherapyNeeded,
        PreferenceKey::ConsultantChoiceNeeded,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::HospitalCoverLevel => "hospitalCoverLevel",
            PreferenceKey::OutpatientNeeded => "outpatientNeeded",
            PreferenceKey::MaternityNeeded => "maternityNeeded",
            PreferenceKey::MentalHealthNeeded => "mentalHealthNeeded",
            PreferenceKey::OverseasEmergencyNeeded => "overseasEmergencyNeeded",
            PreferenceKey::GpVisitsNeeded => "gpVisitsNeeded",
            PreferenceKey::DentalNeeded => "dentalNeeded",
            PreferenceKey::OpticalNeeded => "opticalNeeded",
            PreferenceKey::PhysiotherapyNeeded => "physiotherapyNeeded",
            PreferenceKey::ConsultantChoiceNeeded => "consultantChoiceNeeded",
        }
    }

    /// Parses a wire name, failing on unknown keys.
    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| ValidationError::unknown_field(key))
    }

    pub fn kind(&self) -> PreferenceKind {
        match self {
            PreferenceKey::HospitalCoverLevel => PreferenceKind::HospitalLevel,
            _ => PreferenceKind::Flag,
        }
    }

    /// Validates a raw JSON answer for this key. `null` means unanswered.
    pub fn parse_value(&self, raw: &Value) -> Result<Option<PreferenceValue>, ValidationError> {
        match (self.kind(), raw) {
            (_, Value::Null) => Ok(None),
            (PreferenceKind::Flag, Value::Bool(flag)) => Ok(Some(PreferenceValue::Flag(*flag))),
            (PreferenceKind::HospitalLevel, Value::String(level)) => HospitalCover::parse(level)
                .map(|level| Some(PreferenceValue::HospitalLevel(level)))
                .ok_or_else(|| {
                    ValidationError::invalid_format(
                        self.as_str(),
                        format!("'{}' is not a hospital cover level", level),
                    )
                }),
            (PreferenceKind::Flag, other) => Err(ValidationError::wrong_type(
                self.as_str(),
                "boolean",
                json_type_name(other),
            )),
            (PreferenceKind::HospitalLevel, other) => Err(ValidationError::wrong_type(
                self.as_str(),
                "hospital cover level",
                json_type_name(other),
            )),
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validated answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Flag(bool),
    HospitalLevel(HospitalCover),
}

impl PreferenceValue {
    fn kind(&self) -> PreferenceKind {
        match self {
            PreferenceValue::Flag(_) => PreferenceKind::Flag,
            PreferenceValue::HospitalLevel(_) => PreferenceKind::HospitalLevel,
        }
    }
}

/// Sparse mapping of answered preferences. Absent keys are unanswered.
///
/// Never refers to a plan. Deserialization validates every key and value
/// and rejects the whole object on the first malformed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Map<String, Value>",
    into = "BTreeMap<PreferenceKey, PreferenceValue>"
)]
pub struct UserPreferences {
    answers: BTreeMap<PreferenceKey, PreferenceValue>,
}

impl UserPreferences {
    /// No answers yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a JSON object of answers.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Self::try_from(map.clone()),
            other => Err(ValidationError::wrong_type(
                "preferences",
                "object",
                json_type_name(other),
            )),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: PreferenceKey, value: PreferenceValue) -> Result<Self, ValidationError> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Records an answer, rejecting values of the wrong kind.
    pub fn set(&mut self, key: PreferenceKey, value: PreferenceValue) -> Result<(), ValidationError> {
        if key.kind() != value.kind() {
            let expected = match key.kind() {
                PreferenceKind::Flag => "boolean",
                PreferenceKind::HospitalLevel => "hospital cover level",
            };
            let actual = match value.kind() {
                PreferenceKind::Flag => "boolean",
                PreferenceKind::HospitalLevel => "hospital cover level",
            };
            return Err(ValidationError::wrong_type(key.as_str(), expected, actual));
        }
        self.answers.insert(key, value);
        Ok(())
    }

    /// Forgets an answer.
    pub fn clear(&mut self, key: PreferenceKey) -> Option<PreferenceValue> {
        self.answers.remove(&key)
    }

    pub fn get(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        self.answers.get(&key).copied()
    }

    /// The answer to a yes/no preference, if given.
    pub fn flag(&self, key: PreferenceKey) -> Option<bool> {
        match self.get(key) {
            Some(PreferenceValue::Flag(flag)) => Some(flag),
            _ => None,
        }
    }

    /// The requested minimum hospital level, if given.
    pub fn hospital_level(&self) -> Option<HospitalCover> {
        match self.get(PreferenceKey::HospitalCoverLevel) {
            Some(PreferenceValue::HospitalLevel(level)) => Some(level),
            _ => None,
        }
    }

    pub fn is_answered(&self, key: PreferenceKey) -> bool {
        self.answers.contains_key(&key)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answered pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PreferenceKey, PreferenceValue)> + '_ {
        self.answers.iter().map(|(k, v)| (*k, *v))
    }
}

impl TryFrom<Map<String, Value>> for UserPreferences {
    type Error = ValidationError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut answers = BTreeMap::new();
        for (raw_key, raw_value) in &map {
            let key = PreferenceKey::parse(raw_key)?;
            if let Some(value) = key.parse_value(raw_value)? {
                answers.insert(key, value);
            }
        }
        Ok(Self { answers })
    }
}

impl From<UserPreferences> for BTreeMap<PreferenceKey, PreferenceValue> {
    fn from(prefs: UserPreferences) -> Self {
        prefs.answers
    }
}
