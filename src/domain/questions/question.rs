//! Quiz questions and per-answer statistics.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::HospitalCover;
use crate::domain::foundation::ValidationError;
use crate::domain::preferences::{PreferenceKey, PreferenceKind, PreferenceValue};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Yes/no.
    Boolean,
    /// One of an ordered set of levels.
    SingleChoice,
}

impl From<PreferenceKind> for QuestionType {
    fn from(kind: PreferenceKind) -> Self {
        match kind {
            PreferenceKind::Flag => QuestionType::Boolean,
            PreferenceKind::HospitalLevel => QuestionType::SingleChoice,
        }
    }
}

/// One possible answer to a question, with its wire label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: String,
    pub value: PreferenceValue,
}

impl AnswerOption {
    /// Every answer a question keyed by `key` can take.
    ///
    /// Boolean questions enumerate `YES` and `NO`; the hospital question
    /// enumerates each cover level by its wire name.
    pub fn all_for(key: PreferenceKey) -> Vec<AnswerOption> {
        match key.kind() {
            PreferenceKind::Flag => vec![
                AnswerOption {
                    label: "YES".to_string(),
                    value: PreferenceValue::Flag(true),
                },
                AnswerOption {
                    label: "NO".to_string(),
                    value: PreferenceValue::Flag(false),
                },
            ],
            PreferenceKind::HospitalLevel => HospitalCover::ALL
                .iter()
                .map(|level| AnswerOption {
                    label: level.as_str().to_string(),
                    value: PreferenceValue::HospitalLevel(*level),
                })
                .collect(),
        }
    }
}

/// Statistics for one answer to one question over a plan population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswerStat {
    pub question_key: PreferenceKey,
    pub answer_value: String,
    pub matching_count: usize,
    pub non_matching_count: usize,
    /// Fraction in [0, 1].
    pub discriminative_power: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    question_key: PreferenceKey,
    question_text: String,
    question_type: Option<QuestionType>,
    #[serde(default)]
    discriminative_power: f64,
    #[serde(default)]
    total_responses: u64,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<QuestionRecord> for Question {
    type Error = ValidationError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let mut question = Question::new(record.question_key, record.question_text)?;
        if let Some(declared) = record.question_type {
            if declared != question.question_type {
                return Err(ValidationError::invalid_format(
                    "questionType",
                    format!(
                        "{} is answered as {:?}, not {:?}",
                        record.question_key, question.question_type, declared
                    ),
                ));
            }
        }
        if !(0.0..=1.0).contains(&record.discriminative_power) {
            return Err(ValidationError::invalid_format(
                "discriminativePower",
                format!("{} is not a fraction in [0, 1]", record.discriminative_power),
            ));
        }
        question.discriminative_power = record.discriminative_power;
        question.total_responses = record.total_responses;
        question.is_active = record.is_active;
        Ok(question)
    }
}

/// A quiz question that fills in one preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestionRecord")]
pub struct Question {
    question_key: PreferenceKey,
    question_text: String,
    question_type: QuestionType,
    discriminative_power: f64,
    total_responses: u64,
    is_active: bool,
}

impl Question {
    /// Creates an active question with no recorded power or responses.
    pub fn new(key: PreferenceKey, text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("questionText"));
        }
        Ok(Self {
            question_key: key,
            question_text: text,
            question_type: key.kind().into(),
            discriminative_power: 0.0,
            total_responses: 0,
            is_active: true,
        })
    }

    pub fn question_key(&self) -> PreferenceKey {
        self.question_key
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Fraction in [0, 1].
    pub fn discriminative_power(&self) -> f64 {
        self.discriminative_power
    }

    /// Power scaled to 0-100 for display.
    pub fn as_percent(&self) -> f64 {
        self.discriminative_power * 100.0
    }

    pub fn total_responses(&self) -> u64 {
        self.total_responses
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn record_response(&mut self) {
        self.total_responses = self.total_responses.saturating_add(1);
    }

    /// Recomputes power as the mean of this question's answer statistics.
    ///
    /// Stats for other questions are ignored. With no matching stats the
    /// power drops to 0.
    pub fn refresh_power(&mut self, stats: &[QuestionAnswerStat]) {
        let powers: Vec<f64> = stats
            .iter()
            .filter(|s| s.question_key == self.question_key)
            .map(|s| s.discriminative_power)
            .collect();
        self.discriminative_power = if powers.is_empty() {
            0.0
        } else {
            (powers.iter().sum::<f64>() / powers.len() as f64).clamp(0.0, 1.0)
        };
    }
}
