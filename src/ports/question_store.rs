//! Question Store Port - Question bank, answer statistics, and telemetry.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::preferences::PreferenceKey;
use crate::domain::questions::{Question, QuestionAnswerStat, QuestionTelemetry};

/// Errors that can occur during question store operations
#[derive(Debug, thiserror::Error)]
pub enum QuestionStoreError {
    #[error("Question not found: {0}")]
    NotFound(PreferenceKey),

    #[error("Failed to load question bank: {0}")]
    Load(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for the question bank and its statistics
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions, active or not
    async fn list_questions(&self) -> Result<Vec<Question>, QuestionStoreError>;

    /// One question by key
    ///
    /// # Errors
    /// Returns `QuestionStoreError::NotFound` for an unknown key
    async fn get_question(&self, key: PreferenceKey) -> Result<Question, QuestionStoreError>;

    /// Replace the stored answer statistics of every question present in
    /// `stats` and recompute those questions' power from them
    async fn save_answer_stats(&self, stats: &[QuestionAnswerStat]) -> Result<(), QuestionStoreError>;

    /// Stored answer statistics for one question
    async fn answer_stats(&self, key: PreferenceKey) -> Result<Vec<QuestionAnswerStat>, QuestionStoreError>;

    /// Count one serving of a question
    async fn record_impression(&self, key: PreferenceKey) -> Result<(), QuestionStoreError>;

    /// Count one answer to a question
    async fn record_response(&self, key: PreferenceKey) -> Result<(), QuestionStoreError>;

    /// Serving and answer counts per question
    async fn telemetry(&self) -> Result<HashMap<PreferenceKey, QuestionTelemetry>, QuestionStoreError>;
}
