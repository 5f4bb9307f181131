//! In-Memory Question Store Adapter
//!
//! Holds the question bank, answer statistics, and telemetry in memory.
//! Seedable from YAML; ships with a built-in bank.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::preferences::PreferenceKey;
use crate::domain::questions::{Question, QuestionAnswerStat, QuestionTelemetry};
use crate::ports::{QuestionStore, QuestionStoreError};

const STANDARD_QUESTION_BANK: &str = include_str!("question_bank.yaml");

/// In-memory question bank with statistics
#[derive(Debug, Clone)]
pub struct InMemoryQuestionStore {
    questions: Arc<RwLock<BTreeMap<PreferenceKey, Question>>>,
    stats: Arc<RwLock<HashMap<PreferenceKey, Vec<QuestionAnswerStat>>>>,
    telemetry: Arc<RwLock<HashMap<PreferenceKey, QuestionTelemetry>>>,
}

impl InMemoryQuestionStore {
    /// Create a store seeded with the given questions; later keys win
    pub fn new(questions: Vec<Question>) -> Self {
        let questions = questions
            .into_iter()
            .map(|q| (q.question_key(), q))
            .collect();
        Self {
            questions: Arc::new(RwLock::new(questions)),
            stats: Arc::new(RwLock::new(HashMap::new())),
            telemetry: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store from a YAML sequence of questions
    pub fn from_yaml(yaml: &str) -> Result<Self, QuestionStoreError> {
        let questions: Vec<Question> =
            serde_yaml::from_str(yaml).map_err(|e| QuestionStoreError::Load(e.to_string()))?;
        Ok(Self::new(questions))
    }

    /// Create a store with the built-in question bank
    pub fn standard() -> Result<Self, QuestionStoreError> {
        Self::from_yaml(STANDARD_QUESTION_BANK)
    }

    /// Number of questions in the bank
    pub async fn question_count(&self) -> usize {
        self.questions.read().await.len()
    }
}

impl Default for InMemoryQuestionStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn list_questions(&self) -> Result<Vec<Question>, QuestionStoreError> {
        Ok(self.questions.read().await.values().cloned().collect())
    }

    async fn get_question(&self, key: PreferenceKey) -> Result<Question, QuestionStoreError> {
        self.questions
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(QuestionStoreError::NotFound(key))
    }

    async fn save_answer_stats(&self, stats: &[QuestionAnswerStat]) -> Result<(), QuestionStoreError> {
        let mut grouped: HashMap<PreferenceKey, Vec<QuestionAnswerStat>> = HashMap::new();
        for stat in stats {
            grouped.entry(stat.question_key).or_default().push(stat.clone());
        }

        let mut questions = self.questions.write().await;
        let mut stored = self.stats.write().await;
        for (key, key_stats) in grouped {
            if let Some(question) = questions.get_mut(&key) {
                question.refresh_power(&key_stats);
            }
            stored.insert(key, key_stats);
        }
        Ok(())
    }

    async fn answer_stats(&self, key: PreferenceKey) -> Result<Vec<QuestionAnswerStat>, QuestionStoreError> {
        Ok(self.stats.read().await.get(&key).cloned().unwrap_or_default())
    }

    async fn record_impression(&self, key: PreferenceKey) -> Result<(), QuestionStoreError> {
        if !self.questions.read().await.contains_key(&key) {
            return Err(QuestionStoreError::NotFound(key));
        }
        let mut telemetry = self.telemetry.write().await;
        let entry = telemetry
            .entry(key)
            .or_insert_with(|| QuestionTelemetry::new(key));
        entry.impressions = entry.impressions.saturating_add(1);
        Ok(())
    }

    async fn record_response(&self, key: PreferenceKey) -> Result<(), QuestionStoreError> {
        self.questions
            .write()
            .await
            .get_mut(&key)
            .ok_or(QuestionStoreError::NotFound(key))?
            .record_response();

        let mut telemetry = self.telemetry.write().await;
        let entry = telemetry
            .entry(key)
            .or_insert_with(|| QuestionTelemetry::new(key));
        entry.responses = entry.responses.saturating_add(1);
        Ok(())
    }

    async fn telemetry(&self) -> Result<HashMap<PreferenceKey, QuestionTelemetry>, QuestionStoreError> {
        Ok(self.telemetry.read().await.clone())
    }
}
