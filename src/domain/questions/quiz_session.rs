//! QuizSession aggregate - One user's pass through the question pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::adaptive_ranker::{by_stored_power, AdaptiveQuestionRanker, NextQuestion, RankingContext};
use super::question::Question;
use crate::domain::foundation::{DomainError, ErrorCode, QuizSessionId, QuizStatus, StateMachine};
use crate::domain::preferences::{PreferenceKey, UserPreferences};

/// Quiz state: the questions left, the ones asked, and the answers so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    id: QuizSessionId,
    status: QuizStatus,
    pool: Vec<Question>,
    asked: Vec<PreferenceKey>,
    preferences: UserPreferences,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: QuizSessionId::new(),
            status: QuizStatus::NotStarted,
            pool: Vec::new(),
            asked: Vec::new(),
            preferences: UserPreferences::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn id(&self) -> QuizSessionId {
        self.id
    }

    pub fn status(&self) -> QuizStatus {
        self.status
    }

    /// Questions not yet asked, highest stored power first.
    pub fn remaining(&self) -> &[Question] {
        &self.pool
    }

    pub fn asked(&self) -> &[PreferenceKey] {
        &self.asked
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Loads the pool with the active questions and opens the quiz.
    ///
    /// A pool with nothing to ask completes immediately.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), DomainError> {
        self.transition(QuizStatus::InProgress)?;

        let mut pool: Vec<Question> = questions.into_iter().filter(|q| q.is_active()).collect();
        pool.sort_by(by_stored_power);
        let mut seen = HashSet::new();
        pool.retain(|q| seen.insert(q.question_key()));
        self.pool = pool;

        if self.pool.is_empty() {
            self.complete()?;
        }
        Ok(())
    }

    /// Validates and stores an answer, then drops the question from the pool.
    ///
    /// A `null` answer skips the question without recording a preference.
    /// The quiz completes when the pool empties.
    pub fn record_answer(&mut self, key: PreferenceKey, raw: &Value) -> Result<(), DomainError> {
        if !self.status.accepts_answers() {
            let code = match self.status {
                QuizStatus::Complete => ErrorCode::QuizComplete,
                _ => ErrorCode::InvalidStateTransition,
            };
            return Err(DomainError::new(code, format!("Quiz is {}", self.status))
                .with_detail("quizSessionId", self.id.to_string()));
        }
        if self.asked.contains(&key) {
            return Err(DomainError::new(
                ErrorCode::QuestionAlreadyAnswered,
                format!("Question '{}' was already answered", key),
            ));
        }
        let Some(position) = self.pool.iter().position(|q| q.question_key() == key) else {
            return Err(DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("Question '{}' is not in this quiz", key),
            ));
        };

        match key.parse_value(raw)? {
            Some(value) => self.preferences.set(key, value)?,
            None => {
                self.preferences.clear(key);
            }
        }

        self.pool.remove(position);
        self.asked.push(key);

        if self.pool.is_empty() {
            self.complete()?;
        }
        Ok(())
    }

    /// Ends the quiz early, e.g. when an external stopping rule fires.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition(QuizStatus::Complete)?;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// The question to ask next, or `None` once the quiz is not in progress.
    pub fn next_question(
        &self,
        ranker: &AdaptiveQuestionRanker,
        context: &RankingContext<'_>,
    ) -> Option<NextQuestion> {
        if !self.status.accepts_answers() {
            return None;
        }
        ranker.next_question(&self.pool, &self.asked, context)
    }

    fn transition(&mut self, target: QuizStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|err| {
            DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
        })?;
        Ok(())
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
