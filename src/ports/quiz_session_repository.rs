//! Quiz Session Repository Port - Persistence for in-flight quizzes.
//!
//! The repository is the serialization point for a session: the domain
//! does not guard against two concurrent answers to the same quiz.

use async_trait::async_trait;

use crate::domain::foundation::QuizSessionId;
use crate::domain::questions::QuizSession;

/// Errors that can occur during quiz session persistence
#[derive(Debug, thiserror::Error)]
pub enum QuizSessionError {
    #[error("Quiz session not found: {0}")]
    NotFound(QuizSessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for saving and loading quiz sessions
#[async_trait]
pub trait QuizSessionRepository: Send + Sync {
    /// Insert or replace a session
    async fn save(&self, session: &QuizSession) -> Result<(), QuizSessionError>;

    /// Load a session, `None` if it does not exist
    async fn find_by_id(&self, id: QuizSessionId) -> Result<Option<QuizSession>, QuizSessionError>;
}
