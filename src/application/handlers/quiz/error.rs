//! Errors shared by the quiz handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, QuizSessionId};
use crate::ports::{CatalogError, QuestionStoreError, QuizSessionError};

/// Errors that can occur while running a quiz.
#[derive(Debug, Error)]
pub enum QuizHandlerError {
    /// No stored quiz has this id.
    #[error("Quiz session not found: {0}")]
    SessionNotFound(QuizSessionId),

    /// The quiz rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Question store error: {0}")]
    Questions(#[from] QuestionStoreError),

    #[error("Quiz session store error: {0}")]
    Sessions(#[from] QuizSessionError),
}

impl QuizHandlerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuizHandlerError::SessionNotFound(_) => ErrorCode::QuizSessionNotFound,
            QuizHandlerError::Domain(err) => err.code,
            QuizHandlerError::Catalog(_) => ErrorCode::CatalogUnavailable,
            QuizHandlerError::Questions(QuestionStoreError::NotFound(_)) => ErrorCode::QuestionNotFound,
            QuizHandlerError::Questions(_) => ErrorCode::StorageError,
            QuizHandlerError::Sessions(QuizSessionError::NotFound(_)) => ErrorCode::QuizSessionNotFound,
            QuizHandlerError::Sessions(_) => ErrorCode::StorageError,
        }
    }
}

impl From<QuizHandlerError> for DomainError {
    fn from(err: QuizHandlerError) -> Self {
        match err {
            QuizHandlerError::Domain(inner) => inner,
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
