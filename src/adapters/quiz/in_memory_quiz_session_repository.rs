//! In-Memory Quiz Session Repository
//!
//! Stores quiz sessions in memory. Useful for testing and single-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::QuizSessionId;
use crate::domain::questions::QuizSession;
use crate::ports::{QuizSessionError, QuizSessionRepository};

/// In-memory storage for quiz sessions
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuizSessionRepository {
    sessions: Arc<RwLock<HashMap<QuizSessionId, QuizSession>>>,
}

impl InMemoryQuizSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl QuizSessionRepository for InMemoryQuizSessionRepository {
    async fn save(&self, session: &QuizSession) -> Result<(), QuizSessionError> {
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: QuizSessionId) -> Result<Option<QuizSession>, QuizSessionError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }
}
