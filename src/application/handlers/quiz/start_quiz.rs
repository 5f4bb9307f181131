//! StartQuizHandler - Opens a quiz over the active question bank.

use std::sync::Arc;

use tracing::info;

use super::{QuizHandlerConfig, QuizHandlerError};
use crate::domain::catalog::Plan;
use crate::domain::foundation::{QuizSessionId, QuizStatus};
use crate::domain::questions::{NextQuestion, QuizSession};
use crate::domain::recommendation::WeightTable;
use crate::ports::{PlanCatalogReader, QuestionStore, QuizSessionRepository};

/// Result of starting a quiz.
#[derive(Debug, Clone)]
pub struct StartQuizResult {
    pub session_id: QuizSessionId,
    pub status: QuizStatus,
    /// `None` when the bank has nothing active to ask.
    pub next_question: Option<NextQuestion>,
}

/// Handler for starting quizzes.
pub struct StartQuizHandler {
    questions: Arc<dyn QuestionStore>,
    sessions: Arc<dyn QuizSessionRepository>,
    catalog: Arc<dyn PlanCatalogReader>,
    weights: Arc<WeightTable>,
    config: QuizHandlerConfig,
}

impl StartQuizHandler {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        sessions: Arc<dyn QuizSessionRepository>,
        catalog: Arc<dyn PlanCatalogReader>,
        weights: Arc<WeightTable>,
        config: QuizHandlerConfig,
    ) -> Self {
        Self {
            questions,
            sessions,
            catalog,
            weights,
            config,
        }
    }

    pub async fn handle(&self) -> Result<StartQuizResult, QuizHandlerError> {
        let (bank, catalog, telemetry) = futures::try_join!(
            async { self.questions.list_questions().await.map_err(QuizHandlerError::from) },
            async { self.catalog.load_catalog().await.map_err(QuizHandlerError::from) },
            async { self.questions.telemetry().await.map_err(QuizHandlerError::from) },
        )?;

        let mut session = QuizSession::new();
        session.start(bank)?;

        // No answers yet, so every plan is still in play.
        let survivors: Vec<&Plan> = catalog.plans().iter().collect();
        if session.status() == QuizStatus::InProgress && self.config.should_stop(0, survivors.len()) {
            session.complete()?;
        }

        let context = self
            .config
            .ranking_context(&survivors, &self.weights, &telemetry);
        let next_question = session.next_question(&self.config.ranker, &context);

        self.sessions.save(&session).await?;
        if let Some(next) = &next_question {
            self.questions.record_impression(next.question_key).await?;
        }

        info!(
            quiz_session_id = %session.id(),
            questions = session.remaining().len(),
            plans = survivors.len(),
            first_question = next_question.as_ref().map(|n| n.question_key.as_str()).unwrap_or("-"),
            "Quiz started"
        );

        Ok(StartQuizResult {
            session_id: session.id(),
            status: session.status(),
            next_question,
        })
    }
}
