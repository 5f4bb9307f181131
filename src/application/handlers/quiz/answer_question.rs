//! AnswerQuestionHandler - Records one answer and picks the next question.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::{QuizHandlerConfig, QuizHandlerError};
use crate::domain::foundation::{QuizSessionId, QuizStatus};
use crate::domain::preferences::{PreferenceKey, UserPreferences};
use crate::domain::questions::NextQuestion;
use crate::domain::recommendation::{EliminationFilter, WeightTable};
use crate::ports::{PlanCatalogReader, QuestionStore, QuizSessionRepository};

/// Command to answer one quiz question.
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub session_id: QuizSessionId,
    pub question_key: PreferenceKey,
    /// Raw wire answer; `null` skips the question.
    pub answer: Value,
}

impl AnswerQuestionCommand {
    pub fn new(session_id: QuizSessionId, question_key: PreferenceKey, answer: Value) -> Self {
        Self {
            session_id,
            question_key,
            answer,
        }
    }
}

/// Result of answering a question.
#[derive(Debug, Clone)]
pub struct AnswerQuestionResult {
    pub session_id: QuizSessionId,
    pub status: QuizStatus,
    /// Questions answered or skipped so far.
    pub answered: usize,
    /// Plans that survive elimination under the answers so far.
    pub plans_remaining: usize,
    pub preferences: UserPreferences,
    /// `None` once the quiz is complete.
    pub next_question: Option<NextQuestion>,
}

/// Handler for quiz answers.
pub struct AnswerQuestionHandler {
    questions: Arc<dyn QuestionStore>,
    sessions: Arc<dyn QuizSessionRepository>,
    catalog: Arc<dyn PlanCatalogReader>,
    weights: Arc<WeightTable>,
    config: QuizHandlerConfig,
}

impl AnswerQuestionHandler {
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

    pub async fn handle(
        &self,
        cmd: AnswerQuestionCommand,
    ) -> Result<AnswerQuestionResult, QuizHandlerError> {
        let (session, catalog, telemetry) = futures::try_join!(
            async {
                self.sessions
                    .find_by_id(cmd.session_id)
                    .await
                    .map_err(QuizHandlerError::from)
            },
            async { self.catalog.load_catalog().await.map_err(QuizHandlerError::from) },
            async { self.questions.telemetry().await.map_err(QuizHandlerError::from) },
        )?;
        let mut session = session.ok_or(QuizHandlerError::SessionNotFound(cmd.session_id))?;

        session.record_answer(cmd.question_key, &cmd.answer)?;
        let skipped = cmd.answer.is_null();
        debug!(
            quiz_session_id = %session.id(),
            question_key = %cmd.question_key,
            skipped,
            "Answer recorded"
        );

        let survivors =
            EliminationFilter::filter(catalog.plans(), session.preferences(), &self.weights);
        let answered = session.asked().len();

        if session.status() == QuizStatus::InProgress
            && self.config.should_stop(answered, survivors.len())
        {
            session.complete()?;
            info!(
                quiz_session_id = %session.id(),
                answered,
                plans_remaining = survivors.len(),
                "Quiz stopped early"
            );
        }

        let context = self
            .config
            .ranking_context(&survivors, &self.weights, &telemetry);
        let next_question = session.next_question(&self.config.ranker, &context);

        // Telemetry follows the save so a lost answer is never counted.
        self.sessions.save(&session).await?;
        if !skipped {
            self.questions.record_response(cmd.question_key).await?;
        }
        if let Some(next) = &next_question {
            self.questions.record_impression(next.question_key).await?;
        }

        Ok(AnswerQuestionResult {
            session_id: session.id(),
            status: session.status(),
            answered,
            plans_remaining: survivors.len(),
            preferences: session.preferences().clone(),
            next_question,
        })
    }
}
