//! RefreshQuestionPowerHandler - Recomputes stored question power from the catalog.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::QuizHandlerError;
use crate::domain::catalog::Plan;
use crate::domain::questions::{DiscriminativePowerCalculator, QuestionAnswerStat};
use crate::domain::recommendation::WeightTable;
use crate::ports::{PlanCatalogReader, QuestionStore};

/// Result of a power refresh.
#[derive(Debug, Clone)]
pub struct RefreshQuestionPowerResult {
    /// Questions that received fresh statistics.
    pub questions_refreshed: usize,
    pub stats: Vec<QuestionAnswerStat>,
    pub catalog_fingerprint: String,
}

/// Handler that recomputes answer statistics for every question.
pub struct RefreshQuestionPowerHandler {
    questions: Arc<dyn QuestionStore>,
    catalog: Arc<dyn PlanCatalogReader>,
    weights: Arc<WeightTable>,
}

impl RefreshQuestionPowerHandler {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        catalog: Arc<dyn PlanCatalogReader>,
        weights: Arc<WeightTable>,
    ) -> Self {
        Self {
            questions,
            catalog,
            weights,
        }
    }

    pub async fn handle(&self) -> Result<RefreshQuestionPowerResult, QuizHandlerError> {
        let (bank, catalog) = futures::try_join!(
            async { self.questions.list_questions().await.map_err(QuizHandlerError::from) },
            async { self.catalog.load_catalog().await.map_err(QuizHandlerError::from) },
        )?;
        let plans: Vec<&Plan> = catalog.plans().iter().collect();

        let mut stats = Vec::new();
        let mut questions_refreshed = 0;
        for question in &bank {
            let key = question.question_key();
            let question_stats = DiscriminativePowerCalculator::answer_stats(key, &plans, &self.weights);
            if question_stats.is_empty() {
                warn!(question_key = %key, "No scoring rule for question, power left unchanged");
                continue;
            }
            debug!(
                question_key = %key,
                answers = question_stats.len(),
                previous_power = question.discriminative_power(),
                "Answer statistics computed"
            );
            questions_refreshed += 1;
            stats.extend(question_stats);
        }

        self.questions.save_answer_stats(&stats).await?;

        info!(
            questions_refreshed,
            plans = plans.len(),
            catalog_fingerprint = catalog.fingerprint(),
            "Question power refreshed"
        );

        Ok(RefreshQuestionPowerResult {
            questions_refreshed,
            stats,
            catalog_fingerprint: catalog.fingerprint().to_string(),
        })
    }
}
