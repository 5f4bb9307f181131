//! RecommendPlansHandler - Ranks the catalog against a user's preferences.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::preferences::UserPreferences;
use crate::domain::recommendation::{ComparisonResult, Elimination, RecommendationEngine};
use crate::ports::{CatalogError, PlanCatalogReader};

/// Command to rank plans for one set of preferences.
#[derive(Debug, Clone)]
pub struct RecommendPlansCommand {
    pub preferences: UserPreferences,
    /// Overrides the handler's default result size.
    pub top_n: Option<usize>,
}

impl RecommendPlansCommand {
    pub fn new(preferences: UserPreferences) -> Self {
        Self {
            preferences,
            top_n: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

/// Result of a recommendation run.
#[derive(Debug, Clone)]
pub struct RecommendPlansResult {
    /// Best first; empty when nothing survives elimination.
    pub recommendations: Vec<ComparisonResult>,
    /// Plans removed by hard requirements, in catalog order.
    pub eliminated: Vec<Elimination>,
    pub catalog_size: usize,
    pub catalog_fingerprint: String,
    pub weight_table_version: String,
}

/// Errors that can occur when recommending plans.
#[derive(Debug, Error)]
pub enum RecommendPlansError {
    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

impl RecommendPlansError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecommendPlansError::Catalog(_) => ErrorCode::CatalogUnavailable,
        }
    }
}

impl From<RecommendPlansError> for DomainError {
    fn from(err: RecommendPlansError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Handler for ranking plans.
pub struct RecommendPlansHandler {
    catalog: Arc<dyn PlanCatalogReader>,
    engine: Arc<RecommendationEngine>,
    default_top_n: usize,
    log_eliminations: bool,
}

impl RecommendPlansHandler {
    pub fn new(
        catalog: Arc<dyn PlanCatalogReader>,
        engine: Arc<RecommendationEngine>,
        default_top_n: usize,
    ) -> Self {
        Self {
            catalog,
            engine,
            default_top_n,
            log_eliminations: false,
        }
    }

    /// Logs each eliminated plan at debug level.
    pub fn with_elimination_logging(mut self, enabled: bool) -> Self {
        self.log_eliminations = enabled;
        self
    }

    pub async fn handle(
        &self,
        cmd: RecommendPlansCommand,
    ) -> Result<RecommendPlansResult, RecommendPlansError> {
        let catalog = self.catalog.load_catalog().await?;
        let top_n = cmd.top_n.unwrap_or(self.default_top_n);

        let explained = self.engine.recommend_explained(catalog.plans(), &cmd.preferences, top_n);
        if self.log_eliminations {
            for elimination in &explained.eliminated {
                debug!(
                    plan_id = %elimination.plan_id,
                    field = elimination.field.label(),
                    reason = %elimination.reason,
                    "Plan eliminated"
                );
            }
        }
        let recommendations = explained.results;
        let eliminated = explained.eliminated;

        info!(
            catalog_size = catalog.len(),
            answered = cmd.preferences.answered_count(),
            eliminated = eliminated.len(),
            returned = recommendations.len(),
            top_plan = recommendations.first().map(|r| r.plan.plan_name()).unwrap_or("-"),
            "Recommendations ranked"
        );

        Ok(RecommendPlansResult {
            recommendations,
            eliminated,
            catalog_size: catalog.len(),
            catalog_fingerprint: catalog.fingerprint().to_string(),
            weight_table_version: self.engine.weights().version().to_string(),
        })
    }
}
