//! Plan Catalog Reader Port - Where the plan list comes from.
//!
//! The catalog is loaded once per request by the application layer and
//! passed into the domain explicitly. Adapters may cache, but the domain
//! never holds on to a catalog between calls.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::catalog::PlanCatalog;
use crate::domain::foundation::ValidationError;

/// Errors that can occur while loading a plan catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("Failed to read catalog: {0}")]
    Io(String),

    #[error("Catalog request failed: {0}")]
    Http(String),

    #[error("Invalid catalog data: {0}")]
    Invalid(#[from] ValidationError),
}

/// Port for loading the current plan catalog
#[async_trait]
pub trait PlanCatalogReader: Send + Sync {
    /// Load the catalog
    ///
    /// # Errors
    /// Returns `CatalogError` when the source is unreachable or the data
    /// fails validation. There are no internal retries.
    async fn load_catalog(&self) -> Result<Arc<PlanCatalog>, CatalogError>;
}
