//! In-Memory Catalog Reader
//!
//! Serves a catalog held in memory. Useful for testing, and for staged
//! catalogs built in-process.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::PlanCatalog;
use crate::ports::{CatalogError, PlanCatalogReader};

/// In-memory plan catalog
#[derive(Debug, Clone)]
pub struct InMemoryCatalogReader {
    catalog: Arc<RwLock<Arc<PlanCatalog>>>,
}

impl InMemoryCatalogReader {
    pub fn new(catalog: PlanCatalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Swap in a new catalog; readers holding the old one keep it
    pub async fn replace(&self, catalog: PlanCatalog) {
        *self.catalog.write().await = Arc::new(catalog);
    }
}

impl Default for InMemoryCatalogReader {
    fn default() -> Self {
        Self::new(PlanCatalog::empty())
    }
}

#[async_trait]
impl PlanCatalogReader for InMemoryCatalogReader {
    async fn load_catalog(&self) -> Result<Arc<PlanCatalog>, CatalogError> {
        Ok(Arc::clone(&*self.catalog.read().await))
    }
}
