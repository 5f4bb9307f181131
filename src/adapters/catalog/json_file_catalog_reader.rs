//! JSON File Catalog Reader
//!
//! Reads the plan catalog from a JSON array on disk and keeps the parsed
//! catalog until `refresh` is called.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::catalog::PlanCatalog;
use crate::ports::{CatalogError, PlanCatalogReader};

/// File-backed plan catalog with an in-process cache
#[derive(Debug, Clone)]
pub struct JsonFileCatalogReader {
    path: PathBuf,
    cached: Arc<RwLock<Option<Arc<PlanCatalog>>>>,
}

impl JsonFileCatalogReader {
    /// Create a reader for a catalog file
    ///
    /// # Example
    /// ```ignore
    /// let reader = JsonFileCatalogReader::new("./data/plans.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cached catalog and read the file again
    pub async fn refresh(&self) -> Result<Arc<PlanCatalog>, CatalogError> {
        self.cached.write().await.take();
        self.load_catalog().await
    }

    async fn read_file(&self) -> Result<PlanCatalog, CatalogError> {
        let json = fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::NotFound(self.path.display().to_string()),
            _ => CatalogError::Io(format!("{}: {}", self.path.display(), e)),
        })?;
        Ok(PlanCatalog::from_json(&json)?)
    }
}

#[async_trait]
impl PlanCatalogReader for JsonFileCatalogReader {
    async fn load_catalog(&self) -> Result<Arc<PlanCatalog>, CatalogError> {
        if let Some(catalog) = self.cached.read().await.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let mut cached = self.cached.write().await;
        // another task may have filled the cache while we waited
        if let Some(catalog) = cached.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(self.read_file().await?);
        info!(
            path = %self.path.display(),
            plans = catalog.len(),
            fingerprint = %catalog.fingerprint(),
            "Loaded plan catalog"
        );
        debug!(
            average_completeness = catalog.average_completeness(),
            "Catalog data quality"
        );
        *cached = Some(Arc::clone(&catalog));
        Ok(catalog)
    }
}
