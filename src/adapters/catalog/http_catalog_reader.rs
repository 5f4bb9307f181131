//! HTTP Catalog Reader
//!
//! Fetches the plan catalog as a JSON array from a remote URL on every
//! call. Put a caching reader in front of it if the source is slow.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::catalog::PlanCatalog;
use crate::ports::{CatalogError, PlanCatalogReader};

/// Configuration for the remote catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    pub url: String,
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Remote plan catalog over HTTP.
pub struct HttpCatalogReader {
    config: HttpCatalogConfig,
    client: Client,
}

impl HttpCatalogReader {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl PlanCatalogReader for HttpCatalogReader {
    async fn load_catalog(&self) -> Result<Arc<PlanCatalog>, CatalogError> {
        let response = self
            .client
            .get(&self.config.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(self.config.url.clone()));
        }
        if !status.is_success() {
            warn!(url = %self.config.url, status = %status, "Catalog request rejected");
            return Err(CatalogError::Http(format!("{} returned {}", self.config.url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        let catalog = PlanCatalog::from_json(&body)?;

        debug!(
            url = %self.config.url,
            plans = catalog.len(),
            fingerprint = %catalog.fingerprint(),
            "Fetched plan catalog"
        );
        Ok(Arc::new(catalog))
    }
}
