//! Plan catalog source configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the plan catalog is loaded from
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    File,
    Http,
}

/// Catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,

    /// JSON file path, used when `source = file`
    #[serde(default = "default_path")]
    pub path: String,

    /// Catalog URL, required when `source = http`
    pub url: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.source {
            CatalogSource::File => {
                if self.path.trim().is_empty() {
                    return Err(ValidationError::MissingRequired("CATALOG__PATH"));
                }
            }
            CatalogSource::Http => {
                let url = self
                    .url
                    .as_deref()
                    .ok_or(ValidationError::MissingRequired("CATALOG__URL"))?;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidCatalogUrl);
                }
                if self.timeout_secs == 0 || self.timeout_secs > 300 {
                    return Err(ValidationError::InvalidTimeout);
                }
            }
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            path: default_path(),
            url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_path() -> String {
    "./data/plans.json".to_string()
}

fn default_timeout() -> u64 {
    10
}
