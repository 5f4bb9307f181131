//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PLAN_ADVISOR` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use plan_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Returning the top {} plans", config.scoring.top_n);
//! ```

mod catalog;
mod error;
mod features;
mod logging;
mod quiz;
mod scoring;

pub use catalog::{CatalogConfig, CatalogSource};
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::{Environment, LoggingConfig};
pub use quiz::QuizConfig;
pub use scoring::ScoringConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Plan catalog source (file or HTTP)
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Scoring and ranking (closeness threshold, top N, weight table)
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Adaptive quiz (ranker weights, stopping rule)
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Logging (filter, format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PLAN_ADVISOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PLAN_ADVISOR__SCORING__TOP_N=3` -> `scoring.top_n = 3`
    /// - `PLAN_ADVISOR__CATALOG__SOURCE=http` -> `catalog.source = http`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("PLAN_ADVISOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.catalog.validate()?;
        self.scoring.validate()?;
        self.quiz.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
