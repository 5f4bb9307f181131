//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Catalog URL must use http:// or https://")]
    InvalidCatalogUrl,

    #[error("Invalid catalog request timeout")]
    InvalidTimeout,

    #[error("Closeness threshold must be a non-negative number")]
    InvalidThreshold,

    #[error("top_n must be between 1 and 50")]
    InvalidTopN,

    #[error("Quiz weight {0} must be a non-negative number")]
    InvalidQuizWeight(&'static str),

    #[error("max_questions must be at least 1")]
    InvalidMaxQuestions,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),
}
