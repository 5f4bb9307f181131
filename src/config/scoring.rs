//! Scoring and ranking configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::recommendation::DEFAULT_CLOSENESS_THRESHOLD;

const MAX_TOP_N: usize = 50;

/// Scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Score gap (points, inclusive) within which plans count as tied
    #[serde(default = "default_closeness_threshold")]
    pub closeness_threshold: f64,

    /// Number of recommendations returned
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// YAML weight table replacing the built-in one
    pub weight_table_path: Option<String>,
}

impl ScoringConfig {
    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.closeness_threshold.is_finite() || self.closeness_threshold < 0.0 {
            return Err(ValidationError::InvalidThreshold);
        }
        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            return Err(ValidationError::InvalidTopN);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            closeness_threshold: default_closeness_threshold(),
            top_n: default_top_n(),
            weight_table_path: None,
        }
    }
}

fn default_closeness_threshold() -> f64 {
    DEFAULT_CLOSENESS_THRESHOLD
}

fn default_top_n() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_config_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.closeness_threshold, 5.0);
        assert_eq!(config.top_n, 5);
        assert!(config.weight_table_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_negative_threshold() {
        let config = ScoringConfig {
            closeness_threshold: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidThreshold));

        let config = ScoringConfig {
            closeness_threshold: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidThreshold));
    }

    #[test]
    fn test_validation_bounds_top_n() {
        for top_n in [0, 51] {
            let config = ScoringConfig {
                top_n,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTopN));
        }
    }
}
