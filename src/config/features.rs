//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Rank quiz questions by live power over the plans still in play
    #[serde(default = "default_enable_info_gain")]
    pub enable_info_gain: bool,

    /// Log every eliminated plan with its reason
    #[serde(default)]
    pub log_eliminations: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_info_gain: default_enable_info_gain(),
            log_eliminations: false,
        }
    }
}

fn default_enable_info_gain() -> bool {
    true
}
