//! Preferences Module - Validated quiz answers.

mod user_preferences;

pub use user_preferences::{PreferenceKey, PreferenceKind, PreferenceValue, UserPreferences};
