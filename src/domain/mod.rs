//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, percentages, errors, state machine)
//! - `catalog` - Insurance plans, tri-state benefits, and completeness
//! - `preferences` - Validated quiz answers
//! - `recommendation` - Elimination, scoring, tie-breaking, and explanations
//! - `questions` - Discriminative power and adaptive question ordering

pub mod catalog;
pub mod foundation;
pub mod preferences;
pub mod questions;
pub mod recommendation;
