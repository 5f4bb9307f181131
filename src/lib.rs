//! Plan Advisor - Health insurance plan recommendation
//!
//! Ranks a catalog of health insurance plans against a user's stated
//! preferences, treating unknown plan data as unknown rather than absent,
//! and orders quiz questions by how sharply their answers split the plans.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
