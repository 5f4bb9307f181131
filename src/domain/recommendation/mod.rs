//! Recommendation Module - Pure domain services for plan matching.
//!
//! # Components
//!
//! - `WeightTable` - Versioned preference-to-field scoring rules
//! - `EliminationFilter` - Removes plans that definitively fail a hard requirement
//! - `ScoringEngine` - Weighted match score with verification flags for unknown data
//! - `TieBreakResolver` - Score, completeness, flags, then name ordering
//! - `RecommendationEngine` - Runs the pipeline and explains the top results
//!
//! # Design Philosophy
//!
//! Everything here is synchronous and stateless. Callers load the catalog
//! and preferences first and pass them in; an unknown benefit is never read
//! as "not included".

mod elimination;
mod orchestrator;
mod ranking;
mod results;
mod scoring_engine;
mod weights;

pub use elimination::{Elimination, EliminationFilter};
pub use orchestrator::RecommendationEngine;
pub use ranking::{TieBreakLevel, TieBreakResolver, DEFAULT_CLOSENESS_THRESHOLD};
pub use results::{ComparisonResult, Recommendation, ScoredPlan};
pub use scoring_engine::{verification_flag, PlanScore, ScoreBreakdownEntry, ScoringEngine};
pub use weights::{Comparison, RuleOutcome, ScoringRule, WeightTable, DEFAULT_WEIGHT_TABLE_VERSION};
