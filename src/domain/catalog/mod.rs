//! Catalog Module - Plan records and their derived data quality.
//!
//! # Components
//!
//! - `Plan` - One insurer's product with tri-state benefit fields
//! - `CompletenessCalculator` - Null-count based data-quality score
//! - `PlanCatalog` - Validated, caller-owned collection of plans

mod completeness;
mod plan;
mod plan_catalog;

pub use completeness::{Completeness, CompletenessCalculator, KEY_FIELDS};
pub use plan::{
    BenefitField, BenefitValue, Benefits, HospitalCover, Insurer, Plan, PlanBuilder, PlanTier,
};
pub use plan_catalog::PlanCatalog;
