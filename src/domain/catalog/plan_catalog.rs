//! PlanCatalog - The caller-owned set of plans a request is answered from.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use super::Plan;
use crate::domain::foundation::{PlanId, ValidationError};

/// Immutable, validated collection of plans.
///
/// Callers load a catalog once (or cache it) and pass it explicitly into
/// every recommendation call. Two catalogs can coexist, e.g. live and staged
/// data, without interfering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
    fingerprint: String,
}

impl PlanCatalog {
    /// Builds a catalog, rejecting duplicate plan ids.
    pub fn new(plans: Vec<Plan>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(plans.len());
        for plan in &plans {
            if !seen.insert(plan.plan_id()) {
                return Err(ValidationError::duplicate("planId", plan.plan_id().as_str()));
            }
        }

        let fingerprint = Self::compute_fingerprint(&plans)?;
        Ok(Self { plans, fingerprint })
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            plans: Vec::new(),
            fingerprint: format!("{:x}", Sha256::digest(b"[]")),
        }
    }

    /// Parses a JSON array of plan records.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let plans: Vec<Plan> = serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_format("catalog", e.to_string()))?;
        Self::new(plans)
    }

    /// SHA-256 of the catalog's canonical JSON.
    fn compute_fingerprint(plans: &[Plan]) -> Result<String, ValidationError> {
        let canonical = serde_json::to_vec(plans)
            .map_err(|e| ValidationError::invalid_format("catalog", e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(format!("{:x}", hasher.finalize()))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Looks up a plan by id.
    pub fn get(&self, plan_id: &PlanId) -> Option<&Plan> {
        self.plans.iter().find(|p| p.plan_id() == plan_id)
    }

    /// Identifies this exact catalog content.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Mean completeness across all plans (0.0 when empty).
    pub fn average_completeness(&self) -> f64 {
        if self.plans.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.plans.iter().map(Plan::completeness_score).sum();
        sum / self.plans.len() as f64
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::empty()
    }
}
