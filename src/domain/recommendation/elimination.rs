//! Elimination Filter - NULL-safe hard filtering of incompatible plans.

use serde::{Deserialize, Serialize};

use super::weights::WeightTable;
use crate::domain::catalog::{BenefitField, Plan};
use crate::domain::foundation::PlanId;
use crate::domain::preferences::UserPreferences;

/// A plan removed from consideration and the requirement it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elimination {
    pub plan_id: PlanId,
    pub field: BenefitField,
    pub reason: String,
}

/// Hard filter over a plan list.
pub struct EliminationFilter;

impl EliminationFilter {
    /// Keeps every plan that is not definitively incompatible.
    ///
    /// A plan is removed only when a hard-requirement rule was answered with
    /// a request and the plan's field explicitly fails it. Unknown fields
    /// never remove a plan; the scorer flags them instead.
    pub fn filter<'a>(
        plans: &'a [Plan],
        preferences: &UserPreferences,
        table: &WeightTable,
    ) -> Vec<&'a Plan> {
        Self::partition(plans, preferences, table).0
    }

    /// Splits plans into survivors and eliminations, preserving input order.
    pub fn partition<'a>(
        plans: &'a [Plan],
        preferences: &UserPreferences,
        table: &WeightTable,
    ) -> (Vec<&'a Plan>, Vec<Elimination>) {
        let mut kept = Vec::with_capacity(plans.len());
        let mut eliminated = Vec::new();

        for plan in plans {
            match Self::first_conflict(plan, preferences, table) {
                Some(elimination) => eliminated.push(elimination),
                None => kept.push(plan),
            }
        }

        (kept, eliminated)
    }

    /// Returns true if the plan survives the filter.
    pub fn survives(plan: &Plan, preferences: &UserPreferences, table: &WeightTable) -> bool {
        Self::first_conflict(plan, preferences, table).is_none()
    }

    fn first_conflict(
        plan: &Plan,
        preferences: &UserPreferences,
        table: &WeightTable,
    ) -> Option<Elimination> {
        table
            .rules()
            .iter()
            .filter(|rule| rule.hard_requirement)
            .find_map(|rule| {
                let wanted = preferences.get(rule.preference)?;
                rule.conflicts(wanted, plan.benefit(rule.field))
                    .then(|| Elimination {
                        plan_id: plan.plan_id().clone(),
                        field: rule.field,
                        reason: format!("{} is not included", rule.category),
                    })
            })
    }
}
