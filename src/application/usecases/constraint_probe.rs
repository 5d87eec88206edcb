use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    entities::premium_plans::NewPremiumPlan,
    repositories::premium_plans::PremiumPlanRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub plan_type: String,
    /// Id the throwaway row held before it was deleted.
    pub probe_id: i64,
    pub rows_before: i64,
    pub rows_after: i64,
}

impl ProbeOutcome {
    pub fn left_no_residue(&self) -> bool {
        self.rows_before == self.rows_after
    }
}

/// Smoke test: writes and removes a row carrying `plan_type` to prove the live
/// constraint accepts it. Must not overlap with other writers on the table.
pub struct ConstraintProbe<P>
where
    P: PremiumPlanRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
}

impl<P> ConstraintProbe<P>
where
    P: PremiumPlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>) -> Self {
        Self { plan_repo }
    }

    pub async fn probe(&self, plan_type: &str, now: NaiveDateTime) -> Result<ProbeOutcome> {
        if plan_type.trim().is_empty() {
            bail!("Plan type to probe must not be empty");
        }

        let rows_before = self.plan_repo.count_plans().await?;

        let probe_id = self
            .plan_repo
            .insert_and_delete(NewPremiumPlan::probe(plan_type, now))
            .await?;

        let rows_after = self.plan_repo.count_plans().await?;

        let outcome = ProbeOutcome {
            plan_type: plan_type.to_string(),
            probe_id,
            rows_before,
            rows_after,
        };

        if outcome.left_no_residue() {
            info!(plan_type, probe_id, "constraint_probe: value accepted, probe row removed");
        } else {
            warn!(
                plan_type,
                probe_id,
                rows_before,
                rows_after,
                "constraint_probe: row count changed during probe (concurrent writer?)"
            );
        }

        Ok(outcome)
    }
}
