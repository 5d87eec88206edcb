use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    entities::premium_plans::PremiumPlanSummary,
    repositories::{
        check_constraints::CheckConstraintRepository, premium_plans::PremiumPlanRepository,
    },
    value_objects::{check_constraints::normalize_identifier, enums::plan_types::PlanType},
};

const RULE_WIDTH: usize = 85;

/// Read-only snapshot of `premium_plans` and its plan type constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateReport {
    pub plans: Vec<PremiumPlanSummary>,
    pub missing_types: Vec<PlanType>,
    pub constraint_name: String,
    pub check_clause: Option<String>,
}

/// Sorts by plan type priority; unknown types go last, ties fall back to id.
pub fn order_by_plan_type(plans: &mut [PremiumPlanSummary]) {
    plans.sort_by_key(|plan| {
        let priority = plan
            .known_plan_type()
            .map(|t| t.priority())
            .unwrap_or(u8::MAX);
        (priority, plan.id)
    });
}

/// Required plan types with no row, in priority order.
pub fn missing_plan_types(plans: &[PremiumPlanSummary]) -> Vec<PlanType> {
    let found: BTreeSet<PlanType> = plans.iter().filter_map(|p| p.known_plan_type()).collect();

    PlanType::ALL
        .into_iter()
        .filter(|plan_type| !found.contains(plan_type))
        .collect()
}

impl StateReport {
    pub fn new(
        mut plans: Vec<PremiumPlanSummary>,
        constraint_name: &str,
        check_clause: Option<String>,
    ) -> Self {
        order_by_plan_type(&mut plans);
        let missing_types = missing_plan_types(&plans);

        Self {
            plans,
            missing_types,
            constraint_name: constraint_name.to_string(),
            check_clause,
        }
    }
}

impl Display for StateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "\n📊 Premium Plans in Database:\n")?;
        writeln!(
            f,
            "{:<5} {:<20} {:<20} {:<12} {:<9} {}",
            "ID", "Name", "Type", "Price", "Months", "Active"
        )?;
        writeln!(f, "{rule}")?;

        for plan in &self.plans {
            let status = if plan.is_active { "✅" } else { "❌" };
            writeln!(
                f,
                "{:<5} {:<20} {:<20} {:<12} {:<9} {}",
                plan.id,
                plan.name,
                plan.plan_type,
                plan.price,
                plan.duration.to_string(),
                status
            )?;
        }

        writeln!(f, "\n{rule}")?;

        if self.missing_types.is_empty() {
            writeln!(
                f,
                "\n✅ All {} required plan types are present!",
                PlanType::ALL.len()
            )?;
        } else {
            let missing = self
                .missing_types
                .iter()
                .map(PlanType::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "\n⚠️  Missing plan types: {missing}")?;
        }

        match &self.check_clause {
            Some(clause) => {
                writeln!(f, "\n🔒 Constraint Check Clause:")?;
                writeln!(f, "   {clause}")
            }
            None => writeln!(f, "\n⚠️  Constraint {} not found", self.constraint_name),
        }
    }
}

pub struct StateReporter<P, C>
where
    P: PremiumPlanRepository + Send + Sync + 'static,
    C: CheckConstraintRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    constraint_repo: Arc<C>,
}

impl<P, C> StateReporter<P, C>
where
    P: PremiumPlanRepository + Send + Sync + 'static,
    C: CheckConstraintRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, constraint_repo: Arc<C>) -> Self {
        Self {
            plan_repo,
            constraint_repo,
        }
    }

    pub async fn build(&self, constraint_name: &str) -> Result<StateReport> {
        // Unquoted names are stored folded to lower case.
        let constraint_name = normalize_identifier("constraint", constraint_name)?;

        let plans = self.plan_repo.list_plan_summaries().await?;
        debug!(rows = plans.len(), "state_report: plans loaded");

        let check_clause = self.constraint_repo.find_check_clause(&constraint_name).await?;

        Ok(StateReport::new(plans, &constraint_name, check_clause))
    }
}
