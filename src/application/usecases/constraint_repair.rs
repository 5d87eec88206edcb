use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    repositories::check_constraints::CheckConstraintRepository,
    value_objects::check_constraints::EnumCheckConstraint,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRepairOutcome {
    pub constraint_name: String,
    /// Clause read back from the catalog after commit; `None` if it could not be found.
    pub check_clause: Option<String>,
}

/// Replaces an enumerated check constraint with one matching the desired value set.
pub struct ConstraintRepair<C>
where
    C: CheckConstraintRepository + Send + Sync + 'static,
{
    constraint_repo: Arc<C>,
}

impl<C> ConstraintRepair<C>
where
    C: CheckConstraintRepository + Send + Sync + 'static,
{
    pub fn new(constraint_repo: Arc<C>) -> Self {
        Self { constraint_repo }
    }

    pub async fn repair(&self, constraint: &EnumCheckConstraint) -> Result<ConstraintRepairOutcome> {
        info!(
            table = constraint.table(),
            constraint = constraint.constraint_name(),
            allowed = ?constraint.allowed_values(),
            "constraint_repair: replacing check constraint"
        );

        self.constraint_repo
            .replace_check_constraint(constraint)
            .await?;

        let check_clause = self
            .constraint_repo
            .find_check_clause(constraint.constraint_name())
            .await?;

        if check_clause.is_none() {
            warn!(
                constraint = constraint.constraint_name(),
                "constraint_repair: constraint committed but not visible in information_schema"
            );
        }

        Ok(ConstraintRepairOutcome {
            constraint_name: constraint.constraint_name().to_string(),
            check_clause,
        })
    }
}
