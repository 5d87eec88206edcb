use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::check_constraints::EnumCheckConstraint;

#[async_trait]
#[automock]
pub trait CheckConstraintRepository {
    /// Drops and re-adds the constraint in a single transaction.
    async fn replace_check_constraint(&self, constraint: &EnumCheckConstraint) -> Result<()>;
    async fn find_check_clause(&self, constraint_name: &str) -> Result<Option<String>>;
}
