use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::premium_plans::{NewPremiumPlan, PremiumPlanSummary};

#[async_trait]
#[automock]
pub trait PremiumPlanRepository {
    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>>;
    /// Inserts the row and returns its id. A unique violation on `name`
    /// is returned as `Ok(None)`.
    async fn insert_unless_name_taken(&self, plan: NewPremiumPlan) -> Result<Option<i64>>;
    /// Inserts the row and deletes it again inside one transaction,
    /// returning the id it was briefly assigned.
    async fn insert_and_delete(&self, plan: NewPremiumPlan) -> Result<i64>;
    async fn count_plans(&self) -> Result<i64>;
    async fn list_plan_summaries(&self) -> Result<Vec<PremiumPlanSummary>>;
}
