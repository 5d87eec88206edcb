use anyhow::Result;
use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Bool, Integer, Nullable, Text, Timestamp};
use diesel::{Connection, PgConnection, QueryResult, RunQueryDsl, prelude::*, sql_query};
use std::sync::Arc;
use tracing::debug;

use crate::domain;
use crate::infrastructure::postgres::{postgres_connection::MaintenancePool, schema::premium_plans};
use domain::{
    entities::premium_plans::{
        InsertedPlanId, NewPremiumPlan, PremiumPlanSummary, PremiumPlanSummaryRow,
    },
    repositories::premium_plans::PremiumPlanRepository,
};

// Raw SQL for the statements that touch `price`: the column is NUMERIC and is
// exchanged as text so no decimal crate is needed on this side.
const INSERT_PLAN_SQL: &str = "\
    INSERT INTO premium_plans \
    (name, display_name, description, duration_months, price, currency, \
     plan_type, student_discount_percent, features, is_active, max_subscribers, \
     created_at, updated_at) \
    VALUES ($1, $2, $3, $4, CAST($5 AS NUMERIC), $6, $7, $8, $9, $10, $11, $12, $13) \
    RETURNING id::bigint AS id";

const LIST_SUMMARIES_SQL: &str = "\
    SELECT id::bigint AS id, name, plan_type, price::text AS price, \
           duration_months, is_active \
    FROM premium_plans \
    ORDER BY id";

pub struct PremiumPlanPostgres {
    db_pool: Arc<MaintenancePool>,
}

impl PremiumPlanPostgres {
    pub fn new(db_pool: Arc<MaintenancePool>) -> Self {
        Self { db_pool }
    }
}

fn insert_returning_id(
    conn: &mut PgConnection,
    plan: NewPremiumPlan,
    features: String,
) -> QueryResult<i64> {
    let inserted = sql_query(INSERT_PLAN_SQL)
        .bind::<Text, _>(plan.name)
        .bind::<Text, _>(plan.display_name)
        .bind::<Text, _>(plan.description)
        .bind::<Nullable<Integer>, _>(plan.duration.to_column())
        .bind::<Text, _>(plan.price.as_str().to_string())
        .bind::<Text, _>(plan.currency)
        .bind::<Text, _>(plan.plan_type)
        .bind::<Integer, _>(plan.student_discount.percent())
        .bind::<Text, _>(features)
        .bind::<Bool, _>(plan.is_active)
        .bind::<Nullable<Integer>, _>(plan.max_subscribers)
        .bind::<Timestamp, _>(plan.created_at)
        .bind::<Timestamp, _>(plan.updated_at)
        .get_result::<InsertedPlanId>(conn)?;

    Ok(inserted.id)
}

#[async_trait]
impl PremiumPlanRepository for PremiumPlanPostgres {
    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let id = premium_plans::table
            .filter(premium_plans::name.eq(name))
            .select(premium_plans::id)
            .first::<i64>(&mut conn)
            .optional()?;

        Ok(id)
    }

    async fn insert_unless_name_taken(&self, plan: NewPremiumPlan) -> Result<Option<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let features = plan.features.to_column()?;
        let name = plan.name.clone();

        match insert_returning_id(&mut conn, plan, features) {
            Ok(id) => Ok(Some(id)),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
                debug!(
                    %name,
                    constraint = info.constraint_name().unwrap_or("unknown"),
                    "premium_plans: insert lost to an existing row"
                );
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_and_delete(&self, plan: NewPremiumPlan) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let features = plan.features.to_column()?;

        let probe_id = conn.transaction::<i64, DieselError, _>(|tx| {
            let id = insert_returning_id(tx, plan, features)?;

            diesel::delete(premium_plans::table.find(id)).execute(tx)?;

            Ok(id)
        })?;

        Ok(probe_id)
    }

    async fn count_plans(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = premium_plans::table
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn list_plan_summaries(&self) -> Result<Vec<PremiumPlanSummary>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = sql_query(LIST_SUMMARIES_SQL).load::<PremiumPlanSummaryRow>(&mut conn)?;

        Ok(rows.into_iter().map(PremiumPlanSummary::from).collect())
    }
}
