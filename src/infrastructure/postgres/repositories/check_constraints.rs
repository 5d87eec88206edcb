use anyhow::Result;
use async_trait::async_trait;
use diesel::result::Error as DieselError;
use diesel::sql_types::Text;
use diesel::{Connection, RunQueryDsl, prelude::*, sql_query};
use std::sync::Arc;

use crate::domain;
use crate::infrastructure::postgres::postgres_connection::MaintenancePool;
use domain::{
    entities::check_constraints::CheckClauseRow,
    repositories::check_constraints::CheckConstraintRepository,
    value_objects::check_constraints::EnumCheckConstraint,
};

const FIND_CHECK_CLAUSE_SQL: &str = "\
    SELECT check_clause::text AS check_clause \
    FROM information_schema.check_constraints \
    WHERE constraint_name = $1 \
    ORDER BY constraint_schema \
    LIMIT 1";

pub struct CheckConstraintPostgres {
    db_pool: Arc<MaintenancePool>,
}

impl CheckConstraintPostgres {
    pub fn new(db_pool: Arc<MaintenancePool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CheckConstraintRepository for CheckConstraintPostgres {
    async fn replace_check_constraint(&self, constraint: &EnumCheckConstraint) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let drop_sql = constraint.drop_sql();
        let add_sql = constraint.add_sql();

        // Postgres DDL is transactional: if the ADD fails the DROP is rolled back.
        conn.transaction::<(), DieselError, _>(|tx| {
            sql_query(drop_sql).execute(tx)?;
            sql_query(add_sql).execute(tx)?;
            Ok(())
        })?;

        Ok(())
    }

    async fn find_check_clause(&self, constraint_name: &str) -> Result<Option<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = sql_query(FIND_CHECK_CLAUSE_SQL)
            .bind::<Text, _>(constraint_name)
            .get_result::<CheckClauseRow>(&mut conn)
            .optional()?;

        Ok(row.map(|row| row.check_clause))
    }
}
