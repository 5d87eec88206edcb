use anyhow::{Context, Result};
use diesel::{
    PgConnection,
    connection::{CacheSize, Connection, SimpleConnection},
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};
use tracing::debug;

/// Name reported in `pg_stat_activity` for every maintenance session.
pub const APPLICATION_NAME: &str = "plans-maintenance";

/// Scoped holder for the one connection a maintenance command works on.
pub type MaintenancePool = Pool<ConnectionManager<PgConnection>>;

/// Prepares each acquired session: DDL runs as plain statements, and the
/// session is labelled so a DBA can spot it while it holds locks.
#[derive(Debug)]
struct MaintenanceSession {
    setup_sql: String,
}

impl MaintenanceSession {
    fn new(application_name: &str) -> Self {
        Self {
            setup_sql: session_setup_sql(application_name),
        }
    }
}

impl CustomizeConnection<PgConnection, R2d2Error> for MaintenanceSession {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        conn.set_prepared_statement_cache_size(CacheSize::Disabled);
        conn.batch_execute(&self.setup_sql)
            .map_err(R2d2Error::QueryError)
    }
}

fn session_setup_sql(application_name: &str) -> String {
    format!(
        "SET application_name = '{}'",
        application_name.replace('\'', "''")
    )
}

/// Opens the maintenance session. The pool never grows past one connection
/// and closes it when the last handle is dropped.
pub fn open_maintenance_pool(database_url: &str) -> Result<MaintenancePool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(MaintenanceSession::new(APPLICATION_NAME)))
        .build(manager)
        .context("Failed to open the maintenance session")?;

    debug!(
        application_name = APPLICATION_NAME,
        "postgres: maintenance session ready"
    );
    Ok(pool)
}
