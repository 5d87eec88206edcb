use diesel::r2d2::PoolError;
use diesel::result::{ConnectionError, Error as DieselError};

/// How a failed command is reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, constraint, permission or SQL errors raised by Postgres.
    Database,
    Unexpected,
}

impl FailureKind {
    pub fn classify(error: &anyhow::Error) -> Self {
        let from_database = error.chain().any(|cause| {
            cause.is::<DieselError>() || cause.is::<ConnectionError>() || cause.is::<PoolError>()
        });

        if from_database {
            FailureKind::Database
        } else {
            FailureKind::Unexpected
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            FailureKind::Database => "❌ Database error",
            FailureKind::Unexpected => "❌ Error",
        }
    }
}

/// The one line written to stderr for a failed command, with the full cause chain.
pub fn failure_line(error: &anyhow::Error) -> String {
    format!("{}: {:#}", FailureKind::classify(error).marker(), error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn diesel_errors_are_database_failures() {
        let error = anyhow::Error::from(DieselError::NotFound);
        assert_eq!(FailureKind::classify(&error), FailureKind::Database);
    }

    #[test]
    fn context_does_not_hide_the_database_cause() {
        let error = Err::<(), _>(DieselError::RollbackTransaction)
            .context("seed-free-tier failed")
            .unwrap_err();
        assert_eq!(FailureKind::classify(&error), FailureKind::Database);
    }

    #[test]
    fn connection_errors_are_database_failures() {
        let error = anyhow::Error::from(ConnectionError::BadConnection("refused".to_string()));
        assert_eq!(FailureKind::classify(&error), FailureKind::Database);
        assert_eq!(FailureKind::Database.marker(), "❌ Database error");
    }

    #[test]
    fn other_errors_are_unexpected() {
        let error = anyhow!("Invalid table identifier");
        assert_eq!(FailureKind::classify(&error), FailureKind::Unexpected);
        assert_eq!(FailureKind::Unexpected.marker(), "❌ Error");
    }

    #[test]
    fn failure_line_carries_marker_and_cause_chain() {
        let error = Err::<(), _>(DieselError::NotFound)
            .context("verify failed")
            .unwrap_err();

        let line = failure_line(&error);

        assert_eq!(line, "❌ Database error: verify failed: Record not found");
        assert_eq!(line.lines().count(), 1);
    }
}
