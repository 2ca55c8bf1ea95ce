//! Embedded schema migrations.
//!
//! The SQL under `backend/migrations` is compiled into the binary and applied
//! at startup over a blocking `PgConnection`. Call [`run_pending_migrations`]
//! from `spawn_blocking` when inside the async runtime.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration, returning how many ran.
///
/// # Errors
///
/// Returns [`MigrationError::Connect`] when the connection fails and
/// [`MigrationError::Apply`] when a migration is rejected.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::pg::Pg;
    use diesel::migration::{Migration, MigrationSource};
    use rstest::rstest;

    #[rstest]
    fn embedded_migrations_include_schema() {
        let names: Vec<String> = MigrationSource::<Pg>::migrations(&MIGRATIONS)
            .expect("embedded migrations")
            .iter()
            .map(|migration| migration.name().to_string())
            .collect();
        assert!(names.iter().any(|name| name.ends_with("create_cities")));
    }

    #[rstest]
    fn unreachable_database_reports_connect_error() {
        let err = run_pending_migrations("postgres://invalid host/none")
            .expect_err("malformed url");
        assert!(matches!(err, MigrationError::Connect { .. }));
    }
}
