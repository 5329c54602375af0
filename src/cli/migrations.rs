//! Database migration operations.

use orgview::persistence::{PersistenceError, migrate_database};
use orgview::telemetry::StderrJsonlTelemetrySink;
use orgview::{OrgviewConfig, QueryError};

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`QueryError::Configuration`] if the database URL is missing or
/// blank. Returns [`QueryError::Persistence`] for connection or migration
/// failures.
pub fn run(config: &OrgviewConfig) -> Result<(), QueryError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| QueryError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })?;

    let telemetry = StderrJsonlTelemetrySink;
    migrate_database(database_url, &telemetry)
        .map(drop)
        .map_err(|error| map_persistence_error(&error))
}

/// Maps a persistence error to a query error.
///
/// A blank URL is a configuration problem; everything else happened while
/// talking to the database.
pub fn map_persistence_error(error: &PersistenceError) -> QueryError {
    if is_configuration_error(error) {
        QueryError::Configuration {
            message: error.to_string(),
        }
    } else {
        QueryError::from(error.clone())
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}
