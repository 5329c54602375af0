//! Opens the preference store the configuration points at.

use orgview::persistence::SqlitePreferenceBackend;
use orgview::telemetry::NoopTelemetrySink;
use orgview::{OrgviewConfig, PreferenceStore, QueryError};

use super::migrations::map_persistence_error;

/// Loads preferences from `database_url`, migrating it first.
///
/// Without a database URL preferences live in memory for this run only.
///
/// # Errors
///
/// Returns [`QueryError::Configuration`] for a blank URL and
/// [`QueryError::Persistence`] when the database cannot be opened or read.
pub fn load(config: &OrgviewConfig) -> Result<PreferenceStore, QueryError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::debug!("no database configured; preferences are not persisted");
        return Ok(PreferenceStore::in_memory());
    };

    let telemetry = NoopTelemetrySink;
    let backend = SqlitePreferenceBackend::open(database_url, &telemetry)
        .map_err(|error| map_persistence_error(&error))?;
    PreferenceStore::load(Box::new(backend), &telemetry)
        .map_err(|error| map_persistence_error(&error))
}
