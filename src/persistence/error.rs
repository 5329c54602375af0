//! Error types for local persistence operations.

use thiserror::Error;

use crate::github::QueryError;

/// Errors returned while migrating or using the local `SQLite` database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// No database URL/path was provided.
    #[error("database URL is required (use --database-url or ORGVIEW_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// The preferences table does not exist yet.
    #[error("database schema is not initialised (run with --migrate-db)")]
    SchemaNotInitialised,

    /// Reading a stored record failed.
    #[error("failed to read stored preferences: {message}")]
    QueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// Writing a record failed.
    #[error("failed to write preferences: {message}")]
    WriteFailed {
        /// Error detail from Diesel or the in-memory store.
        message: String,
    },
}

impl From<PersistenceError> for QueryError {
    fn from(error: PersistenceError) -> Self {
        Self::Persistence {
            message: error.to_string(),
        }
    }
}
