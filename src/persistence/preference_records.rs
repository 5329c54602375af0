//! `SQLite` storage for preference records.
//!
//! Each record is one row of the `preferences` table keyed by name. The
//! payload is opaque JSON; version checks happen in the preference store.

use std::time::{SystemTime, UNIX_EPOCH};

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::sqlite::SqliteConnection;

use crate::preferences::{PreferenceBackend, StoredRecord};
use crate::telemetry::TelemetrySink;

use super::{PersistenceError, migrate_database};

const PREFERENCES_TABLE: &str = "preferences";

/// Preference backend writing to a local `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqlitePreferenceBackend {
    database_url: String,
}

impl SqlitePreferenceBackend {
    /// Targets an already migrated database.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string.trim().to_owned(),
        })
    }

    /// Applies pending migrations, then targets the database.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the URL is blank or migrations fail.
    pub fn open(
        database_url: &str,
        telemetry: &dyn TelemetrySink,
    ) -> Result<Self, PersistenceError> {
        migrate_database(database_url, telemetry)?;
        Self::new(database_url)
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })
    }

    fn now_unix_seconds() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    fn table_exists(connection: &mut SqliteConnection) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            one: i64,
        }

        let exists: Option<Row> = sql_query(
            "SELECT 1 AS one FROM sqlite_master WHERE type = 'table' AND name = ? LIMIT 1;",
        )
        .bind::<Text, _>(PREFERENCES_TABLE)
        .get_result(connection)
        .optional()?;

        Ok(exists.is_some_and(|row| row.one == 1))
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }
}

impl PreferenceBackend for SqlitePreferenceBackend {
    fn load(&self, name: &str) -> Result<Option<StoredRecord>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Integer)]
            version: i32,
            #[diesel(sql_type = Text)]
            payload: String,
        }

        let mut connection = self.establish_connection()?;

        let result: Option<Row> =
            sql_query("SELECT version, payload FROM preferences WHERE name = ? LIMIT 1;")
                .bind::<Text, _>(name)
                .get_result(&mut connection)
                .optional()
                .map_err(|error| {
                    Self::map_error_with_schema_check(&mut connection, &error, |message| {
                        PersistenceError::QueryFailed { message }
                    })
                })?;

        result
            .map(|row| {
                let version =
                    u32::try_from(row.version).map_err(|_| PersistenceError::QueryFailed {
                        message: format!("stored version {} is negative", row.version),
                    })?;
                Ok(StoredRecord {
                    version,
                    payload: row.payload,
                })
            })
            .transpose()
    }

    fn save(&self, name: &str, record: &StoredRecord) -> Result<(), PersistenceError> {
        let version = i32::try_from(record.version).map_err(|_| PersistenceError::WriteFailed {
            message: format!("version {} does not fit the schema", record.version),
        })?;
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO preferences (name, version, payload, updated_at) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT(name) DO UPDATE SET \
               version = excluded.version, \
               payload = excluded.payload, \
               updated_at = excluded.updated_at;",
        )
        .bind::<Text, _>(name)
        .bind::<Integer, _>(version)
        .bind::<Text, _>(record.payload.as_str())
        .bind::<BigInt, _>(Self::now_unix_seconds())
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| {
            Self::map_error_with_schema_check(&mut connection, &error, |message| {
                PersistenceError::WriteFailed { message }
            })
        })
    }
}
