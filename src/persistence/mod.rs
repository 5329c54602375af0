//! Local persistence and database migrations.
//!
//! Preferences live in a local `SQLite` database. The schema is managed with
//! embedded Diesel migrations so a fresh file is created and upgraded the
//! same way on every machine.

mod error;
mod migrator;
mod preference_records;

pub use error::PersistenceError;
pub use migrator::{
    CURRENT_SCHEMA_VERSION, INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database,
};
pub use preference_records::SqlitePreferenceBackend;
