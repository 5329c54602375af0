//! Integration tests for `--migrate-db`.
//!
//! The binary prepares the preferences database; the library then has to be
//! able to use it without migrating again.

mod support;

use std::path::Path;
use std::process::{Command, Output};

use orgview::persistence::{CURRENT_SCHEMA_VERSION, PersistenceError, SqlitePreferenceBackend};
use orgview::preferences::{
    CURRENT_PREFERENCES_VERSION, PREFERENCES_RECORD_NAME, PreferenceBackend, StoredRecord,
};
use orgview::telemetry::NoopTelemetrySink;
use orgview::{PreferenceStore, SortMode};
use rstest::rstest;

use support::create_temp_dir;

fn binary_path() -> std::path::PathBuf {
    let mut path = std::env::current_exe()
        .unwrap_or_else(|error| panic!("failed to get current exe path: {error}"));
    path.pop();
    path.pop();
    path.push("orgview");
    path
}

fn migrate(database_url: Option<&str>, env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(binary_path());
    command.arg("--migrate-db");
    if let Some(url) = database_url {
        command.args(["--database-url", url]);
    }
    for key in [
        "ORGVIEW_DATABASE_URL",
        "ORGVIEW_ORG",
        "ORGVIEW_TOKEN",
        "ORGVIEW_TUI",
        "GITHUB_TOKEN",
    ] {
        command.env_remove(key);
    }
    command.envs(env.iter().copied());
    command
        .output()
        .unwrap_or_else(|error| panic!("failed to execute binary: {error}"))
}

fn database_url(directory: &Path) -> String {
    directory.join("orgview.sqlite").to_string_lossy().into_owned()
}

fn migrate_ok(database_url: &str) -> Output {
    let output = migrate(Some(database_url), &[]);
    assert!(
        output.status.success(),
        "migration should succeed\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn sample_record(organization: &str) -> StoredRecord {
    StoredRecord {
        version: CURRENT_PREFERENCES_VERSION,
        payload: format!(r#"{{"organization":"{organization}","sort_mode":"forks"}}"#),
    }
}

#[test]
fn migrated_database_accepts_preference_records() {
    let directory = create_temp_dir();
    let url = database_url(directory.path());

    migrate_ok(&url);

    let backend = SqlitePreferenceBackend::new(url.as_str()).expect("URL is not blank");
    assert_eq!(backend.load(PREFERENCES_RECORD_NAME), Ok(None));
    let record = sample_record("rust-lang");
    backend
        .save(PREFERENCES_RECORD_NAME, &record)
        .expect("save should succeed");
    assert_eq!(backend.load(PREFERENCES_RECORD_NAME), Ok(Some(record)));
}

#[test]
fn unmigrated_database_is_reported() {
    let directory = create_temp_dir();
    let url = database_url(directory.path());

    let backend = SqlitePreferenceBackend::new(url.as_str()).expect("URL is not blank");

    assert_eq!(
        backend.load(PREFERENCES_RECORD_NAME),
        Err(PersistenceError::SchemaNotInitialised)
    );
}

#[test]
fn preference_store_survives_a_reopen_after_migration() {
    let directory = create_temp_dir();
    let url = database_url(directory.path());
    migrate_ok(&url);

    let open = || {
        let backend = SqlitePreferenceBackend::new(url.as_str()).expect("URL is not blank");
        PreferenceStore::load(Box::new(backend), &NoopTelemetrySink).expect("store should load")
    };
    let mut store = open();
    store
        .set_organization("facebook")
        .expect("organization should persist");
    store
        .set_sort_mode(SortMode::Updated)
        .expect("sort should persist");

    let reopened = open();

    assert_eq!(reopened.organization(), "facebook");
    assert_eq!(reopened.sort_mode(), SortMode::Updated);
}

#[test]
fn migrating_again_keeps_stored_preferences() {
    let directory = create_temp_dir();
    let url = database_url(directory.path());
    migrate_ok(&url);
    let backend = SqlitePreferenceBackend::new(url.as_str()).expect("URL is not blank");
    let record = sample_record("tokio-rs");
    backend
        .save(PREFERENCES_RECORD_NAME, &record)
        .expect("save should succeed");

    let second = migrate_ok(&url);

    assert!(String::from_utf8_lossy(&second.stderr).contains(CURRENT_SCHEMA_VERSION));
    assert_eq!(backend.load(PREFERENCES_RECORD_NAME), Ok(Some(record)));
}

#[test]
fn migration_does_not_query_the_configured_organization() {
    let output = migrate(
        Some(":memory:"),
        &[("ORGVIEW_ORG", "rust-lang"), ("ORGVIEW_API_BASE", "http://127.0.0.1:9")],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!String::from_utf8_lossy(&output.stdout).contains("repositories shown"));
}

#[rstest]
#[case::missing(None, "database URL is required")]
#[case::blank(Some("   "), "database URL must not be blank")]
fn migration_needs_a_database_url(#[case] url: Option<&str>, #[case] expected: &str) {
    let output = migrate(url, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(expected), "stderr: {stderr}");
}
