//! Unit tests for configuration loading, precedence and derived values.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::{MergeComposer, OrthoConfig};
use rstest::rstest;
use serde_json::{Value, json};

use super::{OperationMode, OrgviewConfig};
use crate::github::QueryError;
use crate::query::SortMode;

fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

fn build_config_from_layers(layers: Vec<(&str, Value)>) -> OrgviewConfig {
    let mut composer = MergeComposer::new();
    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }
    OrgviewConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"org": "default-org"})), ("file", json!({"org": "file-org"}))],
    "file-org"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"org": "file-org"})), ("environment", json!({"org": "env-org"}))],
    "env-org"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"org": "env-org"})), ("cli", json!({"org": "cli-org"}))],
    "cli-org"
)]
fn later_layers_win(#[case] layers: Vec<(&str, Value)>, #[case] expected: &str) {
    let config = build_config_from_layers(layers);

    assert_eq!(config.org.as_deref(), Some(expected));
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(vec![
        ("file", json!({"org": "rust-lang", "sort": "forks", "pages": 3})),
        ("cli", json!({"sort": "updated"})),
    ]);

    assert_eq!(config.org.as_deref(), Some("rust-lang"));
    assert_eq!(config.sort.as_deref(), Some("updated"));
    assert_eq!(config.pages, 3);
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let config = build_config_from_layers(vec![(
        "defaults",
        json!({"org": null, "token": null, "database_url": null}),
    )]);

    assert!(config.org.is_none());
    assert!(config.database_url.is_none());
    assert_eq!(config.pages, 1);
    assert_eq!(config.api_base, "https://api.github.com");
    assert_eq!(config.cache_ttl(), Duration::from_secs(300));
    assert_eq!(config.debounce_window(), Duration::from_millis(500));
}

#[rstest]
fn cli_flags_are_parsed() {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().into_owned();
    let _guard = env_lock::lock_env([
        ("ORGVIEW_ORG", None),
        ("ORGVIEW_DEBOUNCE_MS", Some("250")),
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ]);

    let args: Vec<OsString> = ["orgview", "-o", "facebook", "-s", "forks", "-p", "0"]
        .into_iter()
        .map(OsString::from)
        .collect();

    let config = OrgviewConfig::load_from_iter(args).expect("config should load");

    assert_eq!(config.organization(), Some("facebook"));
    assert_eq!(config.sort_mode(), Ok(Some(SortMode::Forks)));
    assert_eq!(config.page_limit(), None);
    assert_eq!(config.debounce_window(), Duration::from_millis(250));
}

#[rstest]
fn token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ghp_from_env"))]);
    let config = OrgviewConfig::default();

    let token = config.resolve_token().expect("token should resolve");

    assert_eq!(token.map(|value| value.value().to_owned()), Some("ghp_from_env".to_owned()));
}

#[rstest]
fn configured_token_wins_over_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ghp_from_env"))]);
    let config = OrgviewConfig {
        token: Some("ghp_configured".to_owned()),
        ..OrgviewConfig::default()
    };

    let token = config.resolve_token().expect("token should resolve");

    assert_eq!(token.map(|value| value.value().to_owned()), Some("ghp_configured".to_owned()));
}

#[rstest]
fn missing_token_means_anonymous() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);

    assert_eq!(OrgviewConfig::default().resolve_token(), Ok(None));
}

#[rstest]
fn blank_token_is_rejected() {
    let config = OrgviewConfig {
        token: Some("   ".to_owned()),
        ..OrgviewConfig::default()
    };

    assert_eq!(config.resolve_token(), Err(QueryError::MissingToken));
}

#[rstest]
fn unknown_sort_mode_is_a_configuration_error() {
    let config = OrgviewConfig {
        sort: Some("watchers".to_owned()),
        ..OrgviewConfig::default()
    };

    assert!(matches!(
        config.sort_mode(),
        Err(QueryError::Configuration { .. })
    ));
}

#[rstest]
fn non_http_api_base_is_rejected() {
    let config = OrgviewConfig {
        api_base: "ftp://example.com".to_owned(),
        ..OrgviewConfig::default()
    };

    assert!(matches!(
        config.api_base(),
        Err(QueryError::Configuration { .. })
    ));
}

#[rstest]
#[case::migrate_wins(true, true, Some("facebook"), None, OperationMode::MigrateDatabase)]
#[case::tui_requested(false, true, Some("facebook"), None, OperationMode::Dashboard)]
#[case::configured_org(false, false, Some("facebook"), None, OperationMode::Listing)]
#[case::stored_org(false, false, None, Some("google"), OperationMode::Listing)]
#[case::blank_stored_org(false, false, None, Some("  "), OperationMode::Dashboard)]
#[case::nothing_known(false, false, None, None, OperationMode::Dashboard)]
fn operation_mode_selection(
    #[case] migrate_db: bool,
    #[case] tui: bool,
    #[case] org: Option<&str>,
    #[case] stored: Option<&str>,
    #[case] expected: OperationMode,
) {
    let config = OrgviewConfig {
        migrate_db,
        tui,
        org: org.map(str::to_owned),
        ..OrgviewConfig::default()
    };

    assert_eq!(config.operation_mode(stored), expected);
}

#[rstest]
fn blank_configured_org_is_ignored() {
    let config = OrgviewConfig {
        org: Some("  ".to_owned()),
        ..OrgviewConfig::default()
    };

    assert_eq!(config.organization(), None);
}
