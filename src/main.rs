//! orgview entrypoint: organization listing, dashboard and database
//! migrations.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use orgview::{OperationMode, OrgviewConfig, QueryError};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_FILTER_ENV: &str = "ORGVIEW_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber.
///
/// Not used for the dashboard, whose screen owns the terminal.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), QueryError> {
    let config = load_config()?;

    if config.migrate_db {
        init_tracing();
        return cli::migrations::run(&config);
    }

    let mut preferences = cli::preferences::load(&config)?;
    let mode = config.operation_mode(Some(preferences.organization()));
    if mode != OperationMode::Dashboard {
        init_tracing();
    }
    match mode {
        OperationMode::MigrateDatabase => cli::migrations::run(&config),
        OperationMode::Listing => cli::listing::run(&config, &mut preferences).await,
        OperationMode::Dashboard => cli::dashboard::run(&config, preferences).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`QueryError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<OrgviewConfig, QueryError> {
    OrgviewConfig::load().map_err(|error| QueryError::Configuration {
        message: error.to_string(),
    })
}
