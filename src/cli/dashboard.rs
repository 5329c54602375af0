//! Interactive dashboard mode.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;

use orgview::tui::{DashboardApp, DashboardContext, set_dashboard_context};
use orgview::{OctocrabOrganizationGateway, OrgviewConfig, PreferenceStore, QueryError};

/// Runs the dashboard until the user quits.
///
/// A configured sort replaces the stored one; a configured token is used for
/// this run without being stored.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the gateway cannot be
/// built, or the terminal program fails.
pub async fn run(config: &OrgviewConfig, preferences: PreferenceStore) -> Result<(), QueryError> {
    let context = build_context(config, preferences)?;

    // A context left over from an earlier run in this process is replaced.
    if !set_dashboard_context(context) {
        tracing::debug!("replaced a pending dashboard context");
    }

    run_tui().await.map_err(|error| QueryError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Assembles the startup context from configuration and preferences.
///
/// # Errors
///
/// Returns [`QueryError`] when the sort, token or API base is invalid.
pub fn build_context(
    config: &OrgviewConfig,
    mut preferences: PreferenceStore,
) -> Result<DashboardContext, QueryError> {
    if let Some(sort_mode) = config.sort_mode()?
        && let Err(error) = preferences.set_sort_mode(sort_mode)
    {
        tracing::warn!(%error, "failed to save sort preference");
    }
    if let Some(organization) = config.organization()
        && let Err(error) = preferences.set_organization(organization)
    {
        tracing::warn!(%error, "failed to save organization preference");
    }

    let gateway = OctocrabOrganizationGateway::for_api_base(&config.api_base()?)?;
    let mut context = DashboardContext::new(Arc::new(gateway), preferences);
    context.credential_override = config.resolve_token()?;
    context.debounce_window = config.debounce_window();
    context.cache_ttl = config.cache_ttl();
    Ok(context)
}

/// Runs the bubbletea-rs program with the `DashboardApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // DashboardApp::init() takes the context from module-level storage.
    let program = Program::<DashboardApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
