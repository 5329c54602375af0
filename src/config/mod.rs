//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Lowest to highest:
//!
//! 1. **Defaults** – built-in application defaults
//! 2. **Configuration file** – `.orgview.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `ORGVIEW_ORG`, `ORGVIEW_TOKEN`, and so on,
//!    plus `GITHUB_TOKEN` as a fallback for the token
//! 4. **Command-line arguments** – `--org`/`-o`, `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! org = "rust-lang"
//! token = "ghp_example"
//! sort = "forks"
//! pages = 3
//! database_url = "orgview.sqlite"
//! cache_ttl_seconds = 300
//! debounce_ms = 500
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::{ApiBase, GITHUB_API_BASE, PersonalAccessToken, QueryError};
use crate::query::{DEFAULT_CACHE_TTL, DEFAULT_DEBOUNCE_WINDOW, SortMode};

/// What the binary should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply database migrations and exit.
    MigrateDatabase,
    /// Print one organization's profile and repositories.
    Listing,
    /// Run the interactive dashboard.
    Dashboard,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use orgview::OrgviewConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = OrgviewConfig::load().expect("failed to load configuration");
/// let sort = config.sort_mode().expect("sort mode should parse");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "ORGVIEW",
    discovery(
        dotfile_name = ".orgview.toml",
        config_file_name = "orgview.toml",
        app_name = "orgview"
    )
)]
pub struct OrgviewConfig {
    /// GitHub organization to show.
    ///
    /// Can be provided via:
    /// - CLI: `--org <NAME>` or `-o <NAME>`
    /// - Environment: `ORGVIEW_ORG`
    /// - Config file: `org = "..."`
    #[ortho_config(cli_short = 'o')]
    pub org: Option<String>,

    /// Personal access token sent as a bearer credential.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `ORGVIEW_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository order: `stars`, `forks` or `updated`.
    #[ortho_config(cli_short = 's')]
    pub sort: Option<String>,

    /// Pages the listing mode loads. `0` loads every page.
    #[ortho_config(cli_short = 'p')]
    pub pages: u32,

    /// GitHub REST API base URL, for GitHub Enterprise or tests.
    #[ortho_config()]
    pub api_base: String,

    /// Local `SQLite` database URL/path where preferences are stored.
    ///
    /// Without it, preferences last only for the current process.
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    #[ortho_config()]
    pub migrate_db: bool,

    /// Launches the interactive dashboard.
    ///
    /// Can be provided via:
    /// - CLI: `--tui` / `-T`
    /// - Config file: `tui = true`
    #[ortho_config(cli_short = 'T')]
    pub tui: bool,

    /// How long a fully loaded organization stays reusable, in seconds.
    #[ortho_config()]
    pub cache_ttl_seconds: u64,

    /// Quiet period after the last keystroke before a query runs, in
    /// milliseconds.
    #[ortho_config()]
    pub debounce_ms: u64,
}

/// Pages loaded by the listing mode unless configured.
pub const DEFAULT_LISTING_PAGES: u32 = 1;

impl Default for OrgviewConfig {
    fn default() -> Self {
        Self {
            org: None,
            token: None,
            sort: None,
            pages: DEFAULT_LISTING_PAGES,
            api_base: GITHUB_API_BASE.to_owned(),
            database_url: None,
            migrate_db: false,
            tui: false,
            cache_ttl_seconds: DEFAULT_CACHE_TTL.as_secs(),
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE_WINDOW.as_millis()).unwrap_or(500),
        }
    }
}

impl OrgviewConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// Returns `Ok(None)` when neither provides one; anonymous access is
    /// allowed.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingToken`] when the token is blank.
    pub fn resolve_token(&self) -> Result<Option<PersonalAccessToken>, QueryError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .map(PersonalAccessToken::new)
            .transpose()
    }

    /// Parses the configured sort mode, if any.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Configuration`] for an unknown mode.
    pub fn sort_mode(&self) -> Result<Option<SortMode>, QueryError> {
        self.sort
            .as_deref()
            .map(str::parse::<SortMode>)
            .transpose()
            .map_err(|error| QueryError::Configuration {
                message: error.to_string(),
            })
    }

    /// Parses the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Configuration`] when the URL is not http(s).
    pub fn api_base(&self) -> Result<ApiBase, QueryError> {
        ApiBase::parse(&self.api_base)
    }

    /// Page limit for the listing mode; `None` means no limit.
    #[must_use]
    pub const fn page_limit(&self) -> Option<u32> {
        if self.pages == 0 {
            None
        } else {
            Some(self.pages)
        }
    }

    /// TTL of the settled-session cache.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Debounce window for live organization input.
    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Organization name from configuration, if non-blank.
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.org
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Determines the operation mode.
    ///
    /// `--migrate-db` wins, then `--tui`. Otherwise the listing runs when an
    /// organization is known, from configuration or from `stored_organization`;
    /// with nothing to list, the dashboard opens so one can be entered.
    #[must_use]
    pub fn operation_mode(&self, stored_organization: Option<&str>) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.tui {
            OperationMode::Dashboard
        } else if self.organization().is_some()
            || stored_organization.is_some_and(|name| !name.trim().is_empty())
        {
            OperationMode::Listing
        } else {
            OperationMode::Dashboard
        }
    }
}

#[cfg(test)]
mod tests;
