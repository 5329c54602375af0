//! Orgview library crate for browsing a GitHub organization's repositories.
//!
//! The library resolves an organization through Octocrab, pages through its
//! public repositories on demand, and keeps the user's query, sort order and
//! credential in a small versioned preference store. The fetch sequencing is
//! a sans-IO state machine in [`query`], shared by the one-shot listing and
//! the interactive terminal dashboard in [`tui`].

pub mod config;
pub mod github;
pub mod persistence;
pub mod preferences;
pub mod query;
pub mod telemetry;
pub mod tui;

pub use config::{OperationMode, OrgviewConfig};
pub use github::{
    ApiBase, ErrorCategory, OctocrabOrganizationGateway, Organization, OrganizationGateway,
    OrganizationName, PersonalAccessToken, QueryError, Repository,
};
pub use preferences::{PreferenceStore, Preferences};
pub use query::{FetchCoordinator, FetchPhase, QueryDriver, QueryView, SortMode};
