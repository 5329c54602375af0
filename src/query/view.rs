//! Presentation snapshot of the current query.

use crate::github::{Organization, Repository};

use super::coordinator::FetchPhase;
use super::languages::LanguageShare;
use super::sort::SortMode;

/// Error banner to show, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorState {
    /// Nothing went wrong.
    #[default]
    None,
    /// Either stage hit the rate limit; a token would help.
    RateLimited,
    /// The organization does not exist.
    NotFound,
    /// Some other failure ended the session.
    Transient,
}

impl ErrorState {
    /// Banner for a phase.
    ///
    /// Only a stage-one 404 is `NotFound`; a 404 while paging means the
    /// organization vanished mid-session and reads as `Transient`.
    #[must_use]
    pub const fn from_phase(phase: FetchPhase) -> Self {
        match phase {
            FetchPhase::OrgNotFound => Self::NotFound,
            FetchPhase::OrgRateLimited => Self::RateLimited,
            FetchPhase::Failed { .. } => Self::Transient,
            FetchPhase::Idle
            | FetchPhase::ResolvingOrg
            | FetchPhase::FetchingPages { .. }
            | FetchPhase::AwaitingMore { .. }
            | FetchPhase::PagesSettled => Self::None,
        }
    }
}

/// Everything the presentation layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryView {
    /// Organization name of the session.
    pub query: String,
    /// Resolved organization.
    pub organization: Option<Organization>,
    /// Accumulated repositories in display order.
    pub repositories: Vec<Repository>,
    /// Top languages across the accumulated repositories.
    pub languages: Vec<LanguageShare>,
    /// Order applied to `repositories`.
    pub sort_mode: SortMode,
    /// Coordinator phase.
    pub phase: FetchPhase,
    /// Stage one is in flight.
    pub is_loading_org: bool,
    /// A page request is in flight.
    pub is_loading_page: bool,
    /// Another page can be requested.
    pub has_more: bool,
    /// Banner to show.
    pub error: ErrorState,
    /// Detail of the error that ended the session.
    pub error_message: Option<String>,
    /// Pages merged so far.
    pub pages_loaded: u32,
}

impl Default for QueryView {
    fn default() -> Self {
        Self {
            query: String::new(),
            organization: None,
            repositories: Vec::new(),
            languages: Vec::new(),
            sort_mode: SortMode::default(),
            phase: FetchPhase::Idle,
            is_loading_org: false,
            is_loading_page: false,
            has_more: false,
            error: ErrorState::None,
            error_message: None,
            pages_loaded: 0,
        }
    }
}
