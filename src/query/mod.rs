//! Organization query coordination.
//!
//! This module holds the parts of the dashboard that decide *when* to talk to
//! GitHub and what to do with the answers, independent of any terminal:
//!
//! - [`Debouncer`] turns keystrokes into settled organization names.
//! - [`FetchCoordinator`] sequences organization resolution before repository
//!   paging, accumulates pages, and caches settled sessions.
//! - [`ScrollTrigger`] converts sentinel visibility into page requests.
//! - [`sort_repositories`] and [`language_breakdown`] derive what is shown.
//! - [`QueryDriver`] runs coordinator commands sequentially against a gateway.

mod cache;
mod coordinator;
mod debounce;
mod driver;
mod languages;
mod scroll;
mod session;
mod sort;
mod view;

pub use cache::DEFAULT_CACHE_TTL;
pub use coordinator::{
    FetchCommand, FetchCoordinator, FetchOutcome, FetchPhase, FetchStage, FetchTicket,
};
pub use debounce::{DEFAULT_DEBOUNCE_WINDOW, Debouncer};
pub use driver::{QueryDriver, execute_command};
pub(crate) use driver::{elapsed_millis, record_page_loaded};
pub use languages::{LanguageShare, MAX_LANGUAGES, language_breakdown};
pub use scroll::{
    DEFAULT_VISIBILITY_THRESHOLD_PERCENT, LoadMore, PaginationStatus, ScrollTrigger,
    SentinelVisibility,
};
pub use sort::{ParseSortModeError, SortMode, sort_repositories};
pub use view::{ErrorState, QueryView};
