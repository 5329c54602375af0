//! Two-stage fetch coordination.
//!
//! [`FetchCoordinator`] is a state machine with no I/O of its own. Every
//! request it wants made comes back as a [`FetchCommand`]; the caller runs it
//! against an [`OrganizationGateway`](crate::github::OrganizationGateway) and
//! hands the result to [`FetchCoordinator::apply`] together with the
//! command's ticket. Tickets carry a generation number that changes whenever
//! the session is replaced, so results for an abandoned query are dropped.
//!
//! Stage one resolves the organization. Only after it succeeds does stage
//! two fetch repository pages, one at a time, each further page requested
//! explicitly through [`FetchCoordinator::request_next_page`].

use std::time::{Duration, Instant};

use crate::github::{
    ErrorCategory, ListRepositoriesParams, Organization, PAGE_SIZE, QueryError, Repository,
    RepositoryPage,
};

use super::cache::SessionCache;
use super::languages::language_breakdown;
use super::scroll::PaginationStatus;
use super::session::{QuerySession, SessionKey};
use super::sort::{SortMode, sort_repositories};
use super::view::{ErrorState, QueryView};

/// Which stage a transient failure ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// Resolving the organization.
    Organization,
    /// Listing repositories.
    Repositories,
}

/// Position of the current session in the fetch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No organization name entered.
    Idle,
    /// Waiting for the organization profile.
    ResolvingOrg,
    /// The organization does not exist.
    OrgNotFound,
    /// Either stage hit the API rate limit.
    OrgRateLimited,
    /// Waiting for repository page `cursor`.
    FetchingPages {
        /// Page being fetched.
        cursor: u32,
    },
    /// The last page was full; `next_cursor` can be requested.
    AwaitingMore {
        /// Page the next request will fetch.
        next_cursor: u32,
    },
    /// A short page arrived; the listing is complete.
    PagesSettled,
    /// A transient failure ended the session.
    Failed {
        /// Stage that failed.
        stage: FetchStage,
    },
}

/// Identifies the session a command was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    /// Session generation the ticket belongs to.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// A request the coordinator wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    /// Stage one.
    ResolveOrganization {
        /// Ticket to hand back with the outcome.
        ticket: FetchTicket,
        /// Organization name as entered.
        organization: String,
    },
    /// Stage two, one page.
    ListRepositories {
        /// Ticket to hand back with the outcome.
        ticket: FetchTicket,
        /// Organization name as entered.
        organization: String,
        /// Page to fetch.
        params: ListRepositoriesParams,
    },
}

impl FetchCommand {
    /// Ticket to hand back with the outcome.
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        match self {
            Self::ResolveOrganization { ticket, .. } | Self::ListRepositories { ticket, .. } => {
                *ticket
            }
        }
    }

    /// Organization the command concerns.
    #[must_use]
    pub fn organization(&self) -> &str {
        match self {
            Self::ResolveOrganization { organization, .. }
            | Self::ListRepositories { organization, .. } => organization,
        }
    }
}

/// Result of running a [`FetchCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result of [`FetchCommand::ResolveOrganization`].
    Organization(Result<Organization, QueryError>),
    /// Result of [`FetchCommand::ListRepositories`].
    Page {
        /// Page that was requested.
        page: u32,
        /// Result of the request.
        result: Result<RepositoryPage, QueryError>,
    },
}

/// Coordinates organization resolution and incremental repository paging.
#[derive(Debug, Clone)]
pub struct FetchCoordinator {
    page_size: u8,
    generation: u64,
    authenticated: bool,
    session: Option<QuerySession>,
    cache: SessionCache,
}

impl FetchCoordinator {
    /// Creates an idle coordinator whose settled sessions stay reusable for
    /// `cache_ttl`.
    #[must_use]
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            page_size: PAGE_SIZE,
            generation: 0,
            authenticated: false,
            session: None,
            cache: SessionCache::new(cache_ttl),
        }
    }

    /// Overrides the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets whether requests will carry a credential, without re-querying.
    ///
    /// Use before the first query; afterwards use
    /// [`FetchCoordinator::set_authenticated`].
    #[must_use]
    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Submits a (debounced) organization name.
    ///
    /// A different name replaces the session: the current one is cached if
    /// settled, a fresh cached session for the new name is restored without
    /// any request, and otherwise stage one starts. Submitting the current
    /// name again does nothing unless its session failed or went stale.
    pub fn set_query(&mut self, organization: &str, now: Instant) -> Option<FetchCommand> {
        let name = organization.trim();
        let key = SessionKey::new(name, self.authenticated);

        match &self.session {
            None if name.is_empty() => return None,
            Some(session) if session.key == key && !session.needs_restart(now, self.cache.ttl()) => {
                return None;
            }
            _ => {}
        }

        self.replace_session(name, key, now)
    }

    /// Records whether requests now carry a credential.
    ///
    /// A change re-runs the current name under the new credential state;
    /// results gathered under the old state stay cached for it.
    pub fn set_authenticated(&mut self, authenticated: bool, now: Instant) -> Option<FetchCommand> {
        if self.authenticated == authenticated {
            return None;
        }
        self.authenticated = authenticated;

        let name = self.session.as_ref()?.name.clone();
        let key = SessionKey::new(&name, authenticated);
        self.replace_session(&name, key, now)
    }

    /// Requests the next page if the session is waiting for one.
    ///
    /// Returns `None` while a request is in flight or once the listing is
    /// complete, so repeated triggers are harmless.
    pub fn request_next_page(&mut self) -> Option<FetchCommand> {
        let ticket = self.ticket();
        let page_size = self.page_size;
        let session = self.session.as_mut()?;
        let FetchPhase::AwaitingMore { next_cursor } = session.phase else {
            return None;
        };

        session.transition(FetchPhase::FetchingPages {
            cursor: next_cursor,
        });
        Some(FetchCommand::ListRepositories {
            ticket,
            organization: session.name.clone(),
            params: ListRepositoriesParams::for_page(next_cursor).with_per_page(page_size),
        })
    }

    /// Applies the outcome of a command issued under `ticket`.
    ///
    /// Outcomes for a replaced session, or that do not match the request the
    /// session is waiting on, are ignored. A successful stage one returns the
    /// command for the first page.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        outcome: FetchOutcome,
        now: Instant,
    ) -> Option<FetchCommand> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "ignoring result for a superseded query"
            );
            return None;
        }

        match outcome {
            FetchOutcome::Organization(result) => self.apply_organization(result),
            FetchOutcome::Page { page, result } => {
                self.apply_page(page, result, now);
                None
            }
        }
    }

    fn apply_organization(
        &mut self,
        result: Result<Organization, QueryError>,
    ) -> Option<FetchCommand> {
        let ticket = self.ticket();
        let page_size = self.page_size;
        let session = self.session.as_mut()?;
        if session.phase != FetchPhase::ResolvingOrg {
            tracing::debug!(phase = ?session.phase, "ignoring unexpected organization result");
            return None;
        }

        match result {
            Ok(organization) => {
                session.organization = Some(organization);
                session.transition(FetchPhase::FetchingPages { cursor: 1 });
                Some(FetchCommand::ListRepositories {
                    ticket,
                    organization: session.name.clone(),
                    params: ListRepositoriesParams::for_page(1).with_per_page(page_size),
                })
            }
            Err(error) => {
                let phase = match error.category() {
                    ErrorCategory::NotFound => FetchPhase::OrgNotFound,
                    ErrorCategory::RateLimited => FetchPhase::OrgRateLimited,
                    ErrorCategory::Transient => FetchPhase::Failed {
                        stage: FetchStage::Organization,
                    },
                };
                tracing::debug!(organization = %session.name, %error, "organization lookup failed");
                session.error = Some(error);
                session.transition(phase);
                None
            }
        }
    }

    fn apply_page(
        &mut self,
        page: u32,
        result: Result<RepositoryPage, QueryError>,
        now: Instant,
    ) {
        let page_size = usize::from(self.page_size);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase != (FetchPhase::FetchingPages { cursor: page }) {
            tracing::debug!(page, phase = ?session.phase, "ignoring unexpected page result");
            return;
        }

        match result {
            Ok(repository_page) => {
                let complete = repository_page.len() < page_size;
                session.append_page(repository_page.into_items());
                session.pages_loaded = page;
                session.settled_at = Some(now);
                session.transition(if complete {
                    FetchPhase::PagesSettled
                } else {
                    FetchPhase::AwaitingMore {
                        next_cursor: page.saturating_add(1),
                    }
                });
            }
            Err(error) => {
                // Pages already merged stay visible; paging stops here.
                let phase = if error.category() == ErrorCategory::RateLimited {
                    FetchPhase::OrgRateLimited
                } else {
                    FetchPhase::Failed {
                        stage: FetchStage::Repositories,
                    }
                };
                tracing::debug!(organization = %session.name, page, %error, "page fetch failed");
                session.error = Some(error);
                session.transition(phase);
            }
        }
    }

    fn replace_session(&mut self, name: &str, key: SessionKey, now: Instant) -> Option<FetchCommand> {
        if let Some(previous) = self.session.take()
            && previous.key != key
        {
            self.cache.store(previous, now);
        }
        self.generation = self.generation.wrapping_add(1);

        if name.is_empty() {
            tracing::debug!("organization query cleared");
            return None;
        }

        if let Some(cached) = self.cache.take_fresh(&key, now) {
            tracing::debug!(organization = %name, phase = ?cached.phase, "restored cached session");
            self.session = Some(cached);
            return None;
        }

        tracing::debug!(organization = %name, generation = self.generation, "starting query");
        self.session = Some(QuerySession::resolving(name, key));
        Some(FetchCommand::ResolveOrganization {
            ticket: self.ticket(),
            organization: name.to_owned(),
        })
    }

    const fn ticket(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        self.session
            .as_ref()
            .map_or(FetchPhase::Idle, |session| session.phase)
    }

    /// Current session generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether requests carry a credential.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Organization name of the current session, as entered.
    #[must_use]
    pub fn query(&self) -> &str {
        self.session
            .as_ref()
            .map_or("", |session| session.name.as_str())
    }

    /// Resolved organization, once stage one succeeded.
    #[must_use]
    pub fn organization(&self) -> Option<&Organization> {
        self.session.as_ref()?.organization.as_ref()
    }

    /// Accumulated repositories in fetch order.
    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        self.session
            .as_ref()
            .map(|session| session.repositories.as_slice())
            .unwrap_or_default()
    }

    /// Error that ended the session, if any.
    #[must_use]
    pub fn error(&self) -> Option<&QueryError> {
        self.session.as_ref()?.error.as_ref()
    }

    /// Presentation category of the session's error.
    #[must_use]
    pub fn error_state(&self) -> ErrorState {
        ErrorState::from_phase(self.phase())
    }

    /// Pages merged into the session.
    #[must_use]
    pub fn pages_loaded(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(0, |session| session.pages_loaded)
    }

    /// Paging position for the scroll trigger.
    #[must_use]
    pub fn pagination_status(&self) -> PaginationStatus {
        let phase = self.phase();
        PaginationStatus {
            generation: self.generation,
            next_cursor: match phase {
                FetchPhase::AwaitingMore { next_cursor } => Some(next_cursor),
                _ => None,
            },
            in_flight: matches!(
                phase,
                FetchPhase::ResolvingOrg | FetchPhase::FetchingPages { .. }
            ),
        }
    }

    /// Snapshot of the session for presentation, sorted by `sort_mode`.
    #[must_use]
    pub fn view(&self, sort_mode: SortMode) -> QueryView {
        let phase = self.phase();
        let repositories = self.repositories();
        QueryView {
            query: self.query().to_owned(),
            organization: self.organization().cloned(),
            repositories: sort_repositories(repositories, sort_mode),
            languages: language_breakdown(repositories),
            sort_mode,
            phase,
            is_loading_org: phase == FetchPhase::ResolvingOrg,
            is_loading_page: matches!(phase, FetchPhase::FetchingPages { .. }),
            has_more: matches!(phase, FetchPhase::AwaitingMore { .. }),
            error: ErrorState::from_phase(phase),
            error_message: self.error().map(ToString::to_string),
            pages_loaded: self.pages_loaded(),
        }
    }
}

impl Default for FetchCoordinator {
    fn default() -> Self {
        Self::new(super::cache::DEFAULT_CACHE_TTL)
    }
}
