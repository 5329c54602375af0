//! Per-organization query session state.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::github::{Organization, QueryError, Repository};

use super::coordinator::FetchPhase;

/// Identity of a session: the lower-cased name plus whether a credential is
/// in use. Rate limits differ between anonymous and authenticated callers,
/// so the two never share results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SessionKey {
    organization: String,
    authenticated: bool,
}

impl SessionKey {
    pub(crate) fn new(organization: &str, authenticated: bool) -> Self {
        Self {
            organization: organization.trim().to_ascii_lowercase(),
            authenticated,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct QuerySession {
    pub(crate) key: SessionKey,
    pub(crate) name: String,
    pub(crate) phase: FetchPhase,
    pub(crate) organization: Option<Organization>,
    pub(crate) repositories: Vec<Repository>,
    seen_ids: HashSet<u64>,
    pub(crate) pages_loaded: u32,
    pub(crate) error: Option<QueryError>,
    pub(crate) settled_at: Option<Instant>,
}

impl QuerySession {
    pub(crate) fn resolving(name: &str, key: SessionKey) -> Self {
        Self {
            key,
            name: name.to_owned(),
            phase: FetchPhase::ResolvingOrg,
            organization: None,
            repositories: Vec::new(),
            seen_ids: HashSet::new(),
            pages_loaded: 0,
            error: None,
            settled_at: None,
        }
    }

    pub(crate) fn transition(&mut self, phase: FetchPhase) {
        if self.phase != phase {
            tracing::debug!(
                organization = %self.name,
                from = ?self.phase,
                to = ?phase,
                "fetch phase changed"
            );
            self.phase = phase;
        }
    }

    /// Appends repositories not seen on earlier pages. Returns how many were
    /// kept.
    pub(crate) fn append_page(&mut self, items: Vec<Repository>) -> usize {
        let before = self.repositories.len();
        for repository in items {
            if self.seen_ids.insert(repository.id) {
                self.repositories.push(repository);
            } else {
                tracing::debug!(
                    organization = %self.name,
                    repository_id = repository.id,
                    "dropping repository repeated across pages"
                );
            }
        }
        self.repositories.len().saturating_sub(before)
    }

    pub(crate) const fn is_settled(&self) -> bool {
        matches!(
            self.phase,
            FetchPhase::AwaitingMore { .. } | FetchPhase::PagesSettled
        )
    }

    pub(crate) const fn is_failed(&self) -> bool {
        matches!(
            self.phase,
            FetchPhase::OrgNotFound | FetchPhase::OrgRateLimited | FetchPhase::Failed { .. }
        )
    }

    pub(crate) fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        self.is_settled()
            && self
                .settled_at
                .is_some_and(|settled_at| now.saturating_duration_since(settled_at) < ttl)
    }

    /// Whether submitting this session's key again should start over.
    pub(crate) fn needs_restart(&self, now: Instant, ttl: Duration) -> bool {
        self.is_failed() || (self.is_settled() && !self.is_fresh(now, ttl))
    }
}
