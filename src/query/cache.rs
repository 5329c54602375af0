//! Short-lived memo of settled sessions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::session::{QuerySession, SessionKey};

/// Default time a settled session stays reusable.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub(crate) struct SessionCache {
    ttl: Duration,
    entries: HashMap<SessionKey, QuerySession>,
}

impl SessionCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub(crate) const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Keeps `session` if it is settled and still fresh. Failed and in-flight
    /// sessions are dropped.
    pub(crate) fn store(&mut self, session: QuerySession, now: Instant) {
        self.prune(now);
        if session.is_fresh(now, self.ttl) {
            self.entries.insert(session.key.clone(), session);
        }
    }

    /// Removes and returns the session for `key` if it is still fresh.
    pub(crate) fn take_fresh(&mut self, key: &SessionKey, now: Instant) -> Option<QuerySession> {
        let session = self.entries.remove(key)?;
        session.is_fresh(now, self.ttl).then_some(session)
    }

    fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries.retain(|_, session| session.is_fresh(now, ttl));
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
