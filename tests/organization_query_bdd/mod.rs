//! Support modules for the organization query BDD tests.

pub(crate) mod harness;
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use harness::{mount_missing_organization, mount_organization, mount_rate_limited};
pub(crate) use state::{QueryState, drive, ensure_gateway, scroll_to_end};
