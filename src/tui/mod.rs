//! Terminal dashboard for exploring an organization's repositories.
//!
//! The dashboard follows the bubbletea-rs Model-View-Update pattern:
//!
//! - **Model**: [`app::DashboardApp`] owns the fetch coordinator, debouncer,
//!   scroll trigger and preference store
//! - **View**: components under [`components`] render plain text
//! - **Update**: [`messages::AppMsg`] values drive state changes; network
//!   requests and debounce timers run as async commands
//!
//! # Startup context
//!
//! bubbletea-rs constructs the model through the static `Model::init()`, so
//! the gateway, preference store and tuning values are parked in module-level
//! storage with [`set_dashboard_context`] before the program starts. The
//! model takes them out once during `init()`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::github::{OrganizationGateway, PersonalAccessToken};
use crate::preferences::PreferenceStore;
use crate::query::{DEFAULT_CACHE_TTL, DEFAULT_DEBOUNCE_WINDOW};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;

pub use app::DashboardApp;

/// Everything the dashboard needs that cannot be built inside `init()`.
pub struct DashboardContext {
    /// Gateway used for every request.
    pub gateway: Arc<dyn OrganizationGateway>,
    /// Loaded preferences; the dashboard writes changes back through it.
    pub preferences: PreferenceStore,
    /// Credential for this run, taking precedence over the stored one.
    pub credential_override: Option<PersonalAccessToken>,
    /// Sink for page timing events.
    pub telemetry: Arc<dyn TelemetrySink>,
    /// Quiet period before typed input is queried.
    pub debounce_window: Duration,
    /// How long loaded organizations stay reusable.
    pub cache_ttl: Duration,
}

impl DashboardContext {
    /// Context with default tuning, no telemetry and no credential override.
    #[must_use]
    pub fn new(gateway: Arc<dyn OrganizationGateway>, preferences: PreferenceStore) -> Self {
        Self {
            gateway,
            preferences,
            credential_override: None,
            telemetry: Arc::new(NoopTelemetrySink),
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

static DASHBOARD_CONTEXT: Mutex<Option<DashboardContext>> = Mutex::new(None);

/// Parks the startup context for the next `DashboardApp::init()`.
///
/// Returns `false` if a context was already waiting; it is replaced.
pub fn set_dashboard_context(context: DashboardContext) -> bool {
    DASHBOARD_CONTEXT
        .lock()
        .map(|mut slot| slot.replace(context).is_none())
        .unwrap_or(false)
}

/// Takes the parked startup context, if any.
pub(crate) fn take_dashboard_context() -> Option<DashboardContext> {
    DASHBOARD_CONTEXT.lock().ok().and_then(|mut slot| slot.take())
}
