//! Dashboard application model implementing the MVU pattern.
//!
//! # Module Structure
//!
//! - `input_handlers`: organization and token entry, debounce, sort cycling
//! - `fetch_handlers`: gateway commands, results and scroll-driven paging
//! - `navigation`: cursor movement
//! - `rendering`: view output

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bubbletea_rs::{Cmd, Model};

use crate::github::{
    ListRepositoriesParams, Organization, OrganizationGateway, PersonalAccessToken, QueryError,
    RepositoryPage,
};
use crate::preferences::PreferenceStore;
use crate::query::{Debouncer, FetchCoordinator, ScrollTrigger, SortMode};
use crate::telemetry::TelemetrySink;

use super::input::map_key_to_message;
use super::messages::AppMsg;
use super::state::{InputLine, ListCursor};
use super::{DashboardContext, take_dashboard_context};

mod fetch_handlers;
mod input_handlers;
mod navigation;
mod rendering;

const DEFAULT_WIDTH: u16 = 100;
const DEFAULT_HEIGHT: u16 = 30;

/// Main application model for the dashboard.
pub struct DashboardApp {
    coordinator: FetchCoordinator,
    debouncer: Debouncer<String>,
    trigger: ScrollTrigger,
    preferences: PreferenceStore,
    credential: Option<PersonalAccessToken>,
    gateway: Arc<dyn OrganizationGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    input: InputLine,
    cursor: ListCursor,
    width: u16,
    height: u16,
    show_help: bool,
    status: Option<String>,
}

impl fmt::Debug for DashboardApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardApp")
            .field("coordinator", &self.coordinator)
            .field("preferences", &self.preferences)
            .field("input", &self.input)
            .field("cursor", &self.cursor)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl DashboardApp {
    /// Creates the model from its startup context.
    ///
    /// The credential is the context's override if present, otherwise the
    /// stored one.
    #[must_use]
    pub fn new(context: DashboardContext) -> Self {
        let credential = context
            .credential_override
            .or_else(|| context.preferences.credential().cloned());
        let coordinator = FetchCoordinator::new(context.cache_ttl)
            .with_authenticated(credential.is_some());

        Self {
            coordinator,
            debouncer: Debouncer::new(context.debounce_window),
            trigger: ScrollTrigger::default(),
            preferences: context.preferences,
            credential,
            gateway: context.gateway,
            telemetry: context.telemetry,
            input: InputLine::default(),
            cursor: ListCursor::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            show_help: false,
            status: None,
        }
    }

    /// Creates the model with explicit terminal dimensions.
    #[must_use]
    pub fn with_dimensions(context: DashboardContext, width: u16, height: u16) -> Self {
        let mut app = Self::new(context);
        app.width = width;
        app.height = height;
        app
    }

    /// Queries the stored organization, if there is one.
    pub fn start(&mut self) -> Option<Cmd> {
        let organization = self.preferences.organization().to_owned();
        if organization.trim().is_empty() {
            return None;
        }
        self.submit_organization(&organization, Self::now())
    }

    /// The fetch coordinator.
    #[must_use]
    pub const fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    /// The preference store.
    #[must_use]
    pub const fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Active sort mode.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.preferences.sort_mode()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor.position
    }

    /// Status line message, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns true while a credential is in use.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Current instant on the runtime clock.
    ///
    /// Follows tokio's clock so paused-time tests drive debounce windows and
    /// cache TTLs along with timer commands.
    fn now() -> Instant {
        tokio::time::Instant::now().into_std()
    }

    /// Handles a message and updates state accordingly.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_input() {
            return self.handle_input_msg(msg);
        }
        if msg.is_data() {
            return self.handle_data_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::CursorUp => self.handle_cursor_up(),
            AppMsg::CursorDown => self.handle_cursor_down(),
            AppMsg::PageUp => self.handle_page_up(),
            AppMsg::PageDown => self.handle_page_down(),
            AppMsg::Home => self.handle_home(),
            AppMsg::End => self.handle_end(),
            _ => None,
        }
    }

    fn handle_input_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let now = Self::now();
        match msg {
            AppMsg::EditOrganization => self.handle_edit_organization(),
            AppMsg::EditToken => self.handle_edit_token(),
            AppMsg::InputChar(character) => self.handle_input_char(*character, now),
            AppMsg::InputBackspace => self.handle_input_backspace(now),
            AppMsg::InputSubmit => self.handle_input_submit(now),
            AppMsg::InputCancel => self.handle_input_cancel(),
            AppMsg::CycleSort => self.handle_cycle_sort(),
            _ => None,
        }
    }

    fn handle_data_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let now = Self::now();
        match msg {
            AppMsg::DebounceElapsed => self.handle_debounce_elapsed(now),
            AppMsg::FetchCompleted {
                ticket,
                organization,
                outcome,
                latency_ms,
            } => self.handle_fetch_completed(*ticket, organization, outcome, *latency_ms, now),
            _ => None,
        }
    }

    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => None,
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        self.follow_cursor();
        self.maybe_load_more()
    }

    fn report_persistence_error(&mut self, error: &crate::persistence::PersistenceError) {
        tracing::warn!(%error, "failed to save preferences");
        self.status = Some(format!("Preferences not saved: {error}"));
    }
}

/// Gateway used when the dashboard starts without a context.
struct UnconfiguredGateway;

impl UnconfiguredGateway {
    fn error() -> QueryError {
        QueryError::Configuration {
            message: "dashboard started without a GitHub gateway".to_owned(),
        }
    }
}

#[async_trait]
impl OrganizationGateway for UnconfiguredGateway {
    async fn resolve_organization(
        &self,
        _organization: &str,
        _credential: Option<&PersonalAccessToken>,
    ) -> Result<Organization, QueryError> {
        Err(Self::error())
    }

    async fn list_repositories(
        &self,
        _organization: &str,
        _params: &ListRepositoriesParams,
        _credential: Option<&PersonalAccessToken>,
    ) -> Result<RepositoryPage, QueryError> {
        Err(Self::error())
    }
}

impl Model for DashboardApp {
    fn init() -> (Self, Option<Cmd>) {
        let context = take_dashboard_context().unwrap_or_else(|| {
            DashboardContext::new(Arc::new(UnconfiguredGateway), PreferenceStore::in_memory())
        });
        let mut app = Self::new(context);
        let cmd = app.start();
        (app, cmd)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                self.show_help = false;
                return None;
            }
            let mapped = map_key_to_message(key_msg, self.input.mode())?;
            return self.handle_message(&mapped);
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_message(&AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            });
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return Self::render_help_overlay();
        }
        self.render()
    }
}
