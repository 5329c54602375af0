//! Sequential executor for coordinator commands.
//!
//! The driver owns a [`FetchCoordinator`] and runs every command it emits
//! against a gateway, one at a time, until the coordinator stops asking. It
//! backs the one-shot listing mode and integration tests; the dashboard runs
//! the same commands as bubbletea commands instead.

use std::time::Instant;

use crate::github::{OrganizationGateway, PersonalAccessToken};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::coordinator::{FetchCommand, FetchCoordinator, FetchOutcome, FetchPhase};
use super::sort::SortMode;
use super::view::QueryView;

/// Runs one command against the gateway.
pub async fn execute_command<G>(
    gateway: &G,
    command: &FetchCommand,
    credential: Option<&PersonalAccessToken>,
) -> FetchOutcome
where
    G: OrganizationGateway + ?Sized,
{
    match command {
        FetchCommand::ResolveOrganization { organization, .. } => FetchOutcome::Organization(
            gateway.resolve_organization(organization, credential).await,
        ),
        FetchCommand::ListRepositories {
            organization,
            params,
            ..
        } => FetchOutcome::Page {
            page: params.page,
            result: gateway
                .list_repositories(organization, params, credential)
                .await,
        },
    }
}

/// Elapsed milliseconds since `started`, saturating.
pub(crate) fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Records a [`TelemetryEvent::PageLoaded`] for a successful page outcome.
pub(crate) fn record_page_loaded(
    telemetry: &dyn TelemetrySink,
    organization: &str,
    outcome: &FetchOutcome,
    latency_ms: u64,
) {
    if let FetchOutcome::Page {
        page,
        result: Ok(repository_page),
    } = outcome
    {
        telemetry.record(TelemetryEvent::PageLoaded {
            organization: organization.to_owned(),
            page: *page,
            items: repository_page.len(),
            latency_ms,
        });
    }
}

/// Drives a [`FetchCoordinator`] against a gateway.
pub struct QueryDriver<'a, G: OrganizationGateway + ?Sized> {
    gateway: &'a G,
    coordinator: FetchCoordinator,
    credential: Option<PersonalAccessToken>,
    telemetry: &'a dyn TelemetrySink,
    phases: Vec<FetchPhase>,
}

impl<'a, G: OrganizationGateway + ?Sized> QueryDriver<'a, G> {
    /// Creates a driver with an anonymous credential and no telemetry.
    #[must_use]
    pub fn new(gateway: &'a G, coordinator: FetchCoordinator) -> Self {
        Self {
            gateway,
            coordinator,
            credential: None,
            telemetry: &NoopTelemetrySink,
            phases: Vec::new(),
        }
    }

    /// Sends `credential` with every request.
    #[must_use]
    pub fn with_credential(mut self, credential: Option<PersonalAccessToken>) -> Self {
        self.coordinator = self.coordinator.with_authenticated(credential.is_some());
        self.credential = credential;
        self
    }

    /// Records page telemetry to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Submits an organization name and runs stage one plus the first page.
    pub async fn query(&mut self, organization: &str) {
        let command = self.coordinator.set_query(organization, Instant::now());
        self.note_phase();
        self.run(command).await;
    }

    /// Replaces the credential, re-running the current query if its presence
    /// changed.
    pub async fn set_credential(&mut self, credential: Option<PersonalAccessToken>) {
        let authenticated = credential.is_some();
        self.credential = credential;
        let command = self
            .coordinator
            .set_authenticated(authenticated, Instant::now());
        self.note_phase();
        self.run(command).await;
    }

    /// Fetches the next page if one is available. Returns true if a request
    /// was made.
    pub async fn load_next_page(&mut self) -> bool {
        let Some(command) = self.coordinator.request_next_page() else {
            return false;
        };
        self.note_phase();
        self.run(Some(command)).await;
        true
    }

    /// Keeps loading pages until `page_limit` pages are merged or the listing
    /// ends. `None` loads everything.
    pub async fn load_pages(&mut self, page_limit: Option<u32>) {
        while page_limit.is_none_or(|limit| self.coordinator.pages_loaded() < limit) {
            if !self.load_next_page().await {
                break;
            }
        }
    }

    /// The coordinator being driven.
    #[must_use]
    pub const fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn view(&self, sort_mode: SortMode) -> QueryView {
        self.coordinator.view(sort_mode)
    }

    /// Every distinct phase the coordinator passed through, in order.
    #[must_use]
    pub fn phase_history(&self) -> &[FetchPhase] {
        &self.phases
    }

    async fn run(&mut self, first: Option<FetchCommand>) {
        let mut next = first;
        while let Some(command) = next.take() {
            let started = Instant::now();
            let outcome =
                execute_command(self.gateway, &command, self.credential.as_ref()).await;
            record_page_loaded(
                self.telemetry,
                command.organization(),
                &outcome,
                elapsed_millis(started),
            );
            next = self
                .coordinator
                .apply(command.ticket(), outcome, Instant::now());
            self.note_phase();
        }
    }

    fn note_phase(&mut self) {
        let phase = self.coordinator.phase();
        if self.phases.last() != Some(&phase) {
            self.phases.push(phase);
        }
    }
}
