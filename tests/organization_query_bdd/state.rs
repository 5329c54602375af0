//! Scenario state and command execution for the organization query BDD
//! tests.
//!
//! Commands are executed one at a time against a real Octocrab gateway
//! pointed at Wiremock, the same way the dashboard runs them.

use std::sync::Arc;
use std::time::Instant;

use orgview::github::{ApiBase, OctocrabOrganizationGateway, PersonalAccessToken};
use orgview::query::{
    FetchCommand, FetchCoordinator, FetchPhase, ScrollTrigger, SentinelVisibility,
    execute_command,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::{SharedRuntime, ensure_runtime_and_server};

#[derive(ScenarioState, Default)]
pub(crate) struct QueryState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) gateway: Slot<Arc<OctocrabOrganizationGateway>>,
    pub(crate) coordinator: Slot<FetchCoordinator>,
    pub(crate) credential: Slot<PersonalAccessToken>,
    pub(crate) phases: Slot<Vec<FetchPhase>>,
}

/// Starts the runtime and server and builds a gateway pointing at it.
pub(crate) fn ensure_gateway(state: &QueryState) -> SharedRuntime {
    let runtime = ensure_runtime_and_server(&state.runtime, &state.server)
        .unwrap_or_else(|error| panic!("failed to start runtime and server: {error}"));

    if state.gateway.with_ref(|_| ()).is_none() {
        let uri = state
            .server
            .with_ref(MockServer::uri)
            .unwrap_or_else(|| panic!("mock server not initialised"));
        let api_base = ApiBase::parse(&uri)
            .unwrap_or_else(|error| panic!("mock server URI should parse: {error}"));
        let gateway = runtime
            .block_on(async { OctocrabOrganizationGateway::for_api_base(&api_base) })
            .unwrap_or_else(|error| panic!("gateway should build: {error}"));
        state.gateway.set(Arc::new(gateway));
    }

    runtime
}

/// Applies `start` to the coordinator and runs every command it leads to.
pub(crate) fn drive<F>(state: &QueryState, start: F)
where
    F: FnOnce(&mut FetchCoordinator, Instant) -> Option<FetchCommand>,
{
    let runtime = ensure_gateway(state);
    let gateway = state
        .gateway
        .get()
        .unwrap_or_else(|| panic!("gateway not initialised"));
    let credential = state.credential.get();
    let mut coordinator = state.coordinator.take().unwrap_or_default();
    let mut phases = state.phases.take().unwrap_or_default();

    let mut next = start(&mut coordinator, Instant::now());
    record_phase(&mut phases, coordinator.phase());
    while let Some(command) = next.take() {
        let outcome = runtime.block_on(execute_command(
            gateway.as_ref(),
            &command,
            credential.as_ref(),
        ));
        next = coordinator.apply(command.ticket(), outcome, Instant::now());
        record_phase(&mut phases, coordinator.phase());
    }

    state.coordinator.set(coordinator);
    state.phases.set(phases);
}

/// Keeps the sentinel fully visible until the trigger stops firing.
pub(crate) fn scroll_to_end(state: &QueryState) {
    let mut trigger = ScrollTrigger::default();
    let sentinel = SentinelVisibility::new(2, 2);
    loop {
        let status = state
            .coordinator
            .with_ref(FetchCoordinator::pagination_status)
            .unwrap_or_default();
        if trigger.evaluate(sentinel, status).is_none() {
            return;
        }
        drive(state, |coordinator, _| coordinator.request_next_page());
    }
}

fn record_phase(phases: &mut Vec<FetchPhase>, phase: FetchPhase) {
    if phases.last() != Some(&phase) {
        phases.push(phase);
    }
}
