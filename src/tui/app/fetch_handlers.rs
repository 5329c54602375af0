//! Gateway commands and the scroll-driven page trigger.

use std::any::Any;
use std::time::Instant;

use bubbletea_rs::Cmd;

use crate::query::{
    FetchCommand, FetchOutcome, FetchTicket, elapsed_millis, execute_command, record_page_loaded,
};
use crate::tui::components::sentinel_visibility;
use crate::tui::messages::AppMsg;

use super::DashboardApp;

impl DashboardApp {
    /// Runs `command` against the gateway in the background.
    pub(super) fn fetch_cmd(&self, command: FetchCommand) -> Cmd {
        let gateway = self.gateway.clone();
        let credential = self.credential.clone();
        Box::pin(async move {
            let started = Instant::now();
            let outcome = execute_command(gateway.as_ref(), &command, credential.as_ref()).await;
            Some(Box::new(AppMsg::FetchCompleted {
                ticket: command.ticket(),
                organization: command.organization().to_owned(),
                outcome,
                latency_ms: elapsed_millis(started),
            }) as Box<dyn Any + Send>)
        })
    }

    pub(super) fn handle_fetch_completed(
        &mut self,
        ticket: FetchTicket,
        organization: &str,
        outcome: &FetchOutcome,
        latency_ms: u64,
        now: Instant,
    ) -> Option<Cmd> {
        if ticket.generation() == self.coordinator.generation() {
            record_page_loaded(self.telemetry.as_ref(), organization, outcome, latency_ms);
        }

        let next = self.coordinator.apply(ticket, outcome.clone(), now);
        self.follow_cursor();
        match next {
            Some(command) => Some(self.fetch_cmd(command)),
            None => self.maybe_load_more(),
        }
    }

    /// Requests the next page when enough of the sentinel is on screen.
    pub(super) fn maybe_load_more(&mut self) -> Option<Cmd> {
        let visibility = sentinel_visibility(
            self.coordinator.repositories().len(),
            self.cursor.scroll_offset,
            self.list_height(),
        );
        let load_more = self
            .trigger
            .evaluate(visibility, self.coordinator.pagination_status())?;
        tracing::debug!(page = load_more.cursor, "sentinel visible; loading next page");

        self.coordinator
            .request_next_page()
            .map(|command| self.fetch_cmd(command))
    }
}
