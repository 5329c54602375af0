//! Input line editing, debounced organization queries and sort cycling.

use std::time::{Duration, Instant};

use bubbletea_rs::Cmd;

use crate::github::PersonalAccessToken;
use crate::tui::messages::AppMsg;
use crate::tui::state::InputMode;

use super::DashboardApp;

/// Sleeps for the debounce window, then reports it elapsed.
fn debounce_timer(window: Duration) -> Cmd {
    Box::pin(async move {
        tokio::time::sleep(window).await;
        Some(Box::new(AppMsg::DebounceElapsed) as Box<dyn std::any::Any + Send>)
    })
}

impl DashboardApp {
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_edit_organization(&mut self) -> Option<Cmd> {
        let current = if self.coordinator.query().is_empty() {
            self.preferences.organization().to_owned()
        } else {
            self.coordinator.query().to_owned()
        };
        self.input.begin(InputMode::Organization, &current);
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_edit_token(&mut self) -> Option<Cmd> {
        self.input.begin(InputMode::Token, "");
        None
    }

    pub(super) fn handle_input_char(&mut self, character: char, now: Instant) -> Option<Cmd> {
        self.input.push(character);
        self.schedule_debounce(now)
    }

    pub(super) fn handle_input_backspace(&mut self, now: Instant) -> Option<Cmd> {
        self.input.pop();
        self.schedule_debounce(now)
    }

    /// Restarts the debounce window for organization input.
    ///
    /// Token input is only applied on submit.
    fn schedule_debounce(&mut self, now: Instant) -> Option<Cmd> {
        if self.input.mode() != InputMode::Organization {
            return None;
        }
        self.debouncer.push(self.input.text().to_owned(), now);
        Some(debounce_timer(self.debouncer.window()))
    }

    pub(super) fn handle_input_submit(&mut self, now: Instant) -> Option<Cmd> {
        let mode = self.input.mode();
        let text = self.input.finish();
        match mode {
            InputMode::Organization => {
                self.debouncer.flush();
                self.submit_organization(&text, now)
            }
            InputMode::Token => self.apply_token(&text, now),
            InputMode::Browse => None,
        }
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_input_cancel(&mut self) -> Option<Cmd> {
        self.input.finish();
        None
    }

    /// Submits the pending name once its window has passed.
    ///
    /// Earlier timers find the deadline pushed back and do nothing.
    pub(super) fn handle_debounce_elapsed(&mut self, now: Instant) -> Option<Cmd> {
        let name = self.debouncer.poll(now)?;
        self.submit_organization(&name, now)
    }

    /// Remembers `name` and hands it to the coordinator.
    pub(super) fn submit_organization(&mut self, name: &str, now: Instant) -> Option<Cmd> {
        let trimmed = name.trim();
        if trimmed != self.coordinator.query() {
            self.cursor.home();
        }
        if let Err(error) = self.preferences.set_organization(trimmed) {
            self.report_persistence_error(&error);
        }

        match self.coordinator.set_query(trimmed, now) {
            Some(command) => Some(self.fetch_cmd(command)),
            None => self.maybe_load_more(),
        }
    }

    /// Switches credentials; a blank entry clears the stored token.
    fn apply_token(&mut self, text: &str, now: Instant) -> Option<Cmd> {
        let credential = if text.trim().is_empty() {
            None
        } else {
            match PersonalAccessToken::new(text) {
                Ok(token) => Some(token),
                Err(error) => {
                    self.status = Some(error.to_string());
                    return None;
                }
            }
        };

        self.status = Some(if credential.is_some() {
            "Token saved.".to_owned()
        } else {
            "Token cleared.".to_owned()
        });
        if let Err(error) = self.preferences.set_credential(credential.clone()) {
            self.report_persistence_error(&error);
        }
        self.credential = credential;

        self.coordinator
            .set_authenticated(self.credential.is_some(), now)
            .map(|command| self.fetch_cmd(command))
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_cycle_sort(&mut self) -> Option<Cmd> {
        let next = self.preferences.sort_mode().next();
        self.status = None;
        if let Err(error) = self.preferences.set_sort_mode(next) {
            self.report_persistence_error(&error);
        }
        self.cursor.home();
        None
    }
}
