//! Rendering logic for the dashboard.
//!
//! These are pure query methods; the list height computed here is also used
//! by navigation to decide how far the sentinel is from view.

use super::DashboardApp;
use crate::query::{FetchPhase, QueryView};
use crate::tui::components::{
    LanguageChartComponent, OrganizationSummaryComponent, RepositoryListComponent,
    RepositoryListViewContext, SentinelState, truncate_to_display_width_with_ellipsis,
};
use crate::tui::state::InputMode;

const MIN_LIST_HEIGHT: usize = 3;
const STATUS_BAR_ROWS: usize = 1;

impl DashboardApp {
    /// Renders the full dashboard.
    pub(super) fn render(&self) -> String {
        let view = self.coordinator.view(self.sort_mode());
        let mut output = self.render_top_section(&view);

        output.push_str(&RepositoryListComponent::view(&RepositoryListViewContext {
            repositories: &view.repositories,
            cursor: self.cursor,
            visible_height: self.list_height_for(&view),
            max_width: self.max_width(),
            sentinel: Self::sentinel_state(&view),
        }));
        output.push_str(&self.render_detail(&view));
        output.push_str(&self.render_status_bar());
        output
    }

    /// Rows available to the repository list, sentinel included.
    pub(super) fn list_height(&self) -> usize {
        self.list_height_for(&self.coordinator.view(self.sort_mode()))
    }

    fn list_height_for(&self, view: &QueryView) -> usize {
        let top_rows = self.render_top_section(view).lines().count();
        let detail_rows = self.render_detail(view).lines().count();
        usize::from(self.height)
            .saturating_sub(top_rows)
            .saturating_sub(detail_rows)
            .saturating_sub(STATUS_BAR_ROWS)
            .max(MIN_LIST_HEIGHT)
    }

    fn max_width(&self) -> usize {
        usize::from(self.width)
    }

    fn render_top_section(&self, view: &QueryView) -> String {
        let mut output = self.render_header(view);
        output.push_str(&self.render_input_line());
        output.push_str(&OrganizationSummaryComponent::view(view, self.max_width()));
        output.push_str(&LanguageChartComponent::view(
            &view.languages,
            self.max_width(),
        ));
        if view.organization.is_some() {
            output.push_str(&Self::render_sort_line(view));
            output.push_str(&RepositoryListComponent::heading(self.max_width()));
        }
        output
    }

    fn render_detail(&self, view: &QueryView) -> String {
        RepositoryListComponent::detail(
            view.repositories.get(self.cursor.position),
            self.max_width(),
        )
    }

    fn render_header(&self, view: &QueryView) -> String {
        let loading = if view.is_loading_org || view.is_loading_page {
            " [Loading...]"
        } else {
            ""
        };
        let line = format!("orgview - GitHub organization dashboard{loading}");
        format!(
            "{}\n",
            truncate_to_display_width_with_ellipsis(&line, self.max_width())
        )
    }

    fn render_input_line(&self) -> String {
        let line = match self.input.mode() {
            InputMode::Organization => format!("Organization: {}_", self.input.display_text()),
            InputMode::Token => format!("Token: {}_", self.input.display_text()),
            InputMode::Browse => {
                let credential = if self.credential.is_some() {
                    "token"
                } else {
                    "anonymous"
                };
                format!(
                    "Organization: {}  [{credential}]",
                    self.coordinator.query()
                )
            }
        };
        format!(
            "{}\n",
            truncate_to_display_width_with_ellipsis(&line, self.max_width())
        )
    }

    fn render_sort_line(view: &QueryView) -> String {
        format!(
            "Sort: {}  ({} loaded, {} pages)\n",
            view.sort_mode.label(),
            view.repositories.len(),
            view.pages_loaded
        )
    }

    fn sentinel_state(view: &QueryView) -> SentinelState {
        if view.is_loading_page {
            SentinelState::Loading
        } else if view.has_more {
            SentinelState::More
        } else if view.phase == FetchPhase::PagesSettled {
            SentinelState::End
        } else {
            SentinelState::Hidden
        }
    }

    /// Renders the status bar with the last message or key hints.
    fn render_status_bar(&self) -> String {
        if let Some(status) = &self.status {
            return format!("{status}\n");
        }
        let hints = if self.input.is_editing() {
            "Enter:submit  Esc:cancel"
        } else if self.width <= 80 {
            "q:quit  ?:help  /:org  s:sort"
        } else {
            "j/k:move  /:organization  t:token  s:sort  ?:help  q:quit"
        };
        format!("{hints}\n")
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay() -> String {
        let help_text = r"
=== Keyboard Shortcuts ===

Navigation:
  j, Down    Move cursor down
  k, Up      Move cursor up
  PgDn       Page down
  PgUp       Page up
  Home, g    Go to first repository
  End, G     Go to last repository

Query:
  /          Edit organization name
  t          Enter a personal access token (empty clears it)
  s          Cycle sort order

Editing:
  Enter      Submit now
  Esc        Stop editing
  Backspace  Delete one character

Other:
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}
