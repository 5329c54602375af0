//! Cursor movement over the repository list.
//!
//! Every move keeps the cursor in view and then checks whether the load-more
//! sentinel has scrolled into sight.

use bubbletea_rs::Cmd;

use crate::tui::components::SENTINEL_ROWS;

use super::DashboardApp;

impl DashboardApp {
    fn repository_count(&self) -> usize {
        self.coordinator.repositories().len()
    }

    /// Re-clamps the cursor and scrolls it into view.
    pub(super) fn follow_cursor(&mut self) {
        let count = self.repository_count();
        let height = self.list_height();
        self.cursor.clamp(count);
        self.cursor.follow(count, height, SENTINEL_ROWS);
    }

    fn after_move(&mut self) -> Option<Cmd> {
        self.follow_cursor();
        self.maybe_load_more()
    }

    pub(super) fn handle_cursor_up(&mut self) -> Option<Cmd> {
        self.cursor.move_up(1);
        self.after_move()
    }

    pub(super) fn handle_cursor_down(&mut self) -> Option<Cmd> {
        self.cursor.move_down(1, self.repository_count());
        self.after_move()
    }

    pub(super) fn handle_page_up(&mut self) -> Option<Cmd> {
        self.cursor.move_up(self.list_height());
        self.after_move()
    }

    pub(super) fn handle_page_down(&mut self) -> Option<Cmd> {
        let page = self.list_height();
        self.cursor.move_down(page, self.repository_count());
        self.after_move()
    }

    pub(super) fn handle_home(&mut self) -> Option<Cmd> {
        self.cursor.home();
        self.after_move()
    }

    pub(super) fn handle_end(&mut self) -> Option<Cmd> {
        self.cursor.end(self.repository_count());
        self.after_move()
    }
}
