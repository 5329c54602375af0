//! Cursor and scroll position in the repository list.
//!
//! The scrollable content is the repository rows followed by a sentinel
//! region of [`SENTINEL_ROWS`](crate::tui::components::SENTINEL_ROWS) rows.
//! Moving onto the last repository scrolls far enough to reveal the
//! sentinel, which is what asks for the next page.

/// Selected row and first visible row of the repository list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    /// Index of the selected repository in display order.
    pub position: usize,
    /// Index of the first visible row.
    pub scroll_offset: usize,
}

impl ListCursor {
    /// Moves up by `step`, stopping at the first row.
    pub const fn move_up(&mut self, step: usize) {
        self.position = self.position.saturating_sub(step);
    }

    /// Moves down by `step`, stopping at the last of `count` rows.
    pub fn move_down(&mut self, step: usize, count: usize) {
        self.position = self
            .position
            .saturating_add(step)
            .min(count.saturating_sub(1));
    }

    /// Jumps to the first row.
    pub const fn home(&mut self) {
        self.position = 0;
        self.scroll_offset = 0;
    }

    /// Jumps to the last of `count` rows.
    pub const fn end(&mut self, count: usize) {
        self.position = count.saturating_sub(1);
    }

    /// Keeps the cursor within `count` rows.
    pub fn clamp(&mut self, count: usize) {
        self.position = self.position.min(count.saturating_sub(1));
    }

    /// Adjusts the scroll offset so the cursor stays visible.
    ///
    /// On the last row the view scrolls past it by `trailing_rows` so the
    /// sentinel shows, as long as the cursor itself stays on screen.
    pub fn follow(&mut self, count: usize, visible_height: usize, trailing_rows: usize) {
        if visible_height == 0 {
            return;
        }

        if self.position < self.scroll_offset {
            self.scroll_offset = self.position;
        }
        let viewport_end = self.scroll_offset.saturating_add(visible_height);
        if self.position >= viewport_end {
            self.scroll_offset = self
                .position
                .saturating_sub(visible_height.saturating_sub(1));
        }

        let at_last_row = count > 0 && self.position == count.saturating_sub(1);
        if at_last_row {
            let reveal = count
                .saturating_add(trailing_rows)
                .saturating_sub(visible_height);
            self.scroll_offset = self.scroll_offset.max(reveal).min(self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ListCursor;

    #[rstest]
    fn movement_is_clamped() {
        let mut cursor = ListCursor::default();

        cursor.move_up(1);
        assert_eq!(cursor.position, 0);

        cursor.move_down(50, 14);
        assert_eq!(cursor.position, 13);

        cursor.clamp(5);
        assert_eq!(cursor.position, 4);
    }

    #[rstest]
    fn following_keeps_the_cursor_in_view() {
        let mut cursor = ListCursor {
            position: 12,
            scroll_offset: 0,
        };

        cursor.follow(30, 5, 2);

        assert_eq!(cursor.scroll_offset, 8);
    }

    #[rstest]
    fn last_row_reveals_the_sentinel() {
        let mut cursor = ListCursor::default();
        cursor.end(10);

        cursor.follow(10, 6, 2);

        assert_eq!(cursor.position, 9);
        assert_eq!(cursor.scroll_offset, 6);
    }

    #[rstest]
    fn tiny_viewport_never_hides_the_cursor() {
        let mut cursor = ListCursor::default();
        cursor.end(10);

        cursor.follow(10, 1, 2);

        assert_eq!(cursor.scroll_offset, 9);
    }

    #[rstest]
    fn home_resets_scrolling() {
        let mut cursor = ListCursor {
            position: 7,
            scroll_offset: 4,
        };

        cursor.home();

        assert_eq!(cursor, ListCursor::default());
    }
}
