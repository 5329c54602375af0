//! Scroll-proximity trigger for incremental loading.
//!
//! The list view ends in a sentinel region a few rows tall. Once enough of it
//! scrolls into view, the next page is requested. The trigger remembers the
//! cursor it last fired for, so a sentinel that stays visible while a page
//! loads does not ask for the same page twice.

/// Share of the sentinel that must be visible, in percent.
pub const DEFAULT_VISIBILITY_THRESHOLD_PERCENT: u8 = 50;

/// How much of the sentinel region is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelVisibility {
    /// Rows of the sentinel currently visible.
    pub visible_rows: u16,
    /// Height of the sentinel in rows.
    pub total_rows: u16,
}

impl SentinelVisibility {
    /// Creates a visibility reading; `visible_rows` is capped at `total_rows`.
    #[must_use]
    pub fn new(visible_rows: u16, total_rows: u16) -> Self {
        Self {
            visible_rows: visible_rows.min(total_rows),
            total_rows,
        }
    }

    /// Returns true when at least `threshold_percent` of the sentinel shows.
    ///
    /// A sentinel with no height is never visible.
    #[must_use]
    pub fn meets(self, threshold_percent: u8) -> bool {
        if self.total_rows == 0 {
            return false;
        }
        let visible = u32::from(self.visible_rows).saturating_mul(100);
        let required = u32::from(threshold_percent).saturating_mul(u32::from(self.total_rows));
        visible >= required
    }
}

/// Paging position reported by the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationStatus {
    /// Generation of the current session.
    pub generation: u64,
    /// Page that can be requested next, if any.
    pub next_cursor: Option<u32>,
    /// A request is in flight.
    pub in_flight: bool,
}

/// Signal to request page `cursor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    /// Page to request.
    pub cursor: u32,
}

/// Turns sentinel visibility into at most one [`LoadMore`] per cursor.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    threshold_percent: u8,
    last_fired: Option<(u64, u32)>,
}

impl ScrollTrigger {
    /// Creates a trigger firing at `threshold_percent` visibility.
    #[must_use]
    pub const fn new(threshold_percent: u8) -> Self {
        Self {
            threshold_percent,
            last_fired: None,
        }
    }

    /// Evaluates the current visibility against the paging position.
    ///
    /// Fires only while the coordinator awaits a further page, nothing is in
    /// flight, the sentinel meets the threshold, and this cursor of this
    /// session has not fired before.
    pub fn evaluate(
        &mut self,
        visibility: SentinelVisibility,
        status: PaginationStatus,
    ) -> Option<LoadMore> {
        if status.in_flight {
            return None;
        }
        let cursor = status.next_cursor?;
        if !visibility.meets(self.threshold_percent) {
            return None;
        }
        let position = (status.generation, cursor);
        if self.last_fired == Some(position) {
            return None;
        }

        self.last_fired = Some(position);
        Some(LoadMore { cursor })
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD_PERCENT)
    }
}
