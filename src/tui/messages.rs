//! Message types for the dashboard update loop.
//!
//! Messages represent user actions, async command results, and system
//! events.

use crate::query::{FetchOutcome, FetchTicket};

/// Messages for the dashboard application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move cursor up one repository.
    CursorUp,
    /// Move cursor down one repository.
    CursorDown,
    /// Move cursor up one page.
    PageUp,
    /// Move cursor down one page.
    PageDown,
    /// Move cursor to the first repository.
    Home,
    /// Move cursor to the last repository.
    End,

    // Input
    /// Start editing the organization name.
    EditOrganization,
    /// Start entering a token.
    EditToken,
    /// A character was typed into the input line.
    InputChar(char),
    /// Delete the last character of the input line.
    InputBackspace,
    /// Confirm the input line.
    InputSubmit,
    /// Leave the input line.
    InputCancel,
    /// Switch to the next sort mode.
    CycleSort,

    // Data loading
    /// A debounce timer elapsed.
    DebounceElapsed,
    /// A gateway request finished.
    FetchCompleted {
        /// Ticket of the command that ran.
        ticket: FetchTicket,
        /// Organization the command concerned.
        organization: String,
        /// What the gateway returned.
        outcome: FetchOutcome,
        /// Round-trip time of the request.
        latency_ms: u64,
    },

    // Application lifecycle
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for cursor movement messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp
                | Self::CursorDown
                | Self::PageUp
                | Self::PageDown
                | Self::Home
                | Self::End
        )
    }

    /// Returns true for input line and sort messages.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(
            self,
            Self::EditOrganization
                | Self::EditToken
                | Self::InputChar(_)
                | Self::InputBackspace
                | Self::InputSubmit
                | Self::InputCancel
                | Self::CycleSort
        )
    }

    /// Returns true for timer and network results.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::DebounceElapsed | Self::FetchCompleted { .. })
    }
}
