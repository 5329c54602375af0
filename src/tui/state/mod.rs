//! State management for the dashboard.
//!
//! Cursor position in the repository list and the single-line input used
//! for organization names and tokens.

mod input_line;
mod list_cursor;

pub use input_line::{InputLine, InputMode};
pub use list_cursor::ListCursor;
