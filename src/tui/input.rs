//! Key-to-message mapping.
//!
//! The same key means different things while the input line is active, so
//! mapping depends on the current [`InputMode`].

use bubbletea_rs::event::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

use super::messages::AppMsg;
use super::state::InputMode;

/// Maps a key event to an application message.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message(key: &KeyMsg, mode: InputMode) -> Option<AppMsg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.key == KeyCode::Char('c') {
        return Some(AppMsg::Quit);
    }

    match mode {
        InputMode::Browse => map_browse_key(key.key),
        InputMode::Organization | InputMode::Token => map_edit_key(key.key),
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_browse_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::PageDown => Some(AppMsg::PageDown),
        KeyCode::PageUp => Some(AppMsg::PageUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('/') => Some(AppMsg::EditOrganization),
        KeyCode::Char('t') => Some(AppMsg::EditToken),
        KeyCode::Char('s') => Some(AppMsg::CycleSort),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_edit_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char(character) => Some(AppMsg::InputChar(character)),
        KeyCode::Backspace => Some(AppMsg::InputBackspace),
        KeyCode::Enter => Some(AppMsg::InputSubmit),
        KeyCode::Esc => Some(AppMsg::InputCancel),
        _ => None,
    }
}
