//! Single-line text input.

/// What the input line is collecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the list.
    #[default]
    Browse,
    /// Keys edit the organization name; changes are queried live.
    Organization,
    /// Keys edit a personal access token; applied on submit.
    Token,
}

/// Input line buffer and the mode it is in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    mode: InputMode,
    buffer: String,
}

impl InputLine {
    /// Starts editing in `mode` with `initial` text.
    pub fn begin(&mut self, mode: InputMode, initial: &str) {
        self.mode = mode;
        initial.clone_into(&mut self.buffer);
    }

    /// Leaves editing and returns the buffer contents.
    pub fn finish(&mut self) -> String {
        self.mode = InputMode::Browse;
        std::mem::take(&mut self.buffer)
    }

    /// Appends a character. Control characters are ignored.
    pub fn push(&mut self, character: char) {
        if !character.is_control() {
            self.buffer.push(character);
        }
    }

    /// Removes the last character.
    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Returns true while collecting input.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.mode != InputMode::Browse
    }

    /// Text typed so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Text for display; tokens are masked.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self.mode {
            InputMode::Token => "*".repeat(self.buffer.chars().count()),
            InputMode::Browse | InputMode::Organization => self.buffer.clone(),
        }
    }
}
