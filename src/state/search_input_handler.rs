//! Search input handling (pure state transitions).
//!
//! The cursor counts characters, not bytes, so multi-byte input edits cleanly.
//! All functions are pure - no side effects, testable without TUI.

/// Text of the search line and the cursor position within it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    /// Line contents.
    pub text: String,
    /// Character index, `0..=text.chars().count()`.
    pub cursor: usize,
}

impl SearchInput {
    /// Input holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// Insert `ch` at the cursor and advance.
pub fn handle_char_input(mut input: SearchInput, ch: char) -> SearchInput {
    let at = input.byte_index(input.cursor);
    input.text.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: SearchInput) -> SearchInput {
    if input.cursor == 0 {
        return input;
    }
    let at = input.byte_index(input.cursor - 1);
    input.text.remove(at);
    input.cursor -= 1;
    input
}

/// Delete the character under the cursor. No-op at end of line.
pub fn handle_delete(mut input: SearchInput) -> SearchInput {
    if input.cursor >= input.char_len() {
        return input;
    }
    let at = input.byte_index(input.cursor);
    input.text.remove(at);
    input
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut input: SearchInput) -> SearchInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move cursor right by one position. Saturates at the end of the text.
pub fn handle_cursor_right(mut input: SearchInput) -> SearchInput {
    input.cursor = (input.cursor + 1).min(input.char_len());
    input
}

/// Move the cursor to the start of the line.
pub fn handle_home(mut input: SearchInput) -> SearchInput {
    input.cursor = 0;
    input
}

/// Move the cursor past the last character.
pub fn handle_end(mut input: SearchInput) -> SearchInput {
    input.cursor = input.char_len();
    input
}

/// Empty the line.
pub fn clear_input(_input: SearchInput) -> SearchInput {
    SearchInput::default()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
