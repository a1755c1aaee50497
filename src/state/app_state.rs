//! UI state and transitions.
//!
//! AppState holds what only the terminal front end cares about: which pane
//! has focus, the search line being edited, and the grid selection. The
//! search/pagination state lives in [`Browser`](crate::state::Browser).

use crate::state::SearchInput;

// ===== AppState =====

/// UI state. Pure data, no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Which pane receives keyboard input.
    pub focus: FocusPane,

    /// The search line as typed.
    pub input: SearchInput,

    /// Index of the selected grid cell. Always `< item count` when the grid
    /// is non-empty; see [`AppState::clamp_selection`].
    pub selected: usize,

    /// Cells per grid row, as laid out by the last render.
    /// Vertical movement steps by this amount.
    pub columns: usize,

    /// Key binding overlay is open.
    pub help_visible: bool,
}

impl AppState {
    /// Initial state: search focused, nothing selected.
    pub fn new() -> Self {
        Self {
            focus: FocusPane::Search,
            input: SearchInput::default(),
            selected: 0,
            columns: 1,
            help_visible: false,
        }
    }

    /// Send keystrokes to the query line.
    pub fn focus_search(&mut self) {
        self.focus = FocusPane::Search;
    }

    /// Send keystrokes to the result grid.
    pub fn focus_grid(&mut self) {
        self.focus = FocusPane::Grid;
    }

    /// Record the column count of the rendered grid. Never below 1.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Keep the selection inside a list of `item_count` items.
    pub fn clamp_selection(&mut self, item_count: usize) {
        self.selected = self.selected.min(item_count.saturating_sub(1));
    }

    /// Open or close the key binding overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ===== FocusPane =====

/// Pane with keyboard focus.
///
/// Search is the default so the app opens ready to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Query line receives keystrokes.
    #[default]
    Search,
    /// Result grid receives keystrokes.
    Grid,
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
