//! Grid navigation keyboard action handler.
//!
//! Pure functions that transform AppState in response to selection moves.
//! Only operates when focus is on the grid.

use crate::model::KeyAction;
use crate::state::{AppState, FocusPane};

/// Move the grid selection.
///
/// # Arguments
/// * `state` - Current application state to transform
/// * `action` - The navigation action to handle
/// * `item_count` - Number of items currently loaded
///
/// Rows are `state.columns` wide. Moves that would leave the grid saturate at
/// the edge; a move down from the last partial row lands on the last item.
/// Non-navigation actions are returned unchanged.
pub fn handle_grid_action(mut state: AppState, action: KeyAction, item_count: usize) -> AppState {
    if state.focus != FocusPane::Grid || item_count == 0 {
        return state;
    }

    let last = item_count - 1;
    let columns = state.columns.max(1);
    let current = state.selected.min(last);

    state.selected = match action {
        KeyAction::MoveLeft => current.saturating_sub(1),
        KeyAction::MoveRight => (current + 1).min(last),
        KeyAction::MoveUp => current.checked_sub(columns).unwrap_or(current),
        KeyAction::MoveDown => {
            if current / columns < last / columns {
                (current + columns).min(last)
            } else {
                current
            }
        }
        KeyAction::FirstItem => 0,
        KeyAction::LastItem => last,
        _ => current,
    };

    state
}

// ===== Tests =====

#[cfg(test)]
#[path = "grid_handler_tests.rs"]
mod tests;
