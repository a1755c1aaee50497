//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions while the grid has focus.
///
/// Provides default vim-style bindings alongside arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let none = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let mut bindings = HashMap::new();

        // Selection
        for (code, action) in [
            (KeyCode::Char('h'), KeyAction::MoveLeft),
            (KeyCode::Char('l'), KeyAction::MoveRight),
            (KeyCode::Char('k'), KeyAction::MoveUp),
            (KeyCode::Char('j'), KeyAction::MoveDown),
            (KeyCode::Left, KeyAction::MoveLeft),
            (KeyCode::Right, KeyAction::MoveRight),
            (KeyCode::Up, KeyAction::MoveUp),
            (KeyCode::Down, KeyAction::MoveDown),
            (KeyCode::Char('g'), KeyAction::FirstItem),
            (KeyCode::Home, KeyAction::FirstItem),
            (KeyCode::End, KeyAction::LastItem),
        ] {
            bindings.insert(none(code), action);
        }
        bindings.insert(
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            KeyAction::LastItem,
        );

        // Items
        bindings.insert(none(KeyCode::Enter), KeyAction::CopyUrl);
        bindings.insert(none(KeyCode::Char(' ')), KeyAction::CopyUrl);
        bindings.insert(none(KeyCode::Char('y')), KeyAction::CopyUrl);
        bindings.insert(none(KeyCode::Char('m')), KeyAction::LoadMore);

        // Focus
        bindings.insert(none(KeyCode::Char('/')), KeyAction::FocusSearch);
        bindings.insert(none(KeyCode::Tab), KeyAction::FocusSearch);

        // Application
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT),
            KeyAction::ToggleHelp,
        );
        bindings.insert(none(KeyCode::Char('?')), KeyAction::ToggleHelp);
        bindings.insert(none(KeyCode::Char('q')), KeyAction::Quit);
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_keys_and_arrows_move_selection() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('h'))), Some(KeyAction::MoveLeft));
        assert_eq!(bindings.get(key(KeyCode::Char('j'))), Some(KeyAction::MoveDown));
        assert_eq!(bindings.get(key(KeyCode::Up)), Some(KeyAction::MoveUp));
        assert_eq!(bindings.get(key(KeyCode::Right)), Some(KeyAction::MoveRight));
    }

    #[test]
    fn shift_g_jumps_to_last_item() {
        let bindings = KeyBindings::default();
        let shift_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(bindings.get(shift_g), Some(KeyAction::LastItem));
    }

    #[test]
    fn copy_has_three_bindings() {
        let bindings = KeyBindings::default();
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('y')] {
            assert_eq!(bindings.get(key(code)), Some(KeyAction::CopyUrl), "{code:?}");
        }
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.get(ctrl_c), Some(KeyAction::Quit));
    }

    #[test]
    fn unbound_key_returns_none() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('z'))), None);
    }
}
