//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Bindings only apply while the grid has focus; the search line consumes
/// printable keys itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Grid navigation
    /// Move selection one cell left. Default: h/←
    MoveLeft,
    /// Move selection one cell right. Default: l/→
    MoveRight,
    /// Move selection one row up. Default: k/↑
    MoveUp,
    /// Move selection one row down. Default: j/↓
    MoveDown,
    /// Jump to the first item. Default: g/Home
    FirstItem,
    /// Jump to the last loaded item. Default: G/End
    LastItem,

    // Items
    /// Copy the selected item's URL to the clipboard. Default: Enter/Space/y
    CopyUrl,
    /// Fetch the next page in the current mode. Default: m
    LoadMore,

    // Focus
    /// Move focus to the search line. Default: / or Tab
    FocusSearch,

    // Application
    /// Show or hide the key binding overlay. Default: ?
    ToggleHelp,
    /// Quit application. Default: q
    Quit,
}
