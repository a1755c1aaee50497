//! UI and browsing state machines (pure).
//!
//! All state transitions are pure functions testable without TUI. Time is
//! passed in explicitly; nothing here reads the clock.

pub mod app_state;
pub mod browser;
pub mod debounce;
pub mod grid_handler;
pub mod search_input_handler;
pub mod timer;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use browser::{
    Browser, BrowserSettings, PagingState, COPY_FAILED_MESSAGE, DEFAULT_COPY_FEEDBACK,
    DEFAULT_ERROR_FLASH,
};
pub use debounce::{Debounced, DEFAULT_DEBOUNCE};
pub use grid_handler::handle_grid_action;
pub use search_input_handler::SearchInput;
pub use timer::{earliest, OneShot};
