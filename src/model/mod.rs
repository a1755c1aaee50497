//! Domain model types (pure).

pub mod error;
pub mod item;
pub mod key_action;

// Re-export for convenience
pub use error::{AppError, ClipboardError, FetchError, FetchOperation, PersistenceError};
pub use item::{ItemId, ResultItem, ResultPage};
pub use key_action::KeyAction;
