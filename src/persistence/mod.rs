//! Key/value persistence for the last search.
//!
//! - [`KeyValueStore`] - capability interface over a string store
//! - [`LastSearch`] - fault-tolerant adapter for the single "last search" value
//! - [`FileStore`] / [`StoreWatcher`] - JSON file shared by every running instance,
//!   with change notification
//! - [`MemoryStore`] - process-local store (`--no-persist`, tests)

use crate::model::PersistenceError;

pub mod file_store;
pub mod last_search;
pub mod memory;

pub use file_store::{default_storage_path, FileStore, StoreWatcher};
pub use last_search::LastSearch;
pub use memory::MemoryStore;

/// Storage key used when none is configured.
pub const DEFAULT_LAST_SEARCH_KEY: &str = "giphy:lastSearch";

/// A string-to-string store.
pub trait KeyValueStore {
    /// Value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// A value changed in the shared store, observed from outside this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    /// Changed key.
    pub key: String,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
}
