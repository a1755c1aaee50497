//! Fault-tolerant "last search" adapter.

use super::{KeyValueStore, StorageChange};
use tracing::{debug, warn};

/// The most recent non-empty search, persisted under a fixed key.
///
/// Keeps an in-memory mirror of the stored value. Every store failure is
/// logged and swallowed: the adapter degrades to "no persistence" instead of
/// surfacing an error.
pub struct LastSearch {
    store: Box<dyn KeyValueStore>,
    key: String,
    mirror: String,
}

impl LastSearch {
    /// Wrap `store`, reading the current value under `key`.
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let mirror = match store.get(&key) {
            Ok(value) => value.unwrap_or_default().trim().to_string(),
            Err(e) => {
                warn!(error = %e, key = %key, "failed to read last search");
                String::new()
            }
        };

        Self { store, key, mirror }
    }

    /// Storage key this adapter owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Trimmed last search, empty if absent.
    pub fn get(&self) -> &str {
        &self.mirror
    }

    /// Persist a search. No-op for blank values.
    pub fn set(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }

        match self.store.set(&self.key, trimmed) {
            Ok(()) => self.mirror = trimmed.to_string(),
            Err(e) => warn!(error = %e, key = %self.key, "failed to save last search"),
        }
    }

    /// Forget the last search. The mirror is cleared even if the store fails.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(error = %e, key = %self.key, "failed to clear last search");
        }
        self.mirror.clear();
    }

    /// Apply a change made by another instance.
    ///
    /// Returns `true` if the mirror changed. Changes to other keys are ignored.
    pub fn apply_change(&mut self, change: &StorageChange) -> bool {
        if change.key != self.key {
            return false;
        }

        let value = change
            .new_value
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if value == self.mirror {
            return false;
        }

        debug!(key = %self.key, value = %value, "last search changed externally");
        self.mirror = value;
        true
    }
}

impl std::fmt::Debug for LastSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastSearch")
            .field("key", &self.key)
            .field("mirror", &self.mirror)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersistenceError;
    use crate::persistence::MemoryStore;

    const KEY: &str = "giphy:lastSearch";

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Unavailable("quota exceeded".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn adapter() -> LastSearch {
        LastSearch::new(Box::new(MemoryStore::new()), KEY)
    }

    #[test]
    fn set_trims_before_storing() {
        let mut last = adapter();
        last.set("  cats  ");
        assert_eq!(last.get(), "cats");
    }

    #[test]
    fn set_blank_is_noop() {
        let mut last = adapter();
        last.set("dogs");
        last.set("");
        last.set("   ");
        assert_eq!(last.get(), "dogs");
    }

    #[test]
    fn clear_empties_value() {
        let mut last = adapter();
        last.set("cats");
        last.clear();
        assert_eq!(last.get(), "");
    }

    #[test]
    fn reads_existing_value_trimmed_on_construction() {
        let mut store = MemoryStore::new();
        store.set(KEY, "  pizza ").unwrap();

        let last = LastSearch::new(Box::new(store), KEY);
        assert_eq!(last.get(), "pizza");
    }

    #[test]
    fn value_survives_new_adapter_over_same_store() {
        let store = MemoryStore::new();
        let mut first = LastSearch::new(Box::new(store.clone()), KEY);
        first.set("otters");

        let second = LastSearch::new(Box::new(store), KEY);
        assert_eq!(second.get(), "otters");
    }

    #[test]
    fn broken_store_reads_as_empty() {
        let last = LastSearch::new(Box::new(BrokenStore), KEY);
        assert_eq!(last.get(), "");
    }

    #[test]
    fn broken_store_set_is_swallowed_and_not_mirrored() {
        let mut last = LastSearch::new(Box::new(BrokenStore), KEY);
        last.set("cats");
        assert_eq!(last.get(), "");
    }

    #[test]
    fn broken_store_clear_still_clears_mirror() {
        let mut store = MemoryStore::new();
        store.set(KEY, "cats").unwrap();
        let mut last = LastSearch::new(Box::new(store.clone()), KEY);
        store.fail_with("disk full");

        last.clear();

        assert_eq!(last.get(), "");
    }

    #[test]
    fn external_change_updates_mirror() {
        let mut last = adapter();
        let changed = last.apply_change(&StorageChange {
            key: KEY.to_string(),
            new_value: Some(" ferrets ".to_string()),
        });

        assert!(changed);
        assert_eq!(last.get(), "ferrets");
    }

    #[test]
    fn external_removal_empties_mirror() {
        let mut last = adapter();
        last.set("cats");

        last.apply_change(&StorageChange {
            key: KEY.to_string(),
            new_value: None,
        });

        assert_eq!(last.get(), "");
    }

    #[test]
    fn change_for_other_key_is_ignored() {
        let mut last = adapter();
        last.set("cats");

        let changed = last.apply_change(&StorageChange {
            key: "theme".to_string(),
            new_value: Some("dark".to_string()),
        });

        assert!(!changed);
        assert_eq!(last.get(), "cats");
    }

    #[test]
    fn echo_of_own_write_is_not_a_change() {
        let mut last = adapter();
        last.set("cats");

        let changed = last.apply_change(&StorageChange {
            key: KEY.to_string(),
            new_value: Some("cats".to_string()),
        });

        assert!(!changed);
    }
}
