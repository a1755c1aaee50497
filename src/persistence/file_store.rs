//! JSON file store shared by every running instance, plus a change watcher.
//!
//! The file holds a single JSON object of string values. Writes go through a
//! sibling temp file and a rename so readers never observe a half-written
//! object.

use super::{KeyValueStore, StorageChange};
use crate::model::PersistenceError;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::{debug, warn};

type StoreMap = BTreeMap<String, String>;

/// Resolve the default store path.
///
/// Returns `~/.local/share/gifgrid/storage.json` on Linux, or the platform
/// data directory elsewhere. Falls back to the current directory.
pub fn default_storage_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("gifgrid").join("storage.json")
    } else {
        PathBuf::from("gifgrid-storage.json")
    }
}

/// Key/value store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_map(&self, map: &StoreMap) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let contents = serde_json::to_string_pretty(map).map_err(|e| PersistenceError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

/// Read the whole store. A missing or blank file is an empty store.
fn read_map(path: &Path) -> Result<StoreMap, PersistenceError> {
    if !path.exists() {
        return Ok(StoreMap::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(StoreMap::new());
    }

    serde_json::from_str(&contents).map_err(|e| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(read_map(&self.path)?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut map = read_map(&self.path)?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        let mut map = read_map(&self.path)?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

// ===== StoreWatcher =====

/// Passive listener for changes other instances make to a [`FileStore`].
///
/// Watches the store's directory (watching a single file is unreliable across
/// platforms and breaks on rename), and on any event touching the store file
/// re-reads it and reports every key whose value differs from the previous
/// snapshot. Writes made by this process are reported too; consumers treat a
/// change equal to their current value as a no-op.
pub struct StoreWatcher {
    path: PathBuf,
    snapshot: StoreMap,
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    event_rx: Receiver<DebounceEventResult>,
}

impl StoreWatcher {
    /// Start watching the directory containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if the directory cannot be created and
    /// `PersistenceError::Watch` if the OS watcher cannot be set up.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        std::fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
            path: dir.clone(),
            source,
        })?;

        let snapshot = read_map(&path).unwrap_or_default();

        let watch_error = |e: notify::Error| PersistenceError::Watch {
            path: dir.clone(),
            reason: e.to_string(),
        };

        let (tx, rx) = std::sync::mpsc::channel();
        let mut debouncer = new_debouncer(Duration::from_millis(100), tx).map_err(watch_error)?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(watch_error)?;

        debug!(path = %path.display(), "watching store for external changes");

        Ok(Self {
            path,
            snapshot,
            _debouncer: debouncer,
            event_rx: rx,
        })
    }

    /// Drain watcher events and report changed keys. Non-blocking.
    pub fn poll_changes(&mut self) -> Vec<StorageChange> {
        let mut touched = false;

        while let Ok(result) = self.event_rx.try_recv() {
            match result {
                Ok(events) => {
                    touched |= events
                        .iter()
                        .any(|event| event.path.file_name() == self.path.file_name());
                }
                Err(error) => {
                    // Watcher errors are logged but don't stop polling
                    warn!(error = %error, "store watcher error");
                }
            }
        }

        if touched {
            self.rescan()
        } else {
            Vec::new()
        }
    }

    /// Re-read the store and diff it against the last snapshot.
    fn rescan(&mut self) -> Vec<StorageChange> {
        let current = match read_map(&self.path) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "failed to re-read store after change");
                return Vec::new();
            }
        };

        let mut changes: Vec<StorageChange> = current
            .iter()
            .filter(|(key, value)| self.snapshot.get(*key) != Some(*value))
            .map(|(key, value)| StorageChange {
                key: key.clone(),
                new_value: Some(value.clone()),
            })
            .collect();

        changes.extend(
            self.snapshot
                .keys()
                .filter(|key| !current.contains_key(*key))
                .map(|key| StorageChange {
                    key: key.clone(),
                    new_value: None,
                }),
        );

        self.snapshot = current;
        changes
    }
}

impl std::fmt::Debug for StoreWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWatcher")
            .field("path", &self.path)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("storage.json"))
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("giphy:lastSearch").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.set("giphy:lastSearch", "cats").unwrap();

        assert_eq!(store.get("giphy:lastSearch").unwrap().as_deref(), Some("cats"));
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn remove_deletes_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("a", "1").unwrap();

        store.remove("a").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn remove_missing_key_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.remove("a").unwrap();

        assert!(!store.path().exists());
    }

    #[test]
    fn set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("deeper").join("s.json"));

        store.set("k", "v").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        let result = store.get("k");

        assert!(
            matches!(result, Err(PersistenceError::Corrupt { .. })),
            "got {result:?}"
        );
    }

    #[test]
    fn blank_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "\n").unwrap();

        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn rescan_reports_changed_and_removed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("kept", "same").unwrap();
        store.set("changed", "old").unwrap();
        store.set("removed", "x").unwrap();

        let mut watcher = StoreWatcher::new(store.path()).unwrap();

        store.set("changed", "new").unwrap();
        store.remove("removed").unwrap();

        let mut changes = watcher.rescan();
        changes.sort_by(|a, b| a.key.cmp(&b.key));

        assert_eq!(
            changes,
            vec![
                StorageChange {
                    key: "changed".to_string(),
                    new_value: Some("new".to_string()),
                },
                StorageChange {
                    key: "removed".to_string(),
                    new_value: None,
                },
            ]
        );
        assert!(watcher.rescan().is_empty(), "snapshot should be updated");
    }

    #[test]
    fn watcher_notices_write_from_another_store_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut watcher = StoreWatcher::new(&path).unwrap();

        let mut other_instance = FileStore::new(&path);
        other_instance.set("giphy:lastSearch", "llamas").unwrap();

        let mut seen = Vec::new();
        for _ in 0..50 {
            seen.extend(watcher.poll_changes());
            if !seen.is_empty() {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }

        assert_eq!(
            seen,
            vec![StorageChange {
                key: "giphy:lastSearch".to_string(),
                new_value: Some("llamas".to_string()),
            }]
        );
    }

    #[test]
    fn poll_without_events_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = StoreWatcher::new(dir.path().join("storage.json")).unwrap();
        assert!(watcher.poll_changes().is_empty());
    }
}
