//! Process-local key/value store.

use super::KeyValueStore;
use crate::model::PersistenceError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory store. Clones share the same contents.
///
/// Used when persistence is disabled, and as a test double: `fail_with`
/// makes every later operation fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    failure: Option<String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent operations fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.inner.borrow_mut().failure = Some(reason.into());
    }

    fn check(&self) -> Result<(), PersistenceError> {
        match &self.inner.borrow().failure {
            Some(reason) => Err(PersistenceError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.check()?;
        Ok(self.inner.borrow().values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.inner.borrow_mut().values.remove(key);
        Ok(())
    }
}
