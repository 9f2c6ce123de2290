use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use serde_json::Value;

use crate::domain::{
    errors::{AppError, AppResult},
    logging::LogComponent,
};
use crate::log_warn;

/// Key/value persistence for JSON-encoded primitives.
pub trait PreferenceStorage {
    /// `None` when the key is absent or unreadable.
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&self, key: &str, value: &Value) -> AppResult<()>;
}

/// `window.localStorage` through gloo.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocalStorage;

impl PreferenceStorage for BrowserLocalStorage {
    fn load(&self, key: &str) -> Option<Value> {
        match LocalStorage::get::<Value>(key) {
            Ok(value) => Some(value),
            Err(gloo::storage::errors::StorageError::KeyNotFound(_)) => None,
            Err(e) => {
                log_warn!(
                    LogComponent::Infrastructure("Storage"),
                    "Ignoring unreadable '{key}': {e}"
                );
                None
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> AppResult<()> {
        LocalStorage::set(key, value)
            .map_err(|e| AppError::Transport(format!("Failed to persist '{key}': {e}")))
    }
}

/// In-memory storage; shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.to_string(), v)));
        storage
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<Value> {
        self.get(key)
    }

    fn save(&self, key: &str, value: &Value) -> AppResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_storage_shares_between_clones() {
        let storage = MemoryStorage::with_entries([("fontSize", json!(125))]);
        let clone = storage.clone();
        clone.save("darkMode", &json!(true)).unwrap();
        assert_eq!(storage.load("darkMode"), Some(json!(true)));
        assert_eq!(storage.load("fontSize"), Some(json!(125)));
        assert_eq!(storage.load("highContrast"), None);
        assert_eq!(storage.len(), 2);
    }
}
