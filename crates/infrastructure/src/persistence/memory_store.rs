//! In-memory key-value store

use std::collections::HashMap;

use application::{ApplicationError, KeyValueStorePort};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KeyValueStorePort for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        self.values.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryStore::new();
        assert!(store.get("theme").unwrap().is_none());

        store.set("theme", "dark").unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.len(), 1);

        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert!(store.is_empty());
    }
}
