use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and native fallback.
///
/// Clones share the same underlying map, which mirrors how every page of a browser
/// origin sees the same `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    async fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("token").await.is_none());

        store.set("token", "abc").await;
        assert_eq!(store.get("token").await.as_deref(), Some("abc"));

        store.set("token", "def").await;
        assert_eq!(store.get("token").await.as_deref(), Some("def"));
        assert_eq!(store.len(), 1);

        store.remove("token").await;
        assert!(store.get("token").await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other_tab = store.clone();

        store.set("user", "{}").await;
        assert_eq!(other_tab.get("user").await.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("nothing").await;
        assert!(store.is_empty());
    }
}
