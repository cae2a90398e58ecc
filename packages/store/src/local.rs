//! # `localStorage` store — browser-side persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] implementation used on the **web
//! platform**. Entries live in the origin's `window.localStorage`, so they survive
//! reloads and tab closures and are never shared with another origin.
//!
//! ## Connection management
//!
//! The struct holds nothing but an optional key prefix; the `Storage` handle is
//! looked up from `window` on every operation because `web_sys::Storage` is not
//! `Send` and cannot live in a Dioxus context value.
//!
//! ## Error handling
//!
//! Every method silently swallows errors (private browsing quotas, disabled storage):
//! reads return `None`, writes do nothing. The page then behaves as if no session was
//! ever stored.

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: String,
}

impl LocalStorageStore {
    /// Store that reads and writes keys verbatim (`"user"`, `"token"`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose keys are prefixed, e.g. `"medicai:"` → `"medicai:token"`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(&self.key(key)).ok()?
    }

    async fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!("localStorage unavailable; {} not saved", key);
            return;
        };
        if storage.set_item(&self.key(key), value).is_err() {
            tracing::warn!("localStorage rejected write of {}", key);
        }
    }

    async fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(&self.key(key));
        }
    }
}
