//! # Key-value persistence seam
//!
//! Every durable piece of client state goes through [`KeyValueStore`]: a tiny async
//! interface over string keys and string values. The session layer
//! ([`crate::session::SessionStore`]) only ever talks to this trait, so the same logic
//! runs against the browser's `localStorage` ([`crate::LocalStorageStore`]), a
//! directory on disk ([`crate::FileStore`]), or an in-memory map
//! ([`crate::MemoryStore`]) in tests.
//!
//! Implementations swallow backend failures: a read that fails is reported as `None`,
//! a failed write or removal is a no-op (logged by the backend). A broken store
//! degrades to "nothing stored" rather than taking the page down.

use std::future::Future;

/// Async trait for storing and retrieving string entries by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = ()>;
    fn remove(&self, key: &str) -> impl Future<Output = ()>;
}
