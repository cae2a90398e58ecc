//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each entry as a
//! file under a base directory. It is used when the client runs natively (desktop
//! shell, tooling, tests) so the session survives restarts the same way
//! `localStorage` survives page reloads.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── entries/
//!     ├── user           # serialized user object
//!     └── token          # raw bearer token
//! ```
//!
//! Keys are restricted to ASCII alphanumerics, `-` and `_`; anything else is
//! replaced with `_` so a key can never escape the entries directory.

use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entries_dir(&self) -> PathBuf {
        self.base.join("entries")
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.entries_dir().join(file_name)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
        }
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.entry_path(key));
    }
}
