pub mod config;
pub mod kv;
pub mod session;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::ClientConfig;
pub use kv::KeyValueStore;
pub use session::{Role, Session, SessionStore, StoredUser};
