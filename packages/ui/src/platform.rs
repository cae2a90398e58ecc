//! Platform-specific construction of the API client.
//!
//! The session lives in the platform's durable per-origin store:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **WASM without `web`**: in memory, for tests
//! - **Desktop / native**: one file per key under `<data_dir>/medicai/` via [`store::FileStore`]

use api::{BrowserRedirect, ClinicApi, Gateway, HttpTransport};
use store::{ClientConfig, SessionStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

/// The client type every page talks through.
pub type PlatformClient = ClinicApi<HttpTransport, PlatformStore, BrowserRedirect>;

pub fn make_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("medicai");
        store::FileStore::new(base)
    }
}

/// Build the client for the given configuration.
pub fn make_client(config: &ClientConfig) -> PlatformClient {
    tracing::info!("Using clinical API at {}", config.base_url());
    ClinicApi::new(Gateway::new(
        config.base_url(),
        HttpTransport::new(),
        SessionStore::new(make_store()),
        BrowserRedirect::new(&config.routes.login),
    ))
}

/// Login entry point the client redirects to.
pub fn login_route(client: &PlatformClient) -> &str {
    client.gateway().redirect().login_route()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_route_follows_config() {
        let client = make_client(&ClientConfig::default().with_login_route("/signin"));
        assert_eq!(login_route(&client), "/signin");

        let client = make_client(&ClientConfig::default());
        assert_eq!(login_route(&client), "/login");
    }
}
