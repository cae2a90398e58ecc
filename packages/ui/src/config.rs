//! Startup configuration with the page-level base URL override.
//!
//! | Platform | Override source |
//! |----------|-----------------|
//! | Web | global `window.API_BASE_URL` set by the hosting page |
//! | Native | `API_BASE_URL` environment variable |
//!
//! Native builds first read `<config_dir>/medicai/medicai.toml` when it exists.

use store::ClientConfig;

/// Name of the override on both platforms.
pub const API_BASE_URL_OVERRIDE: &str = "API_BASE_URL";

#[cfg(target_arch = "wasm32")]
pub fn page_override() -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &API_BASE_URL_OVERRIDE.into())
        .ok()?
        .as_string()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_override() -> Option<String> {
    std::env::var(API_BASE_URL_OVERRIDE).ok()
}

/// Apply an override to a base configuration. Blank overrides are ignored.
pub fn with_override(config: ClientConfig, base_url: Option<String>) -> ClientConfig {
    match base_url {
        Some(url) => {
            let config = config.with_base_url(&url);
            tracing::debug!("API base URL overridden to {}", config.base_url());
            config
        }
        None => config,
    }
}

#[cfg(target_arch = "wasm32")]
fn base_config() -> ClientConfig {
    ClientConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn base_config() -> ClientConfig {
    let Some(path) = dirs::config_dir().map(|d| d.join("medicai").join(ClientConfig::filename()))
    else {
        return ClientConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => ClientConfig::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            ClientConfig::default()
        }),
        Err(_) => ClientConfig::default(),
    }
}

/// Configuration used by the running page.
pub fn load_config() -> ClientConfig {
    with_override(base_config(), page_override())
}
