//! # Client configuration — `medicai.toml`
//!
//! Defines the TOML configuration the client is built with (filename:
//! [`ClientConfig::filename`] = `"medicai.toml"`). It tells the gateway where the
//! external clinical API lives and where to send the user when a session ends.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000"   # trailing "/" is ignored
//!
//! [routes]
//! login = "/login"                      # login entry point for 401 redirects
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config. Builder helpers (`new`, `with_base_url`, `with_login_route`), TOML (de)serialisation, the canonical filename. |
//! | [`ApiConfig`] | API section: the external API `base_url`, default **`http://127.0.0.1:8000`**. |
//! | [`RouteConfig`] | Routes section: the `login` entry point, default **`/login`**. |
//!
//! A page-level override (see `ui::config`) replaces `api.base_url` at startup via
//! [`ClientConfig::with_base_url`].

use serde::{Deserialize, Serialize};

/// Default base URL of the external clinical API.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Top-level configuration stored in `medicai.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

/// External API configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Client-side route configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Login entry point used by the unauthorized redirect.
    #[serde(default = "default_login_route")]
    pub login: String,
}

fn default_login_route() -> String {
    "/login".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API base URL.
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Builder method to replace the API base URL. Blank values are ignored.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let trimmed = base_url.trim();
        if !trimmed.is_empty() {
            self.api.base_url = trimmed.to_string();
        }
        self
    }

    /// Builder method to set the login entry point.
    pub fn with_login_route(mut self, login: &str) -> Self {
        self.routes.login = login.to_string();
        self
    }

    /// Base URL without its trailing slashes.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "medicai.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
