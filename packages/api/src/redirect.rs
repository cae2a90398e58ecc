//! Navigation to the login entry point after a session ends.

/// Something that can send the user to the login page.
pub trait LoginRedirect {
    fn to_login(&self);
}

/// Redirect performed through `window.location` on the web platform.
///
/// Native builds have no location to change; the redirect is only logged there and
/// the UI reacts to the cleared session instead.
#[derive(Clone, Debug)]
pub struct BrowserRedirect {
    login_route: String,
}

impl BrowserRedirect {
    pub fn new(login_route: &str) -> Self {
        Self {
            login_route: login_route.to_string(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }
}

impl LoginRedirect for BrowserRedirect {
    fn to_login(&self) {
        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        {
            if let Some(window) = web_sys::window() {
                if window.location().set_href(&self.login_route).is_err() {
                    tracing::error!("Failed to navigate to {}", self.login_route);
                }
            }
        }
        #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
        {
            tracing::info!("Redirect to {}", self.login_route);
        }
    }
}
