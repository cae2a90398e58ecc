//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] builds the single [`PlatformClient`] for the page, loads the
//! stored session once on mount and shares both through context. Pages reach them with
//! [`use_client`] and [`use_session`] instead of module-level globals.

use api::{ApiError, LoginRedirect};
use dioxus::prelude::*;
use store::Session;

use crate::config::load_config;
use crate::icons::FaRightFromBracket;
use crate::Icon;
use crate::notice::{notify, NoticeLevel, Notices};
use crate::platform::{make_client, PlatformClient};

/// Session state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

/// Get the current session state.
/// Returns a signal that updates on login, logout and sign-out after a 401.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// The page's API client.
pub fn use_client() -> PlatformClient {
    use_context::<PlatformClient>()
}

/// Provider component that owns the API client and the session state.
/// Wrap your app with this component.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let client = use_hook(|| make_client(&load_config()));
    let mut session_state = use_signal(SessionState::default);
    let notices = use_signal(Notices::default);

    let loader = client.clone();
    let _ = use_resource(move || {
        let client = loader.clone();
        async move {
            let session = client.session().await;
            session_state.set(SessionState {
                session,
                loading: false,
            });
        }
    });

    use_context_provider(|| client);
    use_context_provider(|| session_state);
    use_context_provider(|| notices);

    rsx! {
        {children}
    }
}

/// Report a failed call to the user.
///
/// A 401 already cleared the stored session and redirected; here the in-memory state
/// follows so guarded views close, and no notice is shown.
pub fn report_api_error(
    notices: &mut Signal<Notices>,
    session: &mut Signal<SessionState>,
    error: &ApiError,
    fallback: &str,
) {
    if error.is_unauthorized() {
        session.set(SessionState {
            session: None,
            loading: false,
        });
        return;
    }
    notify(notices, NoticeLevel::Error, &error.user_message(fallback));
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_client();
    let mut session_state = use_session();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            client.logout().await;
            session_state.set(SessionState {
                session: None,
                loading: false,
            });
            client.gateway().redirect().to_login();
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            " {label}"
        }
    }
}
