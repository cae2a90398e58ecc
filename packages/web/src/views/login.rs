//! Login page view with the email/password form.

use api::{forms, Landing};
use dioxus::prelude::*;
use ui::{report_api_error, use_client, use_notices, use_session, SessionState};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let client = use_client();
    let mut session_state = use_session();
    let mut notices = use_notices();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already signed in, go to the matching workspace
    let state = session_state();
    if !state.loading {
        if let Some(session) = state.session.as_ref() {
            let landing = Landing::for_session(Some(session));
            if landing != Landing::Login {
                nav.replace(Route::from(landing));
            }
        }
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            let request = match forms::login_request(&email(), &password()) {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            loading.set(true);
            match client.login(&request).await {
                Ok(session) => {
                    let landing = Landing::for_session(Some(&session));
                    session_state.set(SessionState {
                        session: Some(session),
                        loading: false,
                    });
                    nav.replace(Route::from(landing));
                }
                Err(e) => {
                    loading.set(false);
                    if e.is_rejected_credentials() {
                        error.set(Some("Invalid email or password".to_string()));
                    } else {
                        report_api_error(&mut notices, &mut session_state, &e, "Sign-in failed");
                    }
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-container",

            h1 { "MedicAI" }
            p { class: "subtitle", "Sign in to your account" }

            form {
                onsubmit: handle_login,
                class: "auth-form",

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-footer",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
            p {
                class: "auth-footer",
                Link { to: Route::Lookup {}, "Look up a patient code" }
            }
        }
    }
}
