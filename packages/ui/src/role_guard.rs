//! Page-level Role Gate.

use api::{GateDecision, Landing};
use dioxus::prelude::*;
use store::Role;

use crate::platform::login_route;
use crate::session::{use_client, use_session, LogoutButton};
use crate::view_model::greeting::greeting;

/// Render `children` only for a stored session of `role`.
///
/// The gate is evaluated against the session store when the guard mounts, and again
/// whenever the in-memory session changes (logout, sign-out after a 401). Otherwise the
/// unauthenticated view is shown and no child feature is initialized.
#[component]
pub fn RoleGuard(role: Role, children: Element) -> Element {
    let client = use_client();
    let session_state = use_session();

    let decision = use_resource(move || {
        let client = client.clone();
        let role = role.clone();
        // Subscribe to session changes.
        let _ = session_state.read().session.clone();
        async move { client.role_gate().evaluate(role).await }
    });

    let decision: Option<GateDecision> = decision.read().clone();
    match decision {
        None => rsx! {
            div { class: "page-loading", "Loading…" }
        },
        Some(decision) => match decision.authorized_session() {
            Some(session) => {
                let view = greeting(session);
                rsx! {
                    header {
                        class: "workspace-header",
                        div {
                            h2 { "{view.headline}" }
                            span { class: "role-badge", "{view.role_label}" }
                        }
                        LogoutButton { class: "btn btn-secondary" }
                    }
                    {children}
                }
            }
            None => rsx! {
                Unauthenticated { signed_in: decision.session.is_some() }
            },
        },
    }
}

/// Shown instead of a role-specific page.
#[component]
pub fn Unauthenticated(signed_in: bool) -> Element {
    let client = use_client();
    let login = login_route(&client).to_string();
    let message = if signed_in {
        "This page is not available for your account type."
    } else {
        "You need to sign in to use this page."
    };
    rsx! {
        div {
            class: "auth-warning",
            h2 { "Access restricted" }
            p { "{message}" }
            a { class: "btn btn-primary", href: "{login}", "Go to sign in" }
        }
    }
}

/// Route path for a landing decision.
pub fn landing_path(landing: Landing) -> &'static str {
    match landing {
        Landing::Login => "/login",
        Landing::DoctorWorkspace => "/doctor",
        Landing::PatientWorkspace => "/patient",
    }
}
