//! Public patient lookup by patient code. No session required.

use api::{forms, RequestSequencer};
use dioxus::prelude::*;
use ui::panels::VisitCardView;
use ui::view_model::records::{lookup_view, LookupView};
use ui::{notify, report_api_error, use_client, use_notices, use_session, NoticeLevel};

use crate::Route;

#[derive(Clone, Debug, PartialEq)]
enum LookupResult {
    Found(LookupView),
    NotFound(String),
}

#[component]
pub fn Lookup() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let sequencer = use_hook(RequestSequencer::new);
    let mut code = use_signal(String::new);
    let mut result = use_signal(|| Option::<LookupResult>::None);

    let handle_lookup = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let sequencer = sequencer.clone();
        spawn(async move {
            let normalized = match forms::normalize_patient_code(&code()) {
                Ok(normalized) => normalized,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            code.set(normalized.clone());

            let ticket = sequencer.begin();
            let response = client.lookup_patient(&normalized).await;
            if !sequencer.try_apply(ticket) {
                return;
            }
            match response {
                Ok(Some(found)) => result.set(Some(LookupResult::Found(lookup_view(&found)))),
                Ok(None) => result.set(Some(LookupResult::NotFound(normalized))),
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Lookup failed"),
            }
        });
    };

    rsx! {
        div {
            class: "lookup-container",
            h1 { "Patient lookup" }
            form {
                onsubmit: handle_lookup,
                class: "lookup-form",
                input {
                    placeholder: "Patient code",
                    value: code(),
                    oninput: move |evt: FormEvent| code.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Search" }
            }

            {match result() {
                None => rsx! {},
                Some(LookupResult::NotFound(code)) => rsx! {
                    div {
                        class: "lookup-empty",
                        h3 { "Patient not found" }
                        p { "No patient matches the code {code}." }
                    }
                },
                Some(LookupResult::Found(view)) => rsx! {
                    div {
                        class: "patient-info",
                        h2 { "{view.name}" }
                        p { strong { "Date of birth: " } "{view.birth_date}" }
                        p { strong { "Phone: " } "{view.phone}" }
                        p { strong { "Emergency contact: " } "{view.emergency_contact}" }
                    }
                    if let Some(message) = view.empty_message.as_ref() {
                        p { class: "empty", "{message}" }
                    }
                    for (i, visit) in view.visits.iter().enumerate() {
                        VisitCardView { key: "{i}", card: visit.clone() }
                    }
                },
            }}

            p {
                class: "auth-footer",
                Link { to: Route::Login {}, "Back to sign in" }
            }
        }
    }
}
