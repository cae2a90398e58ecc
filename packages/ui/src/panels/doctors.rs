use api::forms;
use dioxus::prelude::*;

use crate::notice::{notify, use_notices, NoticeLevel};
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::doctors::{doctor_cards, DoctorCard};

#[component]
pub fn DoctorsPanel() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut cards = use_signal(|| Option::<Vec<DoctorCard>>::None);

    let load = move |_| {
        let client = client.clone();
        spawn(async move {
            match client.doctors().await {
                Ok(doctors) => cards.set(Some(doctor_cards(&doctors))),
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not load the doctor list"),
            }
        });
    };

    rsx! {
        section {
            class: "panel",
            h3 { "Doctors" }
            button { class: "btn btn-secondary", onclick: load, "Show doctors" }
            if let Some(cards) = cards() {
                if cards.is_empty() {
                    p { class: "empty", "No doctors found." }
                }
                for card in cards.into_iter() {
                    div {
                        key: "{card.key}",
                        class: "doctor-item",
                        h4 { "{card.name}" }
                        p { strong { "Specialization: " } "{card.specialization}" }
                        p { strong { "License: " } "{card.license}" }
                    }
                }
            }
        }
    }
}

/// Grant a doctor read access to the signed-in patient's records.
#[component]
pub fn SharePanel(patient_id: String) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut email = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let patient_id = patient_id.clone();
        spawn(async move {
            let request = match forms::share_request(&patient_id, &email()) {
                Ok(request) => request,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            match client.share_records(&request).await {
                Ok(response) => {
                    let message = if response.message.is_empty() {
                        "Records shared".to_string()
                    } else {
                        response.message
                    };
                    notify(&mut notices, NoticeLevel::Success, &message);
                    email.set(String::new());
                }
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not share records"),
            }
        });
    };

    rsx! {
        section {
            class: "panel",
            h3 { "Share my records" }
            form {
                onsubmit: handle_submit,
                input {
                    r#type: "email",
                    placeholder: "Doctor's email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Share" }
            }
        }
    }
}
