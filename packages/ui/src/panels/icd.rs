use api::models::IcdSuggestion;
use api::{forms, RequestSequencer};
use dioxus::prelude::*;

use crate::notice::{notify, use_notices, NoticeLevel};
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::icd::{icd_rows, AcceptOutcome, AcceptedCode, AcceptedCodes, IcdRow};

/// ICD-10 coding assistant with the page-local accepted-codes list.
#[component]
pub fn IcdPanel() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let sequencer = use_hook(RequestSequencer::new);
    let mut text = use_signal(String::new);
    let mut threshold = use_signal(String::new);
    let mut suggestions = use_signal(Vec::<IcdSuggestion>::new);
    let mut accepted = use_signal(AcceptedCodes::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let sequencer = sequencer.clone();
        spawn(async move {
            let request = match forms::icd_request(&text(), &threshold()) {
                Ok(request) => request,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            let ticket = sequencer.begin();
            let result = client.suggest_icd10(&request).await;
            if !sequencer.try_apply(ticket) {
                return;
            }
            match result {
                Ok(codes) => {
                    if codes.is_empty() {
                        notify(&mut notices, NoticeLevel::Info, "No ICD-10 codes matched the text");
                    }
                    suggestions.set(codes);
                }
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not suggest codes"),
            }
        });
    };

    let rows = icd_rows(&suggestions(), &accepted());
    let accepted_codes = accepted().codes().to_vec();

    rsx! {
        section {
            class: "panel",
            h3 { "ICD-10 suggestions" }
            form {
                onsubmit: handle_submit,
                textarea {
                    rows: "4",
                    placeholder: "Clinical narrative",
                    value: text(),
                    oninput: move |evt: FormEvent| text.set(evt.value()),
                }
                input {
                    r#type: "number",
                    step: "0.05",
                    min: "0",
                    max: "1",
                    placeholder: "Review threshold (optional)",
                    value: threshold(),
                    oninput: move |evt: FormEvent| threshold.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Suggest codes" }
            }
            ul {
                class: "icd-list",
                for row in rows.into_iter() {
                    IcdRowItem { key: "{row.code}", row: row.clone(), accepted }
                }
            }
            if !accepted_codes.is_empty() {
                div {
                    class: "accepted-codes",
                    h4 { "Accepted codes" }
                    ul {
                        for code in accepted_codes.into_iter() {
                            AcceptedCodeItem { key: "{code.code}", code: code.clone(), accepted }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn IcdRowItem(row: IcdRow, accepted: Signal<AcceptedCodes>) -> Element {
    let mut notices = use_notices();
    let code = row.code.clone();
    let label = row.label.clone();

    rsx! {
        li {
            class: if row.needs_review { "icd-row needs-review" } else { "icd-row" },
            span { class: "icd-code", "{row.code}" }
            span { " {row.label}" }
            if let Some(confidence) = row.confidence.as_ref() {
                span { class: "icd-confidence", " {confidence}" }
            }
            if row.needs_review {
                span { class: "badge badge-warning", "Review" }
            }
            button {
                class: "btn btn-small",
                disabled: row.accepted,
                onclick: move |_| {
                    let outcome = accepted.write().accept(&code, &label);
                    let level = match outcome {
                        AcceptOutcome::Added => NoticeLevel::Success,
                        AcceptOutcome::AlreadyAccepted => NoticeLevel::Info,
                    };
                    notify(&mut notices, level, &outcome.message(&code));
                },
                if row.accepted { "Accepted" } else { "Accept" }
            }
        }
    }
}

#[component]
fn AcceptedCodeItem(code: AcceptedCode, accepted: Signal<AcceptedCodes>) -> Element {
    let removed = code.code.clone();

    rsx! {
        li {
            "{code.code} {code.label} "
            button {
                class: "btn btn-small",
                onclick: move |_| accepted.write().remove(&removed),
                "Remove"
            }
        }
    }
}
