//! Record-amendment requests: filed by patients, decided by doctors.

use api::forms::{self, AdjustmentForm};
use api::models::{AdjustmentFilter, AdjustmentStatus};
use dioxus::prelude::*;
use store::Role;

use crate::notice::{notify, use_notices, NoticeLevel};
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::adjustments::{adjustment_rows, AdjustmentRow};

/// Patient view: file a request and follow the ones already filed.
#[component]
pub fn AdjustmentRequestPanel(patient_id: String) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut form = use_signal(AdjustmentForm::default);
    let mut refresh = use_signal(|| 0u32);

    let lister = client.clone();
    let owner = patient_id.clone();
    let rows = use_resource(move || {
        let client = lister.clone();
        let filter = AdjustmentFilter {
            status: None,
            patient_id: Some(owner.clone()),
        };
        let _ = refresh();
        async move {
            match client.list_adjustments(&filter).await {
                Ok(list) => Some(adjustment_rows(&list, &Role::Patient)),
                Err(e) => {
                    report_api_error(&mut notices, &mut session, &e, "Could not load your requests");
                    None
                }
            }
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let patient_id = patient_id.clone();
        spawn(async move {
            let request = match form.read().build(&patient_id) {
                Ok(request) => request,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            match client.create_adjustment(&request).await {
                Ok(_) => {
                    notify(&mut notices, NoticeLevel::Success, "Amendment request sent");
                    form.set(AdjustmentForm::default());
                    refresh += 1;
                }
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not send the request"),
            }
        });
    };

    let rows: Option<Vec<AdjustmentRow>> = rows.read().clone().flatten();

    rsx! {
        section {
            class: "panel",
            h3 { "Request a record amendment" }
            form {
                onsubmit: handle_submit,
                input {
                    placeholder: "Order (optional)",
                    value: form.read().order_id.clone(),
                    oninput: move |evt: FormEvent| form.write().order_id = evt.value(),
                }
                input {
                    placeholder: "Field to change",
                    value: form.read().field_path.clone(),
                    oninput: move |evt: FormEvent| form.write().field_path = evt.value(),
                }
                input {
                    placeholder: "New value",
                    value: form.read().new_value.clone(),
                    oninput: move |evt: FormEvent| form.write().new_value = evt.value(),
                }
                textarea {
                    placeholder: "Reason",
                    value: form.read().reason.clone(),
                    oninput: move |evt: FormEvent| form.write().reason = evt.value(),
                }
                button { class: "btn btn-primary", r#type: "submit", "Send request" }
            }
            if let Some(rows) = rows {
                if rows.is_empty() {
                    p { class: "empty", "No amendment requests yet." }
                }
                for row in rows.into_iter() {
                    AdjustmentRowView { key: "{row.id}", row: row.clone() }
                }
            }
        }
    }
}

/// A decision being drafted for one request.
#[derive(Clone, Debug, PartialEq)]
struct PendingDecision {
    adjustment_id: String,
    approve: bool,
}

/// Doctor view: list requests and approve or reject the open ones.
#[component]
pub fn AdjustmentReviewPanel() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut status_filter = use_signal(|| Option::<AdjustmentStatus>::None);
    let mut refresh = use_signal(|| 0u32);
    let mut pending = use_signal(|| Option::<PendingDecision>::None);
    let mut rationale = use_signal(String::new);

    let lister = client.clone();
    let rows = use_resource(move || {
        let client = lister.clone();
        let filter = AdjustmentFilter {
            status: status_filter(),
            patient_id: None,
        };
        let _ = refresh();
        async move {
            match client.list_adjustments(&filter).await {
                Ok(list) => Some(adjustment_rows(&list, &Role::Doctor)),
                Err(e) => {
                    report_api_error(&mut notices, &mut session, &e, "Could not load amendment requests");
                    None
                }
            }
        }
    });

    let handle_decision = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let Some(decision) = pending() else {
                return;
            };
            let request = match forms::decision_request(decision.approve, &rationale()) {
                Ok(request) => request,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            match client
                .decide_adjustment(&decision.adjustment_id, &request)
                .await
            {
                Ok(outcome) => {
                    let message = if outcome.care_plan_revision.is_some() {
                        "Request approved and the care plan was revised"
                    } else if decision.approve {
                        "Request approved"
                    } else {
                        "Request rejected"
                    };
                    notify(&mut notices, NoticeLevel::Success, message);
                    pending.set(None);
                    rationale.set(String::new());
                    refresh += 1;
                }
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not record the decision"),
            }
        });
    };

    let rows: Option<Vec<AdjustmentRow>> = rows.read().clone().flatten();
    let drafting = pending();

    rsx! {
        section {
            class: "panel",
            h3 { "Amendment requests" }
            select {
                onchange: move |evt: FormEvent| {
                    let status = match evt.value().as_str() {
                        "requested" => Some(AdjustmentStatus::Requested),
                        "under-review" => Some(AdjustmentStatus::UnderReview),
                        "approved" => Some(AdjustmentStatus::Approved),
                        "rejected" => Some(AdjustmentStatus::Rejected),
                        _ => None,
                    };
                    status_filter.set(status);
                },
                option { value: "", "All" }
                option { value: "requested", "Requested" }
                option { value: "under-review", "Under review" }
                option { value: "approved", "Approved" }
                option { value: "rejected", "Rejected" }
            }
            if let Some(decision) = drafting {
                form {
                    class: "decision-form",
                    onsubmit: handle_decision,
                    h4 {
                        if decision.approve { "Approve request {decision.adjustment_id}" } else { "Reject request {decision.adjustment_id}" }
                    }
                    textarea {
                        placeholder: if decision.approve { "Rationale (optional)" } else { "Rationale (required)" },
                        value: rationale(),
                        oninput: move |evt: FormEvent| rationale.set(evt.value()),
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Confirm" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            pending.set(None);
                            rationale.set(String::new());
                        },
                        "Cancel"
                    }
                }
            }
            if let Some(rows) = rows {
                if rows.is_empty() {
                    p { class: "empty", "No amendment requests." }
                }
                for row in rows.into_iter() {
                    AdjustmentRowView {
                        key: "{row.id}",
                        row: row.clone(),
                        on_decide: move |(adjustment_id, approve): (String, bool)| {
                            rationale.set(String::new());
                            pending.set(Some(PendingDecision { adjustment_id, approve }));
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn AdjustmentRowView(row: AdjustmentRow, on_decide: Option<EventHandler<(String, bool)>>) -> Element {
    let approve_id = row.id.clone();
    let reject_id = row.id.clone();

    rsx! {
        div {
            class: "adjustment-item",
            div {
                class: "adjustment-header",
                strong { "{row.field}" }
                span { class: "status {row.status_class}", "{row.status}" }
            }
            p { "New value: {row.new_value}" }
            p { "Reason: {row.reason}" }
            if let Some(date) = row.requested_on.as_ref() {
                small { "Requested on {date}" }
            }
            if let Some(note) = row.decision_note.as_ref() {
                p { class: "decision-note", "Decision: {note}" }
            }
            if let Some(on_decide) = on_decide.filter(|_| row.can_decide) {
                div {
                    class: "adjustment-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_decide.call((approve_id.clone(), true)),
                        "Approve"
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| on_decide.call((reject_id.clone(), false)),
                        "Reject"
                    }
                }
            }
        }
    }
}
