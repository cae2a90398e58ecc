use api::models::AlertStatusUpdate;
use api::RequestSequencer;
use dioxus::prelude::*;

use crate::notice::{notify, use_notices, NoticeLevel};
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::dashboard::{dashboard_view, AlertRow, DashboardView};

/// Monitoring summary for one patient.
///
/// With `patient_id` set the panel is pinned to that patient; otherwise the doctor
/// types the id. The last viewed id lives only as long as the page.
#[component]
pub fn DashboardPanel(patient_id: Option<String>) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let sequencer = use_hook(RequestSequencer::new);
    let pinned = patient_id.clone();
    let mut input = use_signal(|| patient_id.clone().unwrap_or_default());
    let mut last_viewed = use_signal(|| Option::<String>::None);
    let mut view = use_signal(|| Option::<DashboardView>::None);

    let load = use_callback(move |target: String| {
        let client = client.clone();
        let sequencer = sequencer.clone();
        spawn(async move {
            let ticket = sequencer.begin();
            let result = client.dashboard(&target).await;
            if !sequencer.try_apply(ticket) {
                return;
            }
            match result {
                Ok(summary) => {
                    view.set(Some(dashboard_view(&summary)));
                    last_viewed.set(Some(target));
                }
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not load the dashboard"),
            }
        });
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let target = input().trim().to_string();
        if target.is_empty() {
            notify(&mut notices, NoticeLevel::Warning, "Enter a patient id");
            return;
        }
        load.call(target);
    };

    let on_status_changed = move |_| {
        if let Some(target) = last_viewed() {
            load.call(target);
        }
    };

    rsx! {
        section {
            class: "panel",
            h3 { "Monitoring dashboard" }
            form {
                onsubmit: handle_submit,
                if pinned.is_none() {
                    input {
                        placeholder: "Patient id",
                        value: input(),
                        oninput: move |evt: FormEvent| input.set(evt.value()),
                    }
                }
                button { class: "btn btn-secondary", r#type: "submit", "Show dashboard" }
            }
            if let Some(view) = view() {
                div {
                    class: "dashboard",
                    h4 { "{view.title}" }
                    div {
                        class: "dashboard-stats",
                        span { "Care plan: {view.careplan}" }
                        span { "Active alerts: {view.active_alerts}" }
                        span { "Adherence: {view.adherence}" }
                    }
                    if !view.vitals.is_empty() {
                        table {
                            class: "vitals",
                            for vital in view.vitals.iter() {
                                tr {
                                    key: "{vital.code}",
                                    td { "{vital.code}" }
                                    td { "{vital.value}" }
                                    td { {vital.when.clone().unwrap_or_default()} }
                                }
                            }
                        }
                    }
                    if view.alerts.is_empty() {
                        p { class: "empty", "No alerts." }
                    }
                    for alert in view.alerts.into_iter() {
                        AlertItem { key: "{alert.id}", alert: alert.clone(), on_changed: on_status_changed }
                    }
                }
            }
        }
    }
}

#[component]
fn AlertItem(alert: AlertRow, on_changed: EventHandler<()>) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let alert_id = alert.id.clone();
    let action = alert.next.clone();

    let advance = move |_| {
        let Some(action) = action.clone() else {
            return;
        };
        let client = client.clone();
        let alert_id = alert_id.clone();
        spawn(async move {
            let update = AlertStatusUpdate {
                status: action.target,
                notes: None,
            };
            match client.update_alert_status(&alert_id, &update).await {
                Ok(_) => on_changed.call(()),
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not update the alert"),
            }
        });
    };

    rsx! {
        div {
            class: "alert-item severity-{alert.severity}",
            div {
                class: "alert-header",
                strong { "{alert.code}" }
                span { class: "status", "{alert.status}" }
            }
            if !alert.message.is_empty() {
                p { "{alert.message}" }
            }
            if let Some(observed) = alert.observed.as_ref() {
                small { "{observed}" }
            }
            if let Some(next) = alert.next.as_ref() {
                button { class: "btn btn-small", onclick: advance, "{next.label}" }
            }
        }
    }
}
