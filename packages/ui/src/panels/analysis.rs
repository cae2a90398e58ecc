use api::{forms, RequestSequencer};
use dioxus::prelude::*;

use crate::notice::{notify, use_notices, NoticeLevel};
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::analysis::{analysis_view, AnalysisView};

/// Free-text case analysis: differentials and suggested tests.
#[component]
pub fn AnalyzePanel() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut case_text = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut result = use_signal(|| Option::<AnalysisView>::None);
    let sequencer = use_hook(RequestSequencer::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let sequencer = sequencer.clone();
        spawn(async move {
            let request = match forms::analyze_request(&case_text()) {
                Ok(request) => request,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            loading.set(true);
            let ticket = sequencer.begin();
            let response = client.analyze(&request).await;
            if sequencer.is_latest(ticket) {
                loading.set(false);
            }
            if !sequencer.try_apply(ticket) {
                return;
            }
            match response {
                Ok(response) => result.set(Some(analysis_view(&response))),
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Analysis failed"),
            }
        });
    };

    rsx! {
        section {
            class: "panel",
            h3 { "Case analysis" }
            form {
                onsubmit: handle_submit,
                textarea {
                    rows: "6",
                    placeholder: "Describe the clinical case (at least 10 characters)",
                    value: case_text(),
                    oninput: move |evt: FormEvent| case_text.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Analyzing..." } else { "Analyze" }
                }
            }
            if let Some(view) = result() {
                div {
                    class: "results",
                    h4 { "Differential diagnoses" }
                    ul {
                        for line in view.differentials.iter() {
                            li { "{line}" }
                        }
                    }
                    h4 { "Suggested tests" }
                    ul {
                        for line in view.tests.iter() {
                            li { "{line}" }
                        }
                    }
                    if let Some(notes) = view.notes.as_ref() {
                        p { class: "notes", "{notes}" }
                    }
                }
            }
        }
    }
}
