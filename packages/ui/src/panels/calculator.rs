use std::collections::BTreeMap;

use api::forms::{self, InputKind};
use api::models::CalculatorTool;
use dioxus::prelude::*;

use crate::notice::{notify, use_notices, NoticeLevel};
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::calculator::{calculator_view, CalculatorView};

/// Clinical calculators evaluated server-side.
#[component]
pub fn CalculatorPanel() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut tool = use_signal(|| CalculatorTool::Bmi);
    let mut values = use_signal(BTreeMap::<String, String>::new);
    let mut result = use_signal(|| Option::<CalculatorView>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let tool = tool();
            let inputs = match forms::calculator_inputs(tool, &values.read()) {
                Ok(inputs) => inputs,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            match client.calculate(tool, &inputs).await {
                Ok(answer) => result.set(Some(calculator_view(&answer))),
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Calculation failed"),
            }
        });
    };

    let fields = forms::calculator_fields(tool());

    rsx! {
        section {
            class: "panel",
            h3 { "Clinical calculators" }
            form {
                onsubmit: handle_submit,
                select {
                    value: tool().as_str(),
                    onchange: move |evt: FormEvent| {
                        match forms::calculator_tool(&evt.value()) {
                            Ok(selected) => {
                                tool.set(selected);
                                values.set(BTreeMap::new());
                                result.set(None);
                            }
                            Err(e) => notify(&mut notices, NoticeLevel::Warning, &e.to_string()),
                        }
                    },
                    for choice in CalculatorTool::ALL {
                        option { key: "{choice.as_str()}", value: choice.as_str(), "{choice.label()}" }
                    }
                }
                for field in fields.iter().copied() {
                    label {
                        key: "{field.key}",
                        class: "calculator-field",
                        span { "{field.label}" }
                        {match field.kind {
                            InputKind::Number => rsx! {
                                input {
                                    r#type: "number",
                                    step: "any",
                                    value: values.read().get(field.key).cloned().unwrap_or_default(),
                                    oninput: move |evt: FormEvent| {
                                        values.write().insert(field.key.to_string(), evt.value());
                                    },
                                }
                            },
                            InputKind::Flag => rsx! {
                                input {
                                    r#type: "checkbox",
                                    checked: values.read().get(field.key).is_some_and(|v| v == "true"),
                                    onchange: move |evt: FormEvent| {
                                        values.write().insert(field.key.to_string(), evt.checked().to_string());
                                    },
                                }
                            },
                            InputKind::Choice(options) => rsx! {
                                select {
                                    onchange: move |evt: FormEvent| {
                                        values.write().insert(field.key.to_string(), evt.value());
                                    },
                                    option { value: "", "—" }
                                    for choice in options.iter() {
                                        option { key: "{choice}", value: *choice, "{choice}" }
                                    }
                                }
                            },
                        }}
                    }
                }
                button { class: "btn btn-primary", r#type: "submit", "Calculate" }
            }
            if let Some(view) = result() {
                div {
                    class: "calculator-result",
                    p { strong { "{view.headline}" } }
                    if !view.flags.is_empty() {
                        ul {
                            for flag in view.flags.iter() {
                                li { "{flag}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
