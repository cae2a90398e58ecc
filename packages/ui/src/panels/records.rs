use api::RequestSequencer;
use dioxus::prelude::*;

use crate::notice::use_notices;
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::records::{
    record_list, RecordAudience, RecordCard, RecordListView, SectionBody, VisitCard,
};

/// The patient's own history or the doctor's visible records.
#[component]
pub fn RecordsPanel(audience: RecordAudience) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let sequencer = use_hook(RequestSequencer::new);
    let mut list = use_signal(|| Option::<RecordListView>::None);

    let (title, fallback) = match audience {
        RecordAudience::Patient => ("My clinical history", "Could not load your history"),
        RecordAudience::Doctor => ("My patients' records", "Could not load patient records"),
    };

    let load = move |_| {
        let client = client.clone();
        let sequencer = sequencer.clone();
        spawn(async move {
            let ticket = sequencer.begin();
            let result = match audience {
                RecordAudience::Patient => client.my_history().await,
                RecordAudience::Doctor => client.my_patients().await,
            };
            if !sequencer.try_apply(ticket) {
                return;
            }
            match result {
                Ok(records) => list.set(Some(record_list(&records, audience))),
                Err(e) => report_api_error(&mut notices, &mut session, &e, fallback),
            }
        });
    };

    rsx! {
        section {
            class: "panel",
            h3 { "{title}" }
            button { class: "btn btn-secondary", onclick: load, "Load records" }
            if let Some(view) = list() {
                if let Some(message) = view.empty_message.as_ref() {
                    p { class: "empty", "{message}" }
                }
                for card in view.cards.into_iter() {
                    RecordCardView { key: "{card.key}", card: card.clone() }
                }
            }
        }
    }
}

#[component]
pub fn RecordCardView(card: RecordCard) -> Element {
    rsx! {
        div {
            class: "record-item",
            div {
                class: "record-header",
                h4 { "{card.title}" }
                span { class: "record-id", "{card.badge}" }
            }
            p {
                strong { "Case: " }
                "{card.case_text}"
            }
            if !card.differentials.is_empty() {
                div {
                    strong { "Differentials:" }
                    ul {
                        for line in card.differentials.iter() {
                            li { "{line}" }
                        }
                    }
                }
            }
            if !card.tests.is_empty() {
                div {
                    strong { "Tests:" }
                    ul {
                        for line in card.tests.iter() {
                            li { "{line}" }
                        }
                    }
                }
            }
        }
    }
}

/// One visit of the public patient lookup.
#[component]
pub fn VisitCardView(card: VisitCard) -> Element {
    rsx! {
        div {
            class: "visit-item",
            div {
                class: "record-header",
                h4 { "{card.title}" }
                span { class: "record-time", "{card.time}" }
            }
            if !card.vitals.is_empty() {
                div {
                    class: "vital-chips",
                    for chip in card.vitals.iter() {
                        span { class: "vital-chip", "{chip}" }
                    }
                }
            }
            for section in card.sections.iter() {
                div {
                    class: "visit-section",
                    strong { "{section.heading}" }
                    {match &section.body {
                        SectionBody::Text(text) => rsx! { p { "{text}" } },
                        SectionBody::List(items) => rsx! {
                            ul {
                                for item in items.iter() {
                                    li { "{item}" }
                                }
                            }
                        },
                    }}
                }
            }
        }
    }
}
