use dioxus::prelude::*;

use crate::notice::use_notices;
use crate::session::{report_api_error, use_client, use_session};
use crate::view_model::notifications::{notification_rows, NotificationRow};

#[component]
pub fn NotificationsPanel() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut rows = use_signal(|| Option::<Vec<NotificationRow>>::None);

    let load = move |_| {
        let client = client.clone();
        spawn(async move {
            match client.notifications().await {
                Ok(list) => rows.set(Some(notification_rows(&list))),
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not load notifications"),
            }
        });
    };

    rsx! {
        section {
            class: "panel",
            h3 { "Notifications" }
            button { class: "btn btn-secondary", onclick: load, "Refresh" }
            if let Some(rows) = rows() {
                if rows.is_empty() {
                    p { class: "empty", "No notifications." }
                }
                ul {
                    for row in rows.into_iter() {
                        li {
                            key: "{row.key}",
                            class: "notification {row.severity}",
                            strong { "{row.title}" }
                            p { "{row.message}" }
                            if let Some(when) = row.when.as_ref() {
                                small { "{when}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
