//! Non-blocking notice banner for user-visible outcomes and failures.

use dioxus::prelude::*;

use crate::icons::FaXmark;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice info",
            NoticeLevel::Success => "notice success",
            NoticeLevel::Warning => "notice warning",
            NoticeLevel::Error => "notice error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

/// Notices currently shown, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notices {
    pub entries: Vec<Notice>,
    next_id: u64,
}

/// Older notices are dropped beyond this many.
const MAX_NOTICES: usize = 5;

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: &str, timestamp: String) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp,
            level,
            message: message.to_string(),
        });
        if self.entries.len() > MAX_NOTICES {
            let excess = self.entries.len() - MAX_NOTICES;
            self.entries.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

pub fn notify(notices: &mut Signal<Notices>, level: NoticeLevel, message: &str) {
    match level {
        NoticeLevel::Error => tracing::warn!("{}", message),
        _ => tracing::debug!("{}", message),
    }
    notices.write().push(level, message, current_time());
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[component]
pub fn NoticeBanner() -> Element {
    let mut notices = use_notices();
    let entries = notices().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-stack",
            role: "status",
            for entry in entries.into_iter() {
                div {
                    key: "{entry.id}",
                    class: entry.level.class(),
                    span { class: "notice-time", "{entry.timestamp}" }
                    span { class: "notice-message", " {entry.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(entry.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut notices = Notices::default();
        let a = notices.push(NoticeLevel::Info, "a", "10:00:00".into());
        let b = notices.push(NoticeLevel::Error, "b", "10:00:01".into());
        assert_ne!(a, b);
        notices.dismiss(a);
        assert_eq!(notices.entries.len(), 1);
        assert_eq!(notices.entries[0].message, "b");
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut notices = Notices::default();
        for i in 0..7 {
            notices.push(NoticeLevel::Info, &format!("n{i}"), String::new());
        }
        assert_eq!(notices.entries.len(), MAX_NOTICES);
        assert_eq!(notices.entries[0].message, "n2");
    }
}
