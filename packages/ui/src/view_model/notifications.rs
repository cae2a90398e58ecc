use api::models::Notification;

use super::format_date_time;

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationRow {
    pub key: String,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub when: Option<String>,
}

pub fn notification_rows(notifications: &[Notification]) -> Vec<NotificationRow> {
    notifications
        .iter()
        .enumerate()
        .map(|(i, n)| NotificationRow {
            key: n.id.clone().unwrap_or_else(|| i.to_string()),
            title: if n.title.is_empty() {
                "Notification".to_string()
            } else {
                n.title.clone()
            },
            message: n.message.clone(),
            severity: n.severity.to_ascii_lowercase(),
            when: n.created_at.as_deref().map(format_date_time),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let list: Vec<Notification> = serde_json::from_str(
            r#"[{"id":"n1","title":"Solicitud de ajuste actualizada","message":"aprobada","severity":"INFO","created_at":"2024-05-02T08:00:00"},
                {"message":"sin título"}]"#,
        )
        .unwrap();
        let rows = notification_rows(&list);
        assert_eq!(rows[0].severity, "info");
        assert_eq!(rows[0].when.as_deref(), Some("2024-05-02 08:00"));
        assert_eq!(rows[1].key, "1");
        assert_eq!(rows[1].title, "Notification");
        assert_eq!(rows[1].severity, "info");
    }
}
