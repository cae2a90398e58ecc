use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_severity() -> String {
    "info".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NotificationList {
    #[serde(default)]
    pub notifications: Vec<Notification>,
}
