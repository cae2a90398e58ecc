//! Monitoring dashboard summary and alert rows.

use api::models::{Alert, AlertStatus, DashboardSummary};

use super::{format_date_time, format_number};

#[derive(Clone, Debug, PartialEq)]
pub struct AlertAction {
    pub target: AlertStatus,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlertRow {
    pub id: String,
    pub code: String,
    pub severity: String,
    pub status: &'static str,
    pub message: String,
    pub observed: Option<String>,
    /// The single transition offered for this alert.
    pub next: Option<AlertAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VitalRow {
    pub code: String,
    pub value: String,
    pub when: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub careplan: &'static str,
    pub active_alerts: u32,
    pub adherence: String,
    pub vitals: Vec<VitalRow>,
    pub alerts: Vec<AlertRow>,
}

pub fn next_action(status: AlertStatus) -> Option<AlertAction> {
    status.next().map(|target| AlertAction {
        target,
        label: match target {
            AlertStatus::Acknowledged => "Acknowledge",
            AlertStatus::Resolved => "Resolve",
            AlertStatus::Closed => "Close",
            AlertStatus::Open => "Reopen",
        },
    })
}

pub fn alert_row(alert: &Alert) -> AlertRow {
    AlertRow {
        id: alert.id.clone(),
        code: alert.code.clone(),
        severity: alert.severity.clone(),
        status: alert.status.as_str(),
        message: alert.message.clone().unwrap_or_default(),
        observed: alert.observed_at.as_deref().map(format_date_time),
        next: next_action(alert.status),
    }
}

fn reading(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "—".to_string(),
        other => other.to_string(),
    }
}

pub fn dashboard_view(summary: &DashboardSummary) -> DashboardView {
    DashboardView {
        title: summary
            .patient_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Patient {}", summary.patient_id)),
        careplan: if summary.careplan_active {
            "Active"
        } else {
            "Inactive"
        },
        active_alerts: summary.active_alerts,
        adherence: summary
            .adherence_rate
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string()),
        vitals: summary
            .last_vitals
            .iter()
            .map(|(code, v)| VitalRow {
                code: code.clone(),
                value: match v.unit.as_deref().filter(|u| !u.is_empty()) {
                    Some(unit) => format!("{} {}", reading(&v.value), unit),
                    None => reading(&v.value),
                },
                when: v.timestamp.as_deref().map(format_date_time),
            })
            .collect(),
        alerts: summary.alerts.iter().map(alert_row).collect(),
    }
}
