//! Patient monitoring dashboard and alert lifecycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::clinical::string_or_number;

/// Alert lifecycle: open → acknowledged → resolved → closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Open,
    Acknowledged,
    Resolved,
    Closed,
}

impl AlertStatus {
    /// The only transition the workflow allows from this state.
    pub fn next(&self) -> Option<AlertStatus> {
        match self {
            AlertStatus::Open => Some(AlertStatus::Acknowledged),
            AlertStatus::Acknowledged => Some(AlertStatus::Resolved),
            AlertStatus::Resolved => Some(AlertStatus::Closed),
            AlertStatus::Closed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Open => "open",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Closed => "closed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub severity: String,
    pub status: AlertStatus,
    #[serde(default)]
    pub observed_at: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub acknowledged_at: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VitalReading {
    pub value: serde_json::Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SeriesPoint {
    #[serde(default)]
    pub t: Option<String>,
    pub v: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimeSeries {
    pub code: String,
    #[serde(default)]
    pub points: Vec<SeriesPoint>,
}

/// Answer to `GET /dashboard/{patient_id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub careplan_active: bool,
    #[serde(default)]
    pub active_alerts: u32,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub last_vitals: BTreeMap<String, VitalReading>,
    #[serde(default)]
    pub timeseries: Vec<TimeSeries>,
    #[serde(default)]
    pub adherence_rate: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlertStatusUpdate {
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AlertEnvelope {
    pub alert: Alert,
}
