//! Record-amendment workflow: a patient requests a change, a doctor decides.

use serde::{Deserialize, Serialize};

use super::clinical::{opt_string_or_number, string_or_number};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentStatus {
    Requested,
    UnderReview,
    Approved,
    Rejected,
}

impl AdjustmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentStatus::Requested => "requested",
            AdjustmentStatus::UnderReview => "under-review",
            AdjustmentStatus::Approved => "approved",
            AdjustmentStatus::Rejected => "rejected",
        }
    }

    /// Whether a doctor can still decide on the request.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            AdjustmentStatus::Requested | AdjustmentStatus::UnderReview
        )
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdjustmentDecision {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub decided_by: Option<String>,
    pub status: AdjustmentStatus,
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Adjustment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub patient_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub field_path: String,
    #[serde(default)]
    pub new_value: String,
    #[serde(default)]
    pub reason: String,
    pub status: AdjustmentStatus,
    #[serde(default)]
    pub decision: Option<AdjustmentDecision>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AdjustmentList {
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

/// Query of `GET /adjustments`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjustmentFilter {
    pub status: Option<AdjustmentStatus>,
    pub patient_id: Option<String>,
}

impl AdjustmentFilter {
    /// Query string including the leading `?`, or empty.
    pub fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(status) = &self.status {
            params.push(format!("status_filter={}", status.as_str()));
        }
        if let Some(patient_id) = &self.patient_id {
            params.push(format!("patient_id={}", urlencoding::encode(patient_id)));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateAdjustmentRequest {
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub field_path: String,
    pub new_value: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdjustmentDecisionRequest {
    pub status: AdjustmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Answer to `POST /adjustments/{id}/decision`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DecisionOutcome {
    pub adjustment: Adjustment,
    #[serde(default, rename = "carePlanRevision")]
    pub care_plan_revision: Option<serde_json::Value>,
}

/// Answer to `POST /adjustments`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdjustmentEnvelope {
    pub adjustment: Adjustment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let status: AdjustmentStatus = serde_json::from_str("\"under-review\"").unwrap();
        assert_eq!(status, AdjustmentStatus::UnderReview);
        assert_eq!(
            serde_json::to_string(&AdjustmentStatus::Rejected).unwrap(),
            "\"rejected\""
        );
        assert!(status.is_open());
        assert!(!AdjustmentStatus::Approved.is_open());
    }

    #[test]
    fn test_filter_query() {
        assert_eq!(AdjustmentFilter::default().query(), "");
        let filter = AdjustmentFilter {
            status: Some(AdjustmentStatus::UnderReview),
            patient_id: Some("p 1".into()),
        };
        assert_eq!(filter.query(), "?status_filter=under-review&patient_id=p%201");
    }
}
