//! Amendment requests as seen by the patient who filed them or the reviewing doctor.

use api::models::{Adjustment, AdjustmentStatus};
use store::Role;

use super::format_date;

#[derive(Clone, Debug, PartialEq)]
pub struct AdjustmentRow {
    pub id: String,
    pub field: String,
    pub new_value: String,
    pub reason: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub requested_on: Option<String>,
    pub decision_note: Option<String>,
    /// Approve/reject controls are offered.
    pub can_decide: bool,
}

pub fn status_label(status: &AdjustmentStatus) -> &'static str {
    match status {
        AdjustmentStatus::Requested => "Requested",
        AdjustmentStatus::UnderReview => "Under review",
        AdjustmentStatus::Approved => "Approved",
        AdjustmentStatus::Rejected => "Rejected",
    }
}

pub fn adjustment_rows(adjustments: &[Adjustment], viewer: &Role) -> Vec<AdjustmentRow> {
    adjustments
        .iter()
        .map(|a| AdjustmentRow {
            id: a.id.clone(),
            field: a.field_path.clone(),
            new_value: a.new_value.clone(),
            reason: a.reason.clone(),
            status: status_label(&a.status),
            status_class: a.status.as_str(),
            requested_on: a.created_at.as_deref().map(format_date),
            decision_note: a
                .decision
                .as_ref()
                .and_then(|d| d.rationale.clone())
                .filter(|r| !r.trim().is_empty()),
            can_decide: *viewer == Role::Doctor && a.status.is_open(),
        })
        .collect()
}
