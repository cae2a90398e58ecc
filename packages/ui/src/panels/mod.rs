//! Feature panels composed into the role workspaces.
//!
//! Each panel owns its page-local state (inputs, last response, accepted codes, the
//! selected dashboard patient) in signals that vanish on navigation. Panels that can
//! fire overlapping requests hold a [`api::RequestSequencer`] and drop stale answers.

mod adjustments;
mod analysis;
mod calculator;
mod dashboard;
mod doctors;
mod icd;
mod notifications;
mod records;

pub use adjustments::{AdjustmentRequestPanel, AdjustmentReviewPanel};
pub use analysis::AnalyzePanel;
pub use calculator::CalculatorPanel;
pub use dashboard::DashboardPanel;
pub use doctors::{DoctorsPanel, SharePanel};
pub use icd::IcdPanel;
pub use notifications::NotificationsPanel;
pub use records::{RecordCardView, RecordsPanel, VisitCardView};
