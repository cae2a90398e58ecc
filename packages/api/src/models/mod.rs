//! Wire models of the external clinical API.
//!
//! Request payloads derive `Serialize`, responses derive `Deserialize`. Response
//! models default every field the server may omit, so older or partial payloads
//! still decode.

mod adjustment;
mod auth;
mod calculator;
mod clinical;
mod dashboard;
mod icd;
mod notification;

pub use adjustment::{
    Adjustment, AdjustmentDecision, AdjustmentDecisionRequest, AdjustmentEnvelope,
    AdjustmentFilter, AdjustmentList, AdjustmentStatus, CreateAdjustmentRequest,
    DecisionOutcome,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, RoleField};
pub use calculator::{CalculatorResult, CalculatorTool};
pub use clinical::{
    AnalyzeRequest, AnalyzeResponse, ClinicalRecord, Differential, DoctorList, DoctorSummary,
    LookupPatient, LookupRecord, LookupResponse, PatientRegistration, RecordList,
    RegisteredPatient, ShareRequest, ShareResponse, SuggestedTest, VitalSigns,
};
pub use dashboard::{
    Alert, AlertEnvelope, AlertStatus, AlertStatusUpdate, DashboardSummary, SeriesPoint,
    TimeSeries, VitalReading,
};
pub use icd::{IcdSuggestRequest, IcdSuggestion, IcdSuggestions};
pub use notification::{Notification, NotificationList};
