//! # View models
//!
//! Pure `(data) -> view model` functions. Components in [`crate::panels`] only draw
//! what these return, so every rendering decision is testable without a document.
//!
//! | Module | Source data | View model |
//! |--------|-------------|------------|
//! | [`greeting`] | `Session` | personalized headline |
//! | [`analysis`] | `AnalyzeResponse` | differential and test lines |
//! | [`records`] | `ClinicalRecord`, `LookupResponse` | record cards, lookup visit cards with vitals |
//! | [`icd`] | `IcdSuggestion` | suggestion rows and the page-local accepted-codes list |
//! | [`doctors`] | `DoctorSummary` | doctor cards |
//! | [`adjustments`] | `Adjustment` | amendment rows with the actions the viewer may take |
//! | [`dashboard`] | `DashboardSummary` | summary, latest vitals, alerts with their next transition |
//! | [`calculator`] | `CalculatorResult` | headline and flags |
//! | [`notifications`] | `Notification` | notification rows |

pub mod adjustments;
pub mod analysis;
pub mod calculator;
pub mod dashboard;
pub mod doctors;
pub mod greeting;
pub mod icd;
pub mod notifications;
pub mod records;

mod date;
pub use date::{format_date, format_date_time, format_time};

/// Render a number without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
