use dioxus::prelude::*;
use store::Role;
use ui::panels::{
    AdjustmentReviewPanel, AnalyzePanel, CalculatorPanel, DashboardPanel, IcdPanel,
    RecordsPanel,
};
use ui::view_model::records::RecordAudience;
use ui::RoleGuard;

use crate::Route;

/// Doctor workspace.
#[component]
pub fn DoctorWorkspace() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Doctor,
            nav {
                class: "workspace-nav",
                Link { to: Route::PatientRegistration {}, "Register a patient" }
                Link { to: Route::Lookup {}, "Patient lookup" }
            }
            div {
                class: "workspace-grid",
                AnalyzePanel {}
                IcdPanel {}
                RecordsPanel { audience: RecordAudience::Doctor }
                AdjustmentReviewPanel {}
                DashboardPanel {}
                CalculatorPanel {}
            }
        }
    }
}
