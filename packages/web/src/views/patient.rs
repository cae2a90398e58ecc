use dioxus::prelude::*;
use store::Role;
use ui::panels::{
    AdjustmentRequestPanel, DashboardPanel, DoctorsPanel, NotificationsPanel, RecordsPanel,
    SharePanel,
};
use ui::view_model::records::RecordAudience;
use ui::{use_session, RoleGuard};

/// Patient workspace.
#[component]
pub fn PatientWorkspace() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Patient,
            PatientPanels {}
        }
    }
}

/// Only mounted once the guard let a patient session through.
#[component]
fn PatientPanels() -> Element {
    let session_state = use_session();
    let Some(patient_id) = session_state().session.map(|s| s.user_id) else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "workspace-grid",
            RecordsPanel { audience: RecordAudience::Patient }
            SharePanel { patient_id: patient_id.clone() }
            DoctorsPanel {}
            AdjustmentRequestPanel { patient_id: patient_id.clone() }
            DashboardPanel { patient_id: patient_id.clone() }
            NotificationsPanel {}
        }
    }
}
