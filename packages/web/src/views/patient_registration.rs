//! Patient registration, restricted to doctors.
//!
//! Besides the stored role the page confirms the account with `GET /auth/me`, so a
//! revoked token closes the page before the form is filled.

use api::forms::PatientForm;
use api::models::RegisteredPatient;
use dioxus::prelude::*;
use store::Role;
use ui::{
    notify, report_api_error, use_client, use_notices, use_session, NoticeLevel, RoleGuard,
};

use crate::Route;

#[component]
pub fn PatientRegistration() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Doctor,
            ConfirmedDoctor {}
        }
    }
}

#[component]
fn ConfirmedDoctor() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();

    let confirmed = use_resource(move || {
        let client = client.clone();
        async move {
            match client.current_user().await {
                Ok(user) => user.user_type == Role::Doctor,
                Err(e) => {
                    report_api_error(&mut notices, &mut session, &e, "Could not verify your account");
                    false
                }
            }
        }
    });

    let confirmed = *confirmed.read();
    match confirmed {
        None => rsx! {
            div { class: "page-loading", "Checking your account…" }
        },
        Some(false) => rsx! {
            div {
                class: "auth-warning",
                h2 { "Access restricted" }
                p { "Only doctors can register patients." }
            }
        },
        Some(true) => rsx! {
            PatientRegistrationForm {}
        },
    }
}

#[component]
fn Field(
    label: &'static str,
    value: String,
    #[props(default = "text")] input_type: &'static str,
    #[props(default = false)] multiline: bool,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "form-field",
            span { "{label}" }
            if multiline {
                textarea {
                    value: value.clone(),
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                }
            } else {
                input {
                    r#type: input_type,
                    step: if input_type == "number" { "any" } else { "" },
                    value: value.clone(),
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                }
            }
        }
    }
}

#[component]
fn PatientRegistrationForm() -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut notices = use_notices();
    let mut form = use_signal(PatientForm::default);
    let mut registered = use_signal(|| Option::<RegisteredPatient>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let registration = match form.read().build() {
                Ok(registration) => registration,
                Err(e) => {
                    notify(&mut notices, NoticeLevel::Warning, &e.to_string());
                    return;
                }
            };
            loading.set(true);
            match client.register_patient(&registration).await {
                Ok(patient) => {
                    tracing::info!("Registered patient {}", patient.patient_code);
                    let message = patient
                        .message
                        .clone()
                        .unwrap_or_else(|| "Patient registered".to_string());
                    notify(&mut notices, NoticeLevel::Success, &message);
                    form.set(PatientForm::default());
                    registered.set(Some(patient));
                }
                Err(e) => report_api_error(&mut notices, &mut session, &e, "Could not register the patient"),
            }
            loading.set(false);
        });
    };

    let f = form();

    rsx! {
        div {
            class: "registration-container",
            h2 { "Register a patient" }
            Link { to: Route::DoctorWorkspace {}, "Back to workspace" }

            if let Some(patient) = registered() {
                div {
                    class: "registration-result",
                    p { "Patient code for {patient.patient_name}:" }
                    strong { class: "patient-code", "{patient.patient_code}" }
                }
            }

            form {
                onsubmit: handle_submit,
                class: "registration-form",

                fieldset {
                    legend { "Identification" }
                    Field { label: "Full name", value: f.full_name.clone(), oninput: move |v| form.write().full_name = v }
                    Field { label: "Date of birth", input_type: "date", value: f.date_of_birth.clone(), oninput: move |v| form.write().date_of_birth = v }
                    Field { label: "Phone", input_type: "tel", value: f.phone.clone(), oninput: move |v| form.write().phone = v }
                    Field { label: "Emergency contact", value: f.emergency_contact.clone(), oninput: move |v| form.write().emergency_contact = v }
                }

                fieldset {
                    legend { "Vital signs" }
                    Field { label: "Heart rate (bpm)", input_type: "number", value: f.heart_rate.clone(), oninput: move |v| form.write().heart_rate = v }
                    Field { label: "Systolic BP (mmHg)", input_type: "number", value: f.blood_pressure_systolic.clone(), oninput: move |v| form.write().blood_pressure_systolic = v }
                    Field { label: "Diastolic BP (mmHg)", input_type: "number", value: f.blood_pressure_diastolic.clone(), oninput: move |v| form.write().blood_pressure_diastolic = v }
                    Field { label: "Respiratory rate (rpm)", input_type: "number", value: f.respiratory_rate.clone(), oninput: move |v| form.write().respiratory_rate = v }
                    Field { label: "Temperature (°C)", input_type: "number", value: f.temperature.clone(), oninput: move |v| form.write().temperature = v }
                    Field { label: "SpO2 (%)", input_type: "number", value: f.oxygen_saturation.clone(), oninput: move |v| form.write().oxygen_saturation = v }
                    Field { label: "Weight (kg)", input_type: "number", value: f.weight.clone(), oninput: move |v| form.write().weight = v }
                    Field { label: "Height (cm)", input_type: "number", value: f.height.clone(), oninput: move |v| form.write().height = v }
                    Field { label: "Blood glucose (mg/dL)", input_type: "number", value: f.blood_glucose.clone(), oninput: move |v| form.write().blood_glucose = v }
                    Field { label: "Waist circumference (cm)", input_type: "number", value: f.waist_circumference.clone(), oninput: move |v| form.write().waist_circumference = v }
                    Field { label: "Pain scale (0-10)", input_type: "number", value: f.pain_scale.clone(), oninput: move |v| form.write().pain_scale = v }
                }

                fieldset {
                    legend { "History" }
                    Field { label: "Allergies (comma separated)", value: f.allergies.clone(), oninput: move |v| form.write().allergies = v }
                    Field { label: "Current medications (comma separated)", value: f.current_medications.clone(), oninput: move |v| form.write().current_medications = v }
                    Field { label: "Past history", multiline: true, value: f.past_history.clone(), oninput: move |v| form.write().past_history = v }
                    Field { label: "Family history", multiline: true, value: f.family_history.clone(), oninput: move |v| form.write().family_history = v }
                }

                fieldset {
                    legend { "Visit" }
                    Field { label: "Reason for visit", multiline: true, value: f.reason_for_visit.clone(), oninput: move |v| form.write().reason_for_visit = v }
                    Field { label: "Physical examination", multiline: true, value: f.physical_examination.clone(), oninput: move |v| form.write().physical_examination = v }
                    Field { label: "Assessment", multiline: true, value: f.assessment.clone(), oninput: move |v| form.write().assessment = v }
                    Field { label: "Diagnosis", multiline: true, value: f.diagnosis.clone(), oninput: move |v| form.write().diagnosis = v }
                    Field { label: "Treatment plan", multiline: true, value: f.treatment_plan.clone(), oninput: move |v| form.write().treatment_plan = v }
                    Field { label: "Follow-up", multiline: true, value: f.follow_up.clone(), oninput: move |v| form.write().follow_up = v }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Registering..." } else { "Register patient" }
                }
            }
        }
    }
}
