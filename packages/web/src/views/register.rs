//! Registration page view with role-specific fields.

use api::forms::RegistrationForm;
use api::Landing;
use dioxus::prelude::*;
use store::Role;
use ui::{report_api_error, use_client, use_notices, use_session, SessionState};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let client = use_client();
    let mut session_state = use_session();
    let mut notices = use_notices();
    let nav = use_navigator();
    let mut form = use_signal(|| RegistrationForm {
        role: Role::Patient.as_str().to_string(),
        ..RegistrationForm::default()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            let request = match form.read().build() {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            loading.set(true);
            match client.register(&request).await {
                Ok(session) => {
                    let landing = Landing::for_session(Some(&session));
                    session_state.set(SessionState {
                        session: Some(session),
                        loading: false,
                    });
                    nav.replace(Route::from(landing));
                }
                Err(e) => {
                    loading.set(false);
                    report_api_error(&mut notices, &mut session_state, &e, "Registration failed");
                }
            }
        });
    };

    let role = Role::from(form.read().role.as_str());

    rsx! {
        div {
            class: "auth-container",

            h1 { "Create Account" }
            p { class: "subtitle", "Sign up for MedicAI" }

            form {
                onsubmit: handle_register,
                class: "auth-form",

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                select {
                    value: form.read().role.clone(),
                    onchange: move |evt: FormEvent| form.write().role = evt.value(),
                    option { value: "patient", "Patient" }
                    option { value: "doctor", "Doctor" }
                }

                input {
                    r#type: "text",
                    placeholder: "Full name",
                    value: form.read().full_name.clone(),
                    oninput: move |evt: FormEvent| form.write().full_name = evt.value(),
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: form.read().email.clone(),
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: form.read().password.clone(),
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }

                if role == Role::Doctor {
                    input {
                        r#type: "text",
                        placeholder: "License number",
                        value: form.read().license_number.clone(),
                        oninput: move |evt: FormEvent| form.write().license_number = evt.value(),
                    }
                    input {
                        r#type: "text",
                        placeholder: "Specialization",
                        value: form.read().specialization.clone(),
                        oninput: move |evt: FormEvent| form.write().specialization = evt.value(),
                    }
                }

                if role == Role::Patient {
                    input {
                        r#type: "date",
                        value: form.read().date_of_birth.clone(),
                        oninput: move |evt: FormEvent| form.write().date_of_birth = evt.value(),
                    }
                    input {
                        r#type: "tel",
                        placeholder: "Phone",
                        value: form.read().phone.clone(),
                        oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "auth-footer",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
