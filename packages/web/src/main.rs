use api::Landing;
use dioxus::prelude::*;

use ui::{use_client, use_session, NoticeBanner, SessionProvider};
use views::{DoctorWorkspace, Login, Lookup, PatientRegistration, PatientWorkspace, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/doctor")]
    DoctorWorkspace {},
    #[route("/patient")]
    PatientWorkspace {},
    #[route("/lookup")]
    Lookup {},
    #[route("/patients/new")]
    PatientRegistration {},
}

impl From<Landing> for Route {
    fn from(landing: Landing) -> Self {
        match landing {
            Landing::Login => Route::Login {},
            Landing::DoctorWorkspace => Route::DoctorWorkspace {},
            Landing::PatientWorkspace => Route::PatientWorkspace {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            NoticeBanner {}
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the workspace of the stored session, or to `/login`.
#[component]
fn Root() -> Element {
    let client = use_client();
    let session_state = use_session();
    let nav = use_navigator();

    let landing = use_resource(move || {
        let client = client.clone();
        // Re-evaluate once the stored session has been loaded.
        let _ = session_state.read().loading;
        async move { client.role_gate().landing().await }
    });

    if let Some(landing) = *landing.read() {
        nav.replace(Route::from(landing));
    }

    rsx! {
        div { class: "page-loading", "Loading…" }
    }
}
