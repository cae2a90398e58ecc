//! Shared UI for the MedicAI browser client.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | `SessionProvider`, `use_session`, `use_client`, logout |
//! | [`role_guard`] | Page-level Role Gate and the unauthenticated view |
//! | [`panels`] | One component per page feature |
//! | [`view_model`] | Pure rendering decisions behind the panels |
//! | [`notice`] | Non-blocking notices for outcomes and failures |
//! | [`config`] | Client configuration with the page-level base URL override |
//! | [`platform`] | Storage backend and client type per target |

pub mod config;
pub mod notice;
pub mod panels;
pub mod platform;
pub mod role_guard;
pub mod session;
pub mod view_model;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub use notice::{notify, use_notices, NoticeBanner, NoticeLevel, Notices};
pub use platform::{login_route, make_client, PlatformClient, PlatformStore};
pub use role_guard::{landing_path, RoleGuard, Unauthenticated};
pub use session::{report_api_error, use_client, use_session, LogoutButton, SessionProvider, SessionState};
