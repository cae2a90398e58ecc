//! # API crate — session-scoped client for the MedicAI clinical API
//!
//! Everything a page needs to talk to the external clinical API, built on the
//! session store of the `store` crate.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`transport`] | — | `Transport` seam and the `reqwest` implementation (fetch on wasm) |
//! | [`gateway`] | — | Authenticated Request Gateway: token injection, default content type, uniform 401 sign-out |
//! | [`redirect`] | `web` for the browser redirect | Navigation to the login entry point |
//! | [`gate`] | — | Role Gate and the landing page for a stored session |
//! | [`client`] | — | `ClinicApi`, one typed method per endpoint |
//! | [`models`] | — | Wire models of requests and responses |
//! | [`forms`] | — | Client-side validation and payload builders |
//! | [`sequence`] | — | Per-control request sequencing that drops stale responses |
//! | [`error`] | — | `TransportError`, `GatewayError`, `ApiError`, `FormError` |
//!
//! ## Typical wiring
//!
//! ```ignore
//! let config = ClientConfig::default();
//! let gateway = Gateway::new(
//!     config.base_url(),
//!     HttpTransport::new(),
//!     SessionStore::new(MemoryStore::new()),
//!     BrowserRedirect::new(&config.routes.login),
//! );
//! let api = ClinicApi::new(gateway);
//! ```

pub mod client;
pub mod error;
pub mod forms;
pub mod gate;
pub mod gateway;
pub mod models;
pub mod redirect;
pub mod sequence;
pub mod transport;

pub use client::ClinicApi;
pub use error::{ApiError, FormError, GatewayError, TransportError};
pub use gate::{GateDecision, Landing, RoleGate};
pub use gateway::{Gateway, RequestOptions};
pub use redirect::{BrowserRedirect, LoginRedirect};
pub use sequence::{RequestSequencer, Ticket};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

pub use store::{ClientConfig, KeyValueStore, Role, Session, SessionStore};
