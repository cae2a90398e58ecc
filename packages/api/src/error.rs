//! Error types for every layer of the client.
//!
//! | Type | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`TransportError`] | [`crate::Transport`] | no response was received (DNS, connection, CORS) |
//! | [`GatewayError`] | [`crate::Gateway::call`] | transport failure, or a 401 that already signed the user out |
//! | [`ApiError`] | [`crate::ClinicApi`] | the above, plus non-2xx answers and undecodable bodies |
//! | [`FormError`] | [`crate::forms`] | client-side validation; never reaches the network |

use thiserror::Error;

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Failure of a single gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    /// The server rejected the token. The session has been cleared and the page
    /// redirected; the response body must not be read.
    #[error("session expired, please sign in again")]
    Unauthorized,
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        GatewayError::Network(err.0)
    }
}

/// Failure of a typed endpoint call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("session expired, please sign in again")]
    Unauthorized,

    /// A response arrived with `ok == false`.
    #[error("request failed ({status}){}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Application { status: u16, detail: Option<String> },

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Network(msg) => ApiError::Network(msg),
            GatewayError::Unauthorized => ApiError::Unauthorized,
        }
    }
}

impl ApiError {
    /// Whether the error is the 401 sign-out signal, which is not shown to the user.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Whether a credential exchange was refused. Login and registration bypass
    /// the sign-out path, so their 401 arrives as an application error.
    pub fn is_rejected_credentials(&self) -> bool {
        matches!(self, ApiError::Application { status: 401, .. })
    }

    /// Message to show the user.
    ///
    /// Application errors use the server's `detail` when it sent one and `fallback`
    /// otherwise; network errors are prefixed so they read as connectivity problems.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(msg) => format!("Network error: {msg}"),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Application {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Application { detail: None, .. } | ApiError::Decode(_) => {
                fallback.to_string()
            }
        }
    }
}

/// Client-side validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{0} has an invalid value")]
    InvalidChoice(&'static str),

    #[error("unsupported calculator: {0}")]
    UnknownTool(String),
}
