//! # Authenticated Request Gateway
//!
//! The single chokepoint through which every call to the external clinical API is
//! issued. [`Gateway::call`] resolves the URL against the configured base, merges the
//! default JSON content type, attaches the stored bearer token and applies the
//! uniform 401 policy.
//!
//! ## Header rules
//!
//! | Header | Rule |
//! |--------|------|
//! | `Content-Type` | `application/json` when a body is present, unless the caller set one |
//! | `Authorization` | `Bearer <token>` whenever a session is stored; absent otherwise; overrides a caller value |
//!
//! ## 401 policy
//!
//! An unauthorized answer clears the [`SessionStore`], redirects to the login entry
//! point and fails the call with [`GatewayError::Unauthorized`]. The sign-out latches on
//! the token that was rejected: concurrent calls that carried the same token (or no token
//! at all, once signed out) do not clear or redirect again. A 401 for any other token
//! signs out again, however that token was stored. [`Gateway::begin_session`] also
//! re-arms the latch.
//!
//! Requests built with [`RequestOptions::credential_exchange`] (login, registration)
//! are exempt: a 401 there means "wrong password", not "expired session".
//!
//! Every other status is returned untouched; checking `ok` is the caller's job.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use store::{KeyValueStore, Session, SessionStore};

use crate::error::GatewayError;
use crate::redirect::LoginRedirect;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Per-call options for [`Gateway::call`].
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Whether a 401 signs the user out. Off for credential exchanges.
    pub sign_out_on_unauthorized: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
            sign_out_on_unauthorized: true,
        }
    }

    pub fn post() -> Self {
        Self {
            method: Method::Post,
            ..Self::get()
        }
    }

    /// POST with a JSON-serialized body.
    pub fn post_json<B: Serialize>(body: &B) -> Result<Self, serde_json::Error> {
        Ok(Self::post().with_body(serde_json::to_string(body)?))
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Mark the request as a credential exchange (login/registration).
    pub fn credential_exchange(mut self) -> Self {
        self.sign_out_on_unauthorized = false;
        self
    }
}

/// The Authenticated Request Gateway.
#[derive(Clone, Debug)]
pub struct Gateway<T, S, R>
where
    T: Transport,
    S: KeyValueStore,
    R: LoginRedirect,
{
    base_url: String,
    transport: T,
    sessions: SessionStore<S>,
    redirect: R,
    /// Token of the last sign-out; `None` while armed.
    signed_out: Arc<Mutex<Option<Option<String>>>>,
}

impl<T, S, R> Gateway<T, S, R>
where
    T: Transport,
    S: KeyValueStore,
    R: LoginRedirect,
{
    pub fn new(base_url: &str, transport: T, sessions: SessionStore<S>, redirect: R) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            sessions,
            redirect,
            signed_out: Arc::new(Mutex::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn redirect(&self) -> &R {
        &self.redirect
    }

    /// Persist a freshly issued session and re-arm the 401 handler.
    pub async fn begin_session(&self, session: &Session) {
        self.sessions.save(session).await;
        *self.latch() = None;
    }

    /// Explicit logout: clear the stored session.
    pub async fn end_session(&self) {
        self.sessions.clear().await;
    }

    /// Issue a request to `base_url + path`.
    pub async fn call(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, GatewayError> {
        let token = self.sessions.token().await;
        let request = self.build_request(path, options.clone(), token.as_deref());

        tracing::debug!(
            "{} {} (authenticated: {})",
            request.method.as_str(),
            path,
            token.is_some()
        );

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("{} {} failed: {}", options.method.as_str(), path, e);
                return Err(GatewayError::Network(e.0));
            }
        };

        if response.status == 401 && options.sign_out_on_unauthorized {
            self.sign_out(path, token).await;
            return Err(GatewayError::Unauthorized);
        }

        Ok(response)
    }

    fn build_request(&self, path: &str, options: RequestOptions, token: Option<&str>) -> ApiRequest {
        let mut headers: Vec<(String, String)> = options
            .headers
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("authorization"))
            .collect();

        let has_content_type = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
        if options.body.is_some() && !has_content_type {
            headers.insert(
                0,
                ("Content-Type".to_string(), "application/json".to_string()),
            );
        }

        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        ApiRequest {
            method: options.method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body: options.body,
        }
    }

    fn latch(&self) -> std::sync::MutexGuard<'_, Option<Option<String>>> {
        self.signed_out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the sign-out for `token`. `false` when it was already handled.
    fn claim_sign_out(&self, token: &Option<String>) -> bool {
        let mut latch = self.latch();
        let handled = match (latch.as_ref(), token) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(last), Some(_)) => last == token,
        };
        if !handled {
            *latch = Some(token.clone());
        }
        !handled
    }

    async fn sign_out(&self, path: &str, token: Option<String>) {
        if !self.claim_sign_out(&token) {
            tracing::debug!("401 on {} after sign-out; already redirected", path);
            if token.is_some() && self.sessions.token().await == token {
                self.sessions.clear().await;
            }
            return;
        }
        tracing::warn!("401 on {}; clearing session", path);
        self.sessions.clear().await;
        self.redirect.to_login();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TransportError;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use store::{MemoryStore, Role};

    /// Transport that records every request and replays queued responses.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        pub requests: Arc<Mutex<Vec<ApiRequest>>>,
        responses: Arc<Mutex<VecDeque<Result<ApiResponse, TransportError>>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(ApiResponse::new(status, body)));
            self
        }

        pub fn fail(&self, message: &str) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(TransportError(message.to_string())));
            self
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ApiResponse::new(200, "{}")))
        }
    }

    /// Redirect that counts how often it fired.
    #[derive(Clone, Default)]
    pub(crate) struct CountingRedirect {
        pub count: Arc<Mutex<usize>>,
    }

    impl CountingRedirect {
        pub fn count(&self) -> usize {
            *self.count.lock().unwrap()
        }
    }

    impl LoginRedirect for CountingRedirect {
        fn to_login(&self) {
            *self.count.lock().unwrap() += 1;
        }
    }

    pub(crate) type TestGateway = Gateway<MockTransport, MemoryStore, CountingRedirect>;

    pub(crate) fn gateway() -> (TestGateway, MockTransport, MemoryStore, CountingRedirect) {
        let transport = MockTransport::new();
        let backend = MemoryStore::new();
        let redirect = CountingRedirect::default();
        let gateway = Gateway::new(
            "http://127.0.0.1:8000/",
            transport.clone(),
            SessionStore::new(backend.clone()),
            redirect.clone(),
        );
        (gateway, transport, backend, redirect)
    }

    fn doctor() -> Session {
        Session::new("1", "Ana", Role::Doctor, "T")
    }

    #[tokio::test]
    async fn test_url_joins_base_and_path() {
        let (gw, transport, _, _) = gateway();
        gw.call("/doctors", RequestOptions::get()).await.unwrap();
        assert_eq!(transport.sent()[0].url, "http://127.0.0.1:8000/doctors");
    }

    #[tokio::test]
    async fn test_token_is_attached_when_present() {
        let (gw, transport, _, _) = gateway();
        gw.begin_session(&doctor()).await;

        gw.call("/clinical-records/my-patients", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(transport.sent()[0].header("Authorization"), Some("Bearer T"));
    }

    #[tokio::test]
    async fn test_no_token_no_authorization_header() {
        let (gw, transport, _, _) = gateway();
        gw.call("/doctors", RequestOptions::get()).await.unwrap();
        assert_eq!(transport.sent()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_token_overrides_caller_authorization() {
        let (gw, transport, _, _) = gateway();
        gw.begin_session(&doctor()).await;
        gw.call(
            "/doctors",
            RequestOptions::get().with_header("authorization", "Bearer stale"),
        )
        .await
        .unwrap();

        let sent = &transport.sent()[0];
        assert_eq!(sent.header("Authorization"), Some("Bearer T"));
        assert_eq!(
            sent.headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_json_content_type_for_bodies_only() {
        let (gw, transport, _, _) = gateway();
        gw.call("/doctors", RequestOptions::get()).await.unwrap();
        gw.call("/analyze", RequestOptions::post().with_body("{}"))
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].header("Content-Type"), None);
        assert_eq!(sent[1].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_caller_content_type_wins() {
        let (gw, transport, _, _) = gateway();
        gw.call(
            "/upload",
            RequestOptions::post()
                .with_body("a=b")
                .with_header("content-type", "application/x-www-form-urlencoded"),
        )
        .await
        .unwrap();

        let sent = &transport.sent()[0];
        assert_eq!(
            sent.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(sent.headers.len(), 1);
    }

    #[tokio::test]
    async fn test_non_401_errors_are_returned() {
        let (gw, transport, backend, redirect) = gateway();
        gw.begin_session(&doctor()).await;
        transport.respond(500, r#"{"detail":"boom"}"#);

        let resp = gw.call("/analyze", RequestOptions::post()).await.unwrap();
        assert!(!resp.ok());
        assert_eq!(resp.detail().as_deref(), Some("boom"));
        assert!(!backend.is_empty());
        assert_eq!(redirect.count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let (gw, transport, _, redirect) = gateway();
        transport.fail("connection refused");

        let err = gw.call("/doctors", RequestOptions::get()).await.unwrap_err();
        assert_eq!(err, GatewayError::Network("connection refused".into()));
        assert_eq!(redirect.count(), 0);
    }

    #[tokio::test]
    async fn test_401_clears_and_redirects() {
        let (gw, transport, backend, redirect) = gateway();
        gw.begin_session(&doctor()).await;
        transport.respond(401, r#"{"detail":"Token expired"}"#);

        let err = gw
            .call("/clinical-records/my-patients", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Unauthorized);
        assert!(backend.is_empty());
        assert!(gw.sessions().load().await.is_none());
        assert_eq!(redirect.count(), 1);
    }

    #[tokio::test]
    async fn test_401_without_token_still_clears_stray_session() {
        let (gw, transport, backend, redirect) = gateway();
        // A stray user entry with no token.
        backend
            .set("user", r#"{"id":"2","full_name":"Luis","user_type":"patient"}"#)
            .await;
        transport.respond(401, "{}");

        let err = gw
            .call("/clinical-records/my-history", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Unauthorized);
        assert_eq!(transport.sent()[0].header("Authorization"), None);
        assert!(backend.is_empty());
        assert_eq!(redirect.count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_401s_sign_out_once() {
        let (gw, transport, _, redirect) = gateway();
        gw.begin_session(&doctor()).await;
        transport.respond(401, "{}").respond(401, "{}").respond(401, "{}");

        let (a, b, c) = tokio::join!(
            gw.call("/clinical-records/my-patients", RequestOptions::get()),
            gw.call("/adjustments", RequestOptions::get()),
            gw.call("/notifications", RequestOptions::get()),
        );
        assert_eq!(a.unwrap_err(), GatewayError::Unauthorized);
        assert_eq!(b.unwrap_err(), GatewayError::Unauthorized);
        assert_eq!(c.unwrap_err(), GatewayError::Unauthorized);
        assert_eq!(redirect.count(), 1);
    }

    #[tokio::test]
    async fn test_new_session_rearms_sign_out() {
        let (gw, transport, _, redirect) = gateway();
        gw.begin_session(&doctor()).await;
        transport.respond(401, "{}");
        let _ = gw.call("/doctors", RequestOptions::get()).await;

        gw.begin_session(&doctor()).await;
        transport.respond(401, "{}");
        let _ = gw.call("/doctors", RequestOptions::get()).await;

        assert_eq!(redirect.count(), 2);
    }

    #[tokio::test]
    async fn test_401_for_a_token_stored_elsewhere_signs_out_again() {
        let (gw, transport, backend, redirect) = gateway();
        gw.begin_session(&doctor()).await;
        transport.respond(401, "{}");
        let _ = gw.call("/doctors", RequestOptions::get()).await;
        assert_eq!(redirect.count(), 1);

        // Another tab signs in; the gateway never sees begin_session.
        gw.sessions()
            .save(&Session::new("2", "Luis", Role::Patient, "T2"))
            .await;
        transport.respond(401, "{}");
        let err = gw
            .call("/clinical-records/my-history", RequestOptions::get())
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Unauthorized);
        assert_eq!(transport.sent()[1].header("Authorization"), Some("Bearer T2"));
        assert!(backend.is_empty());
        assert_eq!(redirect.count(), 2);
    }

    #[tokio::test]
    async fn test_repeated_401_for_the_same_token_signs_out_once() {
        let (gw, transport, backend, redirect) = gateway();
        gw.begin_session(&doctor()).await;
        transport.respond(401, "{}");
        let _ = gw.call("/doctors", RequestOptions::get()).await;

        // The same rejected token comes back from storage written elsewhere.
        gw.sessions().save(&doctor()).await;
        transport.respond(401, "{}").respond(401, "{}");
        let _ = gw.call("/doctors", RequestOptions::get()).await;
        let _ = gw.call("/doctors", RequestOptions::get()).await;

        assert!(backend.is_empty());
        assert_eq!(redirect.count(), 1);
    }

    #[tokio::test]
    async fn test_credential_exchange_401_is_plain_response() {
        let (gw, transport, _, redirect) = gateway();
        transport.respond(401, r#"{"detail":"Invalid credentials"}"#);

        let resp = gw
            .call(
                "/auth/login",
                RequestOptions::post().with_body("{}").credential_exchange(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status, 401);
        assert_eq!(resp.detail().as_deref(), Some("Invalid credentials"));
        assert_eq!(redirect.count(), 0);
    }
}
