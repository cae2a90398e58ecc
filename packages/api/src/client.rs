//! # Typed endpoint client
//!
//! [`ClinicApi`] wraps the [`Gateway`] with one method per endpoint of the external
//! clinical API. Every method goes through [`Gateway::call`], so token injection and
//! the 401 policy apply uniformly; what this layer adds is the mapping of each
//! response into a model or an [`ApiError`].
//!
//! | Method | HTTP | Path |
//! |--------|------|------|
//! | [`login`](ClinicApi::login) | POST | `/auth/login` |
//! | [`register`](ClinicApi::register) | POST | `/auth/register` |
//! | [`current_user`](ClinicApi::current_user) | GET | `/auth/me` |
//! | [`analyze`](ClinicApi::analyze) | POST | `/analyze` |
//! | [`suggest_icd10`](ClinicApi::suggest_icd10) | POST | `/icd10/suggest` |
//! | [`my_history`](ClinicApi::my_history) | GET | `/clinical-records/my-history` |
//! | [`my_patients`](ClinicApi::my_patients) | GET | `/clinical-records/my-patients` |
//! | [`register_patient`](ClinicApi::register_patient) | POST | `/patients/register` |
//! | [`lookup_patient`](ClinicApi::lookup_patient) | GET | `/patients/lookup/{code}` |
//! | [`share_records`](ClinicApi::share_records) | POST | `/patients/share` |
//! | [`doctors`](ClinicApi::doctors) | GET | `/doctors` |
//! | [`list_adjustments`](ClinicApi::list_adjustments) | GET | `/adjustments` |
//! | [`create_adjustment`](ClinicApi::create_adjustment) | POST | `/adjustments` |
//! | [`decide_adjustment`](ClinicApi::decide_adjustment) | POST | `/adjustments/{id}/decision` |
//! | [`dashboard`](ClinicApi::dashboard) | GET | `/dashboard/{patient_id}` |
//! | [`update_alert_status`](ClinicApi::update_alert_status) | POST | `/alerts/{id}/status` |
//! | [`calculate`](ClinicApi::calculate) | GET | `/calculate?tool=&inputs=` |
//! | [`notifications`](ClinicApi::notifications) | GET | `/notifications` |
//!
//! Path segments and query values are percent-encoded.

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{KeyValueStore, Session, SessionStore, StoredUser};

use crate::error::ApiError;
use crate::gate::RoleGate;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{
    Adjustment, AdjustmentDecisionRequest, AdjustmentEnvelope, AdjustmentFilter,
    AdjustmentList, Alert, AlertEnvelope, AlertStatusUpdate, AnalyzeRequest,
    AnalyzeResponse, AuthResponse, CalculatorResult, CalculatorTool, ClinicalRecord,
    CreateAdjustmentRequest, DashboardSummary, DecisionOutcome, DoctorList, DoctorSummary,
    IcdSuggestRequest, IcdSuggestion, IcdSuggestions, LoginRequest, LookupResponse,
    Notification, NotificationList, PatientRegistration, RecordList, RegisterRequest,
    RegisteredPatient, ShareRequest, ShareResponse,
};
use crate::redirect::LoginRedirect;
use crate::transport::{ApiResponse, Transport};

/// Typed client for the external clinical API.
#[derive(Clone, Debug)]
pub struct ClinicApi<T, S, R>
where
    T: Transport,
    S: KeyValueStore,
    R: LoginRedirect,
{
    gateway: Gateway<T, S, R>,
}

fn decode<M: DeserializeOwned>(response: &ApiResponse) -> Result<M, ApiError> {
    if !response.ok() {
        return Err(ApiError::Application {
            status: response.status,
            detail: response.detail(),
        });
    }
    response
        .json()
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn json_body<B: Serialize>(body: &B) -> Result<RequestOptions, ApiError> {
    RequestOptions::post_json(body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl<T, S, R> ClinicApi<T, S, R>
where
    T: Transport,
    S: KeyValueStore + Clone,
    R: LoginRedirect,
{
    pub fn new(gateway: Gateway<T, S, R>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway<T, S, R> {
        &self.gateway
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        self.gateway.sessions()
    }

    /// A Role Gate reading the same session store.
    pub fn role_gate(&self) -> RoleGate<S> {
        RoleGate::new(self.gateway.sessions().clone())
    }

    /// The stored session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.gateway.sessions().load().await
    }

    async fn get<M: DeserializeOwned>(&self, path: &str) -> Result<M, ApiError> {
        let response = self.gateway.call(path, RequestOptions::get()).await?;
        decode(&response)
    }

    async fn post<B: Serialize, M: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<M, ApiError> {
        let response = self.gateway.call(path, json_body(body)?).await?;
        decode(&response)
    }

    async fn exchange_credentials<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Session, ApiError> {
        let options = json_body(body)?.credential_exchange();
        let response = self.gateway.call(path, options).await?;
        let auth: AuthResponse = decode(&response)?;
        let session = Session::from_user(auth.user, auth.token);
        self.gateway.begin_session(&session).await;
        tracing::info!("Signed in as {} ({})", session.full_name, session.role);
        Ok(session)
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        self.exchange_credentials("/auth/login", request).await
    }

    /// Create an account; the new session is persisted like a login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError> {
        self.exchange_credentials("/auth/register", request).await
    }

    /// Explicit logout. Local only; the server keeps no session state.
    pub async fn logout(&self) {
        self.gateway.end_session().await;
        tracing::info!("Signed out");
    }

    /// Validate the stored token and return the user it belongs to.
    pub async fn current_user(&self) -> Result<StoredUser, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        self.post("/analyze", request).await
    }

    pub async fn suggest_icd10(
        &self,
        request: &IcdSuggestRequest,
    ) -> Result<Vec<IcdSuggestion>, ApiError> {
        let list: IcdSuggestions = self.post("/icd10/suggest", request).await?;
        Ok(list.codes)
    }

    pub async fn my_history(&self) -> Result<Vec<ClinicalRecord>, ApiError> {
        let list: RecordList = self.get("/clinical-records/my-history").await?;
        Ok(list.records)
    }

    pub async fn my_patients(&self) -> Result<Vec<ClinicalRecord>, ApiError> {
        let list: RecordList = self.get("/clinical-records/my-patients").await?;
        Ok(list.records)
    }

    pub async fn register_patient(
        &self,
        registration: &PatientRegistration,
    ) -> Result<RegisteredPatient, ApiError> {
        self.post("/patients/register", registration).await
    }

    /// Public lookup by patient code. An unknown code is `Ok(None)`.
    pub async fn lookup_patient(&self, code: &str) -> Result<Option<LookupResponse>, ApiError> {
        let path = format!("/patients/lookup/{}", urlencoding::encode(code));
        let response = self.gateway.call(&path, RequestOptions::get()).await?;
        if response.status == 404 {
            return Ok(None);
        }
        decode(&response).map(Some)
    }

    pub async fn share_records(&self, request: &ShareRequest) -> Result<ShareResponse, ApiError> {
        self.post("/patients/share", request).await
    }

    pub async fn doctors(&self) -> Result<Vec<DoctorSummary>, ApiError> {
        let list: DoctorList = self.get("/doctors").await?;
        Ok(list.doctors)
    }

    pub async fn list_adjustments(
        &self,
        filter: &AdjustmentFilter,
    ) -> Result<Vec<Adjustment>, ApiError> {
        let list: AdjustmentList = self
            .get(&format!("/adjustments{}", filter.query()))
            .await?;
        Ok(list.adjustments)
    }

    pub async fn create_adjustment(
        &self,
        request: &CreateAdjustmentRequest,
    ) -> Result<Adjustment, ApiError> {
        let envelope: AdjustmentEnvelope = self.post("/adjustments", request).await?;
        Ok(envelope.adjustment)
    }

    pub async fn decide_adjustment(
        &self,
        adjustment_id: &str,
        decision: &AdjustmentDecisionRequest,
    ) -> Result<DecisionOutcome, ApiError> {
        let path = format!(
            "/adjustments/{}/decision",
            urlencoding::encode(adjustment_id)
        );
        self.post(&path, decision).await
    }

    pub async fn dashboard(&self, patient_id: &str) -> Result<DashboardSummary, ApiError> {
        self.get(&format!("/dashboard/{}", urlencoding::encode(patient_id)))
            .await
    }

    pub async fn update_alert_status(
        &self,
        alert_id: &str,
        update: &AlertStatusUpdate,
    ) -> Result<Alert, ApiError> {
        let path = format!("/alerts/{}/status", urlencoding::encode(alert_id));
        let envelope: AlertEnvelope = self.post(&path, update).await?;
        Ok(envelope.alert)
    }

    /// Evaluate a calculator; `inputs` is sent as a JSON-encoded query value.
    pub async fn calculate(
        &self,
        tool: CalculatorTool,
        inputs: &serde_json::Value,
    ) -> Result<CalculatorResult, ApiError> {
        let path = format!(
            "/calculate?tool={}&inputs={}",
            urlencoding::encode(tool.as_str()),
            urlencoding::encode(&inputs.to_string())
        );
        self.get(&path).await
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let list: NotificationList = self.get("/notifications").await?;
        Ok(list.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms;
    use crate::gate::Landing;
    use crate::gateway::tests::{gateway, CountingRedirect, MockTransport};
    use crate::models::{AdjustmentStatus, AlertStatus};
    use crate::transport::Method;
    use store::{MemoryStore, Role};

    type TestApi = ClinicApi<MockTransport, MemoryStore, CountingRedirect>;

    fn api() -> (TestApi, MockTransport, MemoryStore, CountingRedirect) {
        let (gw, transport, backend, redirect) = gateway();
        (ClinicApi::new(gw), transport, backend, redirect)
    }

    #[tokio::test]
    async fn test_login_persists_session_and_lands_on_doctor_workspace() {
        let (api, transport, _, _) = api();
        transport.respond(
            200,
            r#"{"message":"ok","token":"T","user":{"id":"1","email":"doc@x.com","full_name":"Ana","user_type":"doctor"}}"#,
        );

        let request = forms::login_request("doc@x.com", "pw").unwrap();
        let session = api.login(&request).await.unwrap();
        assert_eq!(session.role, Role::Doctor);
        assert_eq!(session.token, "T");

        let sent = &transport.sent()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "http://127.0.0.1:8000/auth/login");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"email":"doc@x.com","password":"pw"}));

        let stored = api.session().await.unwrap();
        assert_eq!(stored.role, Role::Doctor);
        assert_eq!(stored.token, "T");
        assert_eq!(api.role_gate().landing().await, Landing::DoctorWorkspace);
        assert!(api.role_gate().evaluate(Role::Doctor).await.authorized);
    }

    #[tokio::test]
    async fn test_failed_login_is_application_error() {
        let (api, transport, backend, redirect) = api();
        transport.respond(401, r#"{"detail":"Invalid credentials"}"#);

        let err = api
            .login(&forms::login_request("doc@x.com", "nope").unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Application {
                status: 401,
                detail: Some("Invalid credentials".into())
            }
        );
        assert!(err.is_rejected_credentials());
        assert!(backend.is_empty());
        assert_eq!(redirect.count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (api, transport, backend, _) = api();
        transport.respond(
            200,
            r#"{"token":"T","user":{"id":2,"full_name":"Luis","user_type":"patient"}}"#,
        );
        api.login(&forms::login_request("l@x.com", "pw").unwrap())
            .await
            .unwrap();
        assert_eq!(api.session().await.unwrap().user_id, "2");

        api.logout().await;
        assert!(backend.is_empty());
        assert_eq!(api.role_gate().landing().await, Landing::Login);
    }

    #[tokio::test]
    async fn test_analyze_too_short_never_hits_network() {
        let (api, transport, _, _) = api();
        assert!(forms::analyze_request("123456789").is_err());
        assert!(transport.sent().is_empty());

        let request = forms::analyze_request("1234567890").unwrap();
        transport.respond(
            200,
            r#"{"differentials":[{"condition":"Angina","probability":"alta","rationale":"dolor"}],"tests":[{"name":"ECG"}]}"#,
        );
        let result = api.analyze(&request).await.unwrap();
        assert_eq!(result.differentials[0].condition, "Angina");

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "http://127.0.0.1:8000/analyze");
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_history_error_detail() {
        let (api, transport, _, _) = api();
        transport.respond(403, r#"{"detail":"Only patients can view history"}"#);
        let err = api.my_history().await.unwrap_err();
        assert_eq!(
            err.user_message("Could not load history"),
            "Only patients can view history"
        );
    }

    #[tokio::test]
    async fn test_decode_error() {
        let (api, transport, _, _) = api();
        transport.respond(200, r#"{"doctors":"nope"}"#);
        assert!(matches!(api.doctors().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unauthorized_propagates() {
        let (api, transport, _, redirect) = api();
        transport.respond(401, "{}");
        let err = api.notifications().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(redirect.count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_not_found_is_none() {
        let (api, transport, _, _) = api();
        transport.respond(404, r#"{"detail":"Patient not found"}"#);
        assert_eq!(api.lookup_patient("AB12").await.unwrap(), None);
        assert_eq!(
            transport.sent()[0].url,
            "http://127.0.0.1:8000/patients/lookup/AB12"
        );
    }

    #[tokio::test]
    async fn test_calculate_encodes_query() {
        let (api, transport, _, _) = api();
        transport.respond(
            200,
            r#"{"tool":"bmi","value":22.9,"units":"kg/m2","flags":["normal"]}"#,
        );
        let inputs = serde_json::json!({"weight_kg": 70.0});
        let result = api.calculate(CalculatorTool::Bmi, &inputs).await.unwrap();
        assert_eq!(result.value, Some(22.9));
        assert_eq!(
            transport.sent()[0].url,
            "http://127.0.0.1:8000/calculate?tool=bmi&inputs=%7B%22weight_kg%22%3A70.0%7D"
        );
    }

    #[tokio::test]
    async fn test_adjustment_decision_path_and_body() {
        let (api, transport, _, _) = api();
        transport.respond(
            200,
            r#"{"adjustment":{"id":"adj-1","patient_id":"p1","field_path":"dose","new_value":"5 mg","reason":"nausea","status":"rejected"},"carePlanRevision":null,"notification":{}}"#,
        );
        let decision = forms::decision_request(false, "keep current dose").unwrap();
        let outcome = api.decide_adjustment("adj-1", &decision).await.unwrap();
        assert_eq!(outcome.adjustment.status, AdjustmentStatus::Rejected);

        let sent = &transport.sent()[0];
        assert_eq!(sent.url, "http://127.0.0.1:8000/adjustments/adj-1/decision");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status":"rejected","rationale":"keep current dose"})
        );
    }

    #[tokio::test]
    async fn test_alert_update() {
        let (api, transport, _, _) = api();
        transport.respond(
            200,
            r#"{"alert":{"id":"a1","code":"spo2","severity":"high","status":"acknowledged"}}"#,
        );
        let alert = api
            .update_alert_status(
                "a1",
                &AlertStatusUpdate {
                    status: AlertStatus::Acknowledged,
                    notes: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(alert.status, AlertStatus::Acknowledged);
        assert_eq!(
            transport.sent()[0].body.as_deref(),
            Some(r#"{"status":"acknowledged"}"#)
        );
    }
}
