//! # Session entity and its durable store
//!
//! A [`Session`] is the authenticated identity the client holds for the current
//! browser profile: user id, display name, [`Role`] and the bearer token. Exactly one
//! session exists per origin at a time.
//!
//! ## Storage layout
//!
//! [`SessionStore`] writes two entries through any [`KeyValueStore`]:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`USER_KEY`] (`"user"`) | JSON object `{ "id", "full_name", "user_type", "email"? }` ([`StoredUser`]) |
//! | [`TOKEN_KEY`] (`"token"`) | raw bearer token string |
//!
//! The session is valid only when both entries are present and the user entry
//! parses. Anything else (missing token, truncated JSON, wrong shape) loads as
//! "no session"; the damage is logged, never raised.

use serde::{Deserialize, Deserializer, Serialize};

use crate::kv::KeyValueStore;

/// Storage key of the serialized user object.
pub const USER_KEY: &str = "user";
/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Role of the signed-in user.
///
/// Unknown role strings are kept verbatim in [`Role::Other`] so a stored session
/// round-trips unchanged; role-gated pages treat them as unauthorized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Doctor,
    Patient,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::Other(other) => other,
        }
    }

    /// Whether this is one of the roles the client knows how to serve.
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }

    /// Human-readable label used in greetings.
    pub fn label(&self) -> &str {
        match self {
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
            Role::Other(other) => other,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "doctor" => Role::Doctor,
            "patient" => Role::Patient,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User object as the API returns it and as it is persisted under [`USER_KEY`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    pub user_type: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The authenticated identity and credential held by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub full_name: String,
    pub role: Role,
    pub token: String,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
        token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            full_name: full_name.into(),
            role,
            token: token.into(),
        }
    }

    /// Build a session from the user object of a login/registration response.
    pub fn from_user(user: StoredUser, token: impl Into<String>) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name,
            role: user.user_type,
            token: token.into(),
        }
    }

    fn to_stored_user(&self) -> StoredUser {
        StoredUser {
            id: self.user_id.clone(),
            full_name: self.full_name.clone(),
            user_type: self.role.clone(),
            email: None,
        }
    }
}

/// Durable store for the single per-origin [`Session`].
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying key-value backend.
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Persist the session, overwriting any previous one.
    ///
    /// The previous entries are removed first and the token is written last, so a
    /// write the backend drops leaves nothing that loads instead of a mixed session.
    pub async fn save(&self, session: &Session) {
        self.clear().await;
        match serde_json::to_string(&session.to_stored_user()) {
            Ok(json) => {
                self.store.set(USER_KEY, &json).await;
                self.store.set(TOKEN_KEY, &session.token).await;
            }
            Err(e) => tracing::warn!("Failed to serialize session: {}", e),
        }
    }

    /// Load the stored session; `None` when absent, cleared or malformed.
    pub async fn load(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY).await?;
        if token.trim().is_empty() {
            return None;
        }
        let raw = self.store.get(USER_KEY).await?;
        match serde_json::from_str::<StoredUser>(&raw) {
            Ok(user) => Some(Session::from_user(user, token)),
            Err(e) => {
                tracing::warn!("Ignoring malformed stored session: {}", e);
                None
            }
        }
    }

    /// Token of the stored session, if any.
    pub async fn token(&self) -> Option<String> {
        self.load().await.map(|s| s.token)
    }

    /// Remove every session entry. Idempotent.
    pub async fn clear(&self) {
        self.store.remove(USER_KEY).await;
        self.store.remove(TOKEN_KEY).await;
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn ana() -> Session {
        Session::new("1", "Ana", Role::Doctor, "T")
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let sessions = SessionStore::new(MemoryStore::new());
        assert!(sessions.load().await.is_none());

        sessions.save(&ana()).await;
        assert_eq!(sessions.load().await, Some(ana()));
        assert_eq!(sessions.token().await.as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_session() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&ana()).await;

        let luis = Session::new("2", "Luis", Role::Patient, "U");
        sessions.save(&luis).await;
        assert_eq!(sessions.load().await, Some(luis));
    }

    /// Backend that silently drops writes to one key.
    #[derive(Clone)]
    struct DroppingStore {
        inner: MemoryStore,
        dropped: &'static str,
    }

    impl KeyValueStore for DroppingStore {
        async fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) {
            if key != self.dropped {
                self.inner.set(key, value).await;
            }
        }

        async fn remove(&self, key: &str) {
            self.inner.remove(key).await;
        }
    }

    #[tokio::test]
    async fn test_dropped_write_never_mixes_two_sessions() {
        for dropped in [TOKEN_KEY, USER_KEY] {
            let inner = MemoryStore::new();
            SessionStore::new(inner.clone()).save(&ana()).await;

            let sessions = SessionStore::new(DroppingStore {
                inner: inner.clone(),
                dropped,
            });
            sessions
                .save(&Session::new("2", "Luis", Role::Patient, "TB"))
                .await;

            assert!(sessions.load().await.is_none(), "dropped {dropped}");
            assert!(sessions.token().await.is_none());
        }
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let backend = MemoryStore::new();
        let sessions = SessionStore::new(backend.clone());
        sessions.save(&ana()).await;

        sessions.clear().await;
        assert!(sessions.load().await.is_none());
        assert!(backend.is_empty());

        sessions.clear().await;
        assert!(sessions.load().await.is_none());
    }

    #[tokio::test]
    async fn test_layout_matches_two_entries() {
        let backend = MemoryStore::new();
        SessionStore::new(backend.clone()).save(&ana()).await;

        assert_eq!(backend.get(TOKEN_KEY).await.as_deref(), Some("T"));
        let user: serde_json::Value =
            serde_json::from_str(&backend.get(USER_KEY).await.unwrap()).unwrap();
        assert_eq!(user["id"], "1");
        assert_eq!(user["full_name"], "Ana");
        assert_eq!(user["user_type"], "doctor");
    }

    #[tokio::test]
    async fn test_malformed_user_loads_as_absent() {
        let backend = MemoryStore::new();
        backend.set(TOKEN_KEY, "T").await;
        backend.set(USER_KEY, "{not json").await;

        let sessions = SessionStore::new(backend.clone());
        assert!(sessions.load().await.is_none());

        backend.set(USER_KEY, r#"{"id": "1"}"#).await;
        assert!(sessions.load().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_token_loads_as_absent() {
        let backend = MemoryStore::new();
        backend
            .set(USER_KEY, r#"{"id":"1","full_name":"Ana","user_type":"doctor"}"#)
            .await;
        assert!(SessionStore::new(backend.clone()).load().await.is_none());

        backend.set(TOKEN_KEY, "  ").await;
        assert!(SessionStore::new(backend).load().await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_role_is_preserved() {
        let backend = MemoryStore::new();
        backend.set(TOKEN_KEY, "T").await;
        backend
            .set(USER_KEY, r#"{"id":7,"full_name":"Root","user_type":"admin"}"#)
            .await;

        let session = SessionStore::new(backend).load().await.unwrap();
        assert_eq!(session.user_id, "7");
        assert_eq!(session.role, Role::Other("admin".to_string()));
        assert!(!session.role.is_known());
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(Role::from("doctor"), Role::Doctor);
        assert_eq!(Role::from("patient"), Role::Patient);
        assert_eq!(Role::Doctor.to_string(), "doctor");
        assert_eq!(Role::Patient.label(), "Patient");
        assert_eq!(String::from(Role::Other("nurse".into())), "nurse");
    }
}
