//! # Role Gate
//!
//! Decides, once per page load, whether the stored session may use a role-specific
//! page. There is no state machine: the decision is a pure function of the stored
//! session and the role the page requires.
//!
//! | Stored session | `required` | `authorized` |
//! |----------------|------------|--------------|
//! | none | any | `false` |
//! | role == `required` | any | `true` |
//! | other role (including unknown strings) | any | `false` |

use store::{KeyValueStore, Role, Session, SessionStore};

/// Result of [`RoleGate::evaluate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateDecision {
    pub authorized: bool,
    pub session: Option<Session>,
}

impl GateDecision {
    pub fn decide(session: Option<Session>, required: &Role) -> Self {
        let authorized = session.as_ref().is_some_and(|s| &s.role == required);
        Self {
            authorized,
            session,
        }
    }

    /// The session, only when the gate let it through.
    pub fn authorized_session(&self) -> Option<&Session> {
        if self.authorized {
            self.session.as_ref()
        } else {
            None
        }
    }
}

/// Where a fresh page load without an explicit target should go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    Login,
    DoctorWorkspace,
    PatientWorkspace,
}

impl Landing {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session.map(|s| &s.role) {
            Some(Role::Doctor) => Landing::DoctorWorkspace,
            Some(Role::Patient) => Landing::PatientWorkspace,
            _ => Landing::Login,
        }
    }
}

/// Role Gate bound to a session store.
#[derive(Clone, Debug)]
pub struct RoleGate<S: KeyValueStore> {
    sessions: SessionStore<S>,
}

impl<S: KeyValueStore> RoleGate<S> {
    pub fn new(sessions: SessionStore<S>) -> Self {
        Self { sessions }
    }

    pub async fn evaluate(&self, required: Role) -> GateDecision {
        let decision = GateDecision::decide(self.sessions.load().await, &required);
        if !decision.authorized {
            tracing::debug!("Role gate closed for {}", required);
        }
        decision
    }

    pub async fn landing(&self) -> Landing {
        Landing::for_session(self.sessions.load().await.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn gate() -> (RoleGate<MemoryStore>, SessionStore<MemoryStore>) {
        let sessions = SessionStore::new(MemoryStore::new());
        (RoleGate::new(sessions.clone()), sessions)
    }

    #[tokio::test]
    async fn test_authorized_iff_session_role_matches() {
        let roles = [
            Role::Doctor,
            Role::Patient,
            Role::Other("admin".to_string()),
        ];
        for stored in roles.iter() {
            for required in roles.iter() {
                let (gate, sessions) = gate();
                sessions
                    .save(&Session::new("1", "Ana", stored.clone(), "T"))
                    .await;
                let decision = gate.evaluate(required.clone()).await;
                assert_eq!(decision.authorized, stored == required);
                assert_eq!(decision.session.map(|s| s.role), Some(stored.clone()));
            }
        }
    }

    #[tokio::test]
    async fn test_no_session_is_never_authorized() {
        let (gate, _) = gate();
        for required in [Role::Doctor, Role::Patient] {
            let decision = gate.evaluate(required).await;
            assert!(!decision.authorized);
            assert!(decision.session.is_none());
            assert!(decision.authorized_session().is_none());
        }
    }

    #[tokio::test]
    async fn test_wrong_role_keeps_session_but_hides_it() {
        let (gate, sessions) = gate();
        sessions
            .save(&Session::new("2", "Luis", Role::Patient, "T"))
            .await;
        let decision = gate.evaluate(Role::Doctor).await;
        assert!(!decision.authorized);
        assert!(decision.session.is_some());
        assert!(decision.authorized_session().is_none());
    }

    #[tokio::test]
    async fn test_landing() {
        let (gate, sessions) = gate();
        assert_eq!(gate.landing().await, Landing::Login);

        sessions.save(&Session::new("1", "Ana", Role::Doctor, "T")).await;
        assert_eq!(gate.landing().await, Landing::DoctorWorkspace);

        sessions.save(&Session::new("2", "Luis", Role::Patient, "T")).await;
        assert_eq!(gate.landing().await, Landing::PatientWorkspace);

        sessions
            .save(&Session::new("3", "Root", Role::Other("admin".into()), "T"))
            .await;
        assert_eq!(gate.landing().await, Landing::Login);

        sessions.clear().await;
        assert_eq!(gate.landing().await, Landing::Login);
    }
}
