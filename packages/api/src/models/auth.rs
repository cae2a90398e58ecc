use serde::{Deserialize, Serialize, Serializer};
use store::{Role, StoredUser};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A registration field that only belongs to one role.
///
/// | Variant | Wire |
/// |---------|------|
/// | `Omitted` | key absent (field of the other role) |
/// | `Blank` | `null` (field of this role, left empty) |
/// | `Value(v)` | `"v"` |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoleField {
    #[default]
    Omitted,
    Blank,
    Value(String),
}

impl RoleField {
    /// `Omitted` unless `applies`; then `Blank` or `Value` from `value`.
    pub fn for_role(applies: bool, value: Option<String>) -> Self {
        match (applies, value) {
            (false, _) => RoleField::Omitted,
            (true, None) => RoleField::Blank,
            (true, Some(v)) => RoleField::Value(v),
        }
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, RoleField::Omitted)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            RoleField::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl Serialize for RoleField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RoleField::Value(v) => serializer.serialize_str(v),
            RoleField::Omitted | RoleField::Blank => serializer.serialize_none(),
        }
    }
}

/// Account creation payload. Role-specific fields are omitted for the other role.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub user_type: Role,
    #[serde(skip_serializing_if = "RoleField::is_omitted")]
    pub license_number: RoleField,
    #[serde(skip_serializing_if = "RoleField::is_omitted")]
    pub specialization: RoleField,
    #[serde(skip_serializing_if = "RoleField::is_omitted")]
    pub date_of_birth: RoleField,
    #[serde(skip_serializing_if = "RoleField::is_omitted")]
    pub phone: RoleField,
}

/// Answer to `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: StoredUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_field_states() {
        assert_eq!(RoleField::for_role(false, Some("x".into())), RoleField::Omitted);
        assert_eq!(RoleField::for_role(true, None), RoleField::Blank);
        assert_eq!(
            RoleField::for_role(true, Some("x".into())).value(),
            Some("x")
        );

        let request = RegisterRequest {
            email: "luis@x.com".into(),
            password: "pw".into(),
            full_name: "Luis".into(),
            user_type: Role::Patient,
            license_number: RoleField::Omitted,
            specialization: RoleField::Omitted,
            date_of_birth: RoleField::Value("1990-01-01".into()),
            phone: RoleField::Blank,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("license_number").is_none());
        assert_eq!(body["date_of_birth"], "1990-01-01");
        assert!(body.get("phone").is_some_and(|v| v.is_null()));
    }
}
