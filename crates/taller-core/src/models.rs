//! Wire and storage types shared by the session manager, views and CLI.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User identifier as returned by the service (numeric or opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// The authenticated user, exactly as the login endpoint returned it.
///
/// Fields the client does not interpret (auth token, roles, timestamps) are
/// kept in `extra` so the persisted copy round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// First and last name joined; empty when both are missing or blank.
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Full name for the profile view, with a placeholder when empty.
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            crate::messages::NAME_PLACEHOLDER.to_string()
        } else {
            name
        }
    }
}

/// One row of the dashboard user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Joins optional name parts the way the profile card and users table show them.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}

/// Login form payload. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials from raw form input (username is trimmed).
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Registration form payload. Never persisted.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationRequest {
    /// Builds a request from raw form input (everything but the password is trimmed).
    pub fn new(
        username: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_session_keeps_unknown_fields() {
        let raw = json!({
            "id": 1,
            "username": "alice",
            "email": "a@x.com",
            "token": "abc.def",
        });
        let session: Session = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(session.id, UserId::Number(1));
        assert_eq!(session.extra.get("token"), Some(&json!("abc.def")));
        assert_eq!(serde_json::to_value(&session).unwrap(), raw);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let user: UserSummary =
            serde_json::from_value(json!({"id": "u-7", "username": "bob", "email": "b@x.com"}))
                .unwrap();
        assert_eq!(user.id.to_string(), "u-7");
    }

    #[test]
    fn test_full_name_and_placeholder() {
        let mut session: Session =
            serde_json::from_value(json!({"id": 1, "username": "a", "email": "e"})).unwrap();
        assert_eq!(session.full_name(), "");
        assert_eq!(session.display_name(), "-");

        session.first_name = Some("Ana".into());
        assert_eq!(session.display_name(), "Ana");

        session.first_name = Some("  ".into());
        session.last_name = Some(" ".into());
        assert_eq!(session.display_name(), "-");

        session.first_name = Some("Ana".into());
        session.last_name = Some("Pérez".into());
        assert_eq!(session.display_name(), "Ana Pérez");
    }

    #[test]
    fn test_registration_serializes_camel_case_and_trims() {
        let req = RegistrationRequest::new(" alice ", " a@x.com ", " pw ", " Ana ", " Pérez ");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "username": "alice",
                "email": "a@x.com",
                "password": " pw ",
                "firstName": "Ana",
                "lastName": "Pérez",
            })
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new(" alice ", "secret");
        assert_eq!(creds.username, "alice");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
    }
}
