//! Authentication and profile setup payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/login` and `POST /api/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Plain password, sent as-is to the backend.
    pub password: String,
}

impl Credentials {
    /// Create credentials from any string-like parts.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Both fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Successful response to `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginReply {
    /// Authenticated account name as echoed by the backend.
    pub username: String,
    /// Whether the account already completed profile setup.
    #[serde(rename = "hasProfile", default)]
    pub has_profile: bool,
    /// Optional human-readable status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generic `{ "message": ... }` body used by signup, profile setup and every
/// error response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Human-readable status text. Empty when the backend omitted it.
    #[serde(default)]
    pub message: String,
}

impl ServerMessage {
    /// Message text, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        Some(self.message.as_str()).filter(|m| !m.is_empty())
    }
}

/// Body of `POST /api/create-profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    /// Account the profile belongs to.
    pub username: String,
    /// Display name. Required by the client before submitting.
    pub full_name: String,
    /// Free-form biography.
    pub bio: String,
    /// Free-form location.
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_reply_reads_camel_case_flag() {
        let reply: LoginReply = serde_json::from_str(
            r#"{"message":"Login Successful!","username":"abc","hasProfile":false}"#,
        )
        .unwrap();

        assert_eq!(reply.username, "abc");
        assert!(!reply.has_profile);
        assert_eq!(reply.message.as_deref(), Some("Login Successful!"));
    }

    #[test]
    fn login_reply_defaults_missing_flag() {
        let reply: LoginReply = serde_json::from_str(r#"{"username":"abc"}"#).unwrap();
        assert!(!reply.has_profile);
    }

    #[test]
    fn server_message_tolerates_missing_text() {
        let message: ServerMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(message.text(), None);
    }

    #[test]
    fn incomplete_credentials() {
        assert!(!Credentials::new("", "x").is_complete());
        assert!(!Credentials::new("abc", "").is_complete());
        assert!(Credentials::new("abc", "x").is_complete());
    }
}
