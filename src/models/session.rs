//! Login and session models.

use serde::{Deserialize, Serialize};

/// Credentials for creating a session.
///
/// Either a password or a remember token from an earlier login is required.
#[derive(Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoginInfo {
    /// Username or email
    pub login: String,
    /// Account password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Ask the server for a remember token
    pub remember_me: bool,
    /// Remember token from an earlier login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_token: Option<String>,
}

impl LoginInfo {
    /// Log in with a password.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: Some(password.into()),
            remember_me: false,
            remember_token: None,
        }
    }

    /// Log in with a remember token.
    pub fn with_remember_token(login: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: None,
            remember_me: true,
            remember_token: Some(token.into()),
        }
    }

    /// Set whether to request a remember token.
    pub fn remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }
}

impl std::fmt::Debug for LoginInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInfo")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("remember_me", &self.remember_me)
            .field(
                "remember_token",
                &self.remember_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// User information returned by login and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct User {
    /// User's email address
    #[serde(default)]
    pub email: String,
    /// Username
    #[serde(default)]
    pub username: String,
    /// External ID
    #[serde(default)]
    pub external_id: Option<String>,
    /// Whether the user is confirmed
    #[serde(default)]
    pub is_confirmed: Option<bool>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionData {
    /// The logged-in user
    pub user: User,
    /// Token for the `Authorization` header
    pub session_token: String,
    /// Token for logging in again without a password
    #[serde(default)]
    pub remember_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_info_wire_format() {
        let json = serde_json::to_value(LoginInfo::new("trader", "hunter2").remember_me(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "login": "trader",
                "password": "hunter2",
                "remember-me": true
            })
        );

        let json = serde_json::to_value(LoginInfo::with_remember_token("trader", "rt")).unwrap();
        assert_eq!(json["remember-token"], "rt");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_login_info_debug_redacts_secrets() {
        let debug_str = format!("{:?}", LoginInfo::new("trader", "hunter2"));
        assert!(debug_str.contains("trader"));
        assert!(!debug_str.contains("hunter2"));
    }
}
