//! Session state for tastytrade API authentication.

use std::sync::Arc;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::models::{SessionData, User};
use crate::{Error, Result};

/// Authentication session for the tastytrade API.
///
/// Holds the session token sent on every authenticated request, plus the
/// remember token and user returned by login. A fresh session is empty.
///
/// # Thread Safety
///
/// `Session` is cheap to clone and clones share state. Each client creates
/// its own session; pass a clone to [`TastyClient::with_session`] to share
/// one deliberately.
///
/// [`TastyClient::with_session`]: crate::TastyClient::with_session
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

#[derive(Default)]
struct SessionState {
    session_token: Option<SecretString>,
    remember_token: Option<SecretString>,
    user: Option<User>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a token obtained elsewhere.
    pub fn with_token(session_token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState {
                session_token: Some(SecretString::from(session_token.into())),
                ..SessionState::default()
            })),
        }
    }

    /// Returns `true` if a session token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.session_token.is_some()
    }

    /// Build the `Authorization` header value from the session token.
    ///
    /// The value is marked sensitive so it never shows up in debug output.
    pub(crate) async fn authorization_header(&self) -> Result<HeaderValue> {
        let state = self.inner.read().await;
        let token = match state.session_token.as_ref() {
            Some(token) if !token.expose_secret().is_empty() => token,
            _ => return Err(Error::InvalidSession),
        };
        let mut value = HeaderValue::from_str(token.expose_secret())?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Get the remember token (if available).
    ///
    /// Store this securely to create future sessions without re-entering
    /// credentials.
    pub async fn remember_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .remember_token
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }

    /// Get the current user (if available).
    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user.clone()
    }

    /// Replace the session token.
    pub async fn set_token(&self, session_token: impl Into<String>) {
        self.inner.write().await.session_token =
            Some(SecretString::from(session_token.into()));
    }

    /// Store what a successful login returned.
    pub(crate) async fn establish(&self, data: &SessionData) {
        let mut state = self.inner.write().await;
        state.session_token = Some(SecretString::from(data.session_token.clone()));
        state.remember_token = data.remember_token.clone().map(SecretString::from);
        state.user = Some(data.user.clone());
    }

    /// Forget all credentials.
    pub async fn clear(&self) {
        let mut state = self.inner.write().await;
        *state = SessionState::default();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_token", &"[REDACTED]")
            .field("remember_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_data() -> SessionData {
        serde_json::from_str(
            r#"{
                "user": {"email": "trader@example.com", "username": "trader", "external-id": "U0001"},
                "session-token": "super-secret-token",
                "remember-token": "remember-me-token"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::with_token("super-secret-token");
        let debug_str = format!("{:?}", session);

        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[tokio::test]
    async fn test_empty_session_is_invalid() {
        let session = Session::new();
        assert!(!session.is_authenticated().await);
        assert!(matches!(
            session.authorization_header().await,
            Err(Error::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn test_empty_token_is_invalid() {
        let session = Session::with_token("");
        assert!(matches!(
            session.authorization_header().await,
            Err(Error::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn test_authorization_header_is_sensitive() {
        let session = Session::with_token("abc123");
        let value = session.authorization_header().await.unwrap();
        assert_eq!(value, "abc123");
        assert!(value.is_sensitive());
    }

    #[tokio::test]
    async fn test_establish_and_clear() {
        let session = Session::new();
        session.establish(&session_data()).await;

        assert!(session.is_authenticated().await);
        assert_eq!(session.remember_token().await.as_deref(), Some("remember-me-token"));
        assert_eq!(session.user().await.map(|u| u.username), Some("trader".to_string()));

        session.clear().await;
        assert!(!session.is_authenticated().await);
        assert!(session.remember_token().await.is_none());
        assert!(session.user().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let session = Session::new();
        let shared = session.clone();
        shared.set_token("shared-token").await;
        assert!(session.is_authenticated().await);
    }
}
