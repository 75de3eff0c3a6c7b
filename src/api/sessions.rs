//! Sessions service for logging in and out.

use std::sync::Arc;

use reqwest::header::HeaderMap;

use crate::client::{ClientInner, Request};
use crate::models::{LoginInfo, SessionData, User};
use crate::Result;

/// Service for session operations.
///
/// Logging in fills the client's [`Session`](crate::Session); logging out
/// empties it.
///
/// # Example
///
/// ```no_run
/// use tasty_rs::LoginInfo;
///
/// # async fn example(client: tasty_rs::TastyClient) -> tasty_rs::Result<()> {
/// let data = client
///     .sessions()
///     .create(&LoginInfo::new("username", "password"))
///     .await?;
/// println!("Logged in as {}", data.user.username);
///
/// let user = client.sessions().validate().await?;
/// client.sessions().destroy().await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionsService {
    inner: Arc<ClientInner>,
}

impl SessionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Log in and store the returned tokens in the client's session.
    ///
    /// This is the only call sent without a session token.
    pub async fn create(&self, login: &LoginInfo) -> Result<SessionData> {
        let data: SessionData = self
            .inner
            .data(Request::post("/sessions").json(login).anonymous(HeaderMap::new()))
            .await?;

        self.inner.session.establish(&data).await;
        tracing::info!(user = %data.user.username, "Session established");
        Ok(data)
    }

    /// Check that the current session token is still accepted.
    pub async fn validate(&self) -> Result<User> {
        self.inner.data(Request::post("/sessions/validate")).await
    }

    /// Log out and clear the client's session.
    ///
    /// The session is left untouched if the server refuses.
    pub async fn destroy(&self) -> Result<()> {
        self.inner.execute(Request::delete("/sessions")).await?;
        self.inner.session.clear().await;
        tracing::info!("Session destroyed");
        Ok(())
    }
}
