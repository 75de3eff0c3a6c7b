//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::{Environment, Error, Result};

/// Default request timeout applied by the shared transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The set of addresses a client talks to.
///
/// The two named environments differ only in these strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    base_host: String,
    websocket_url: String,
}

impl Endpoints {
    /// Build endpoints from explicit values.
    pub fn new(
        base_url: impl Into<String>,
        base_host: impl Into<String>,
        websocket_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            base_host: base_host.into(),
            websocket_url: websocket_url.into(),
        }
    }

    /// Endpoints for one of the named environments.
    pub fn for_environment(env: Environment) -> Self {
        Self::new(
            env.api_base_url(),
            env.api_base_host(),
            env.account_streamer_url(),
        )
    }

    /// Derive endpoints from a single base URL such as `http://127.0.0.1:8080`.
    ///
    /// The host keeps its port, and the websocket URL reuses the host with a
    /// `ws`/`wss` scheme matching the HTTP one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the URL has no host.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::InvalidInput(format!("base URL has no host: {}", base_url)))?;
        let base_host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let ws_scheme = if parsed.scheme() == "https" { "wss" } else { "ws" };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            websocket_url: format!("{}://{}", ws_scheme, base_host),
            base_host,
        })
    }

    /// Base URL that request paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bare host (with port, if any) used for host-relative URLs.
    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    /// Account streamer websocket URL.
    pub fn websocket_url(&self) -> &str {
        &self.websocket_url
    }

    /// Scheme of the base URL, e.g. `https`.
    pub(crate) fn scheme(&self) -> &str {
        self.base_url.split(':').next().unwrap_or_default()
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

/// Configuration for the tastytrade client.
///
/// # Example
///
/// ```
/// use tasty_rs::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::for_environment(Environment::Sandbox)
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// assert_eq!(config.endpoints.base_url(), "https://api.cert.tastyworks.com");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where requests go
    pub endpoints: Endpoints,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("tasty-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration pointed at a named environment.
    pub fn for_environment(env: Environment) -> Self {
        Self::default().with_endpoints(Endpoints::for_environment(env))
    }

    /// Set the endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.endpoints.base_url(), "https://api.tastyworks.com");
        assert!(config.user_agent.starts_with("tasty-rs/"));
    }

    #[test]
    fn test_environment_endpoints() {
        let prod = Endpoints::for_environment(Environment::Production);
        assert_eq!(prod.base_host(), "api.tastyworks.com");
        assert_eq!(prod.websocket_url(), "wss://streamer.tastyworks.com");
        assert_eq!(prod.scheme(), "https");

        let cert = Endpoints::for_environment(Environment::Sandbox);
        assert_eq!(cert.base_url(), "https://api.cert.tastyworks.com");
        assert_eq!(cert.base_host(), "api.cert.tastyworks.com");
        assert_eq!(cert.websocket_url(), "wss://streamer.cert.tastyworks.com");
    }

    #[test]
    fn test_endpoints_from_base_url() {
        let endpoints = Endpoints::from_base_url("http://127.0.0.1:8080/").unwrap();
        assert_eq!(endpoints.base_url(), "http://127.0.0.1:8080");
        assert_eq!(endpoints.base_host(), "127.0.0.1:8080");
        assert_eq!(endpoints.websocket_url(), "ws://127.0.0.1:8080");
        assert_eq!(endpoints.scheme(), "http");
    }

    #[test]
    fn test_endpoints_from_invalid_base_url() {
        assert!(Endpoints::from_base_url("invalid").is_err());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }
}
