//! HTTP client implementation for the tastytrade API.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::api::{
    AccountsService, CustomersService, InstrumentsService, OrdersService, SessionsService,
    SymbolsService,
};
use crate::auth::Session;
use crate::codec;
use crate::error::{is_error_status, ApiError, ClientSideError};
use crate::models::LoginInfo;
use crate::{Environment, Error, Result};

use super::config::ClientConfig;
use super::paginated::{Envelope, Items, Page};
use super::request::{Authentication, Exchange, Request, ResponseMeta, UrlPolicy};

/// The main client for interacting with the tastytrade API.
///
/// This client provides access to the API services through method calls
/// that return service structs. Every service call goes through a single
/// dispatcher that handles authentication, URL building, encoding and
/// response classification.
///
/// # Example
///
/// ```no_run
/// use tasty_rs::{TastyClient, Environment, AccountNumber};
///
/// # async fn example() -> tasty_rs::Result<()> {
/// let client = TastyClient::login("username", "password", Environment::Sandbox).await?;
///
/// let accounts = client.accounts().list().await?;
/// if let Some(item) = accounts.first() {
///     let account_number = AccountNumber::new(&item.account.account_number);
///     let orders = client.orders().live(&account_number).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TastyClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

/// A completed exchange whose body has been read but not decoded.
pub(crate) enum Completed {
    NoContent(ResponseMeta),
    Content(ResponseMeta, Bytes),
}

impl TastyClient {
    /// Create an unauthenticated client for a named environment.
    pub fn new(env: Environment) -> Result<Self> {
        Self::with_config(ClientConfig::for_environment(env))
    }

    /// Create an unauthenticated client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_session(Session::new(), config)
    }

    /// Create a client that shares an existing session.
    ///
    /// Two clients built from clones of the same session see each other's
    /// logins and logouts.
    pub fn with_session(session: Session, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self::from_parts(http, session, config))
    }

    /// Create an unauthenticated client around a caller-built transport.
    ///
    /// The transport's own timeout and user agent apply; those in `config`
    /// are ignored.
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self::from_parts(http, Session::new(), config)
    }

    /// Login with username/password.
    pub async fn login(
        login: impl Into<String>,
        password: impl Into<String>,
        env: Environment,
    ) -> Result<Self> {
        let client = Self::new(env)?;
        client
            .sessions()
            .create(&LoginInfo::new(login, password))
            .await?;
        Ok(client)
    }

    fn from_parts(http: reqwest::Client, session: Session, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
            }),
        }
    }

    /// Get the sessions service.
    pub fn sessions(&self) -> SessionsService {
        SessionsService::new(self.inner.clone())
    }

    /// Get the customers service.
    pub fn customers(&self) -> CustomersService {
        CustomersService::new(self.inner.clone())
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the symbol search service.
    pub fn symbols(&self) -> SymbolsService {
        SymbolsService::new(self.inner.clone())
    }

    /// Get the instruments service.
    pub fn instruments(&self) -> InstrumentsService {
        InstrumentsService::new(self.inner.clone())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The account streamer websocket URL for this client's environment.
    pub fn websocket_url(&self) -> &str {
        self.inner.config.endpoints.websocket_url()
    }

    /// Perform one exchange and decode the body into `T`.
    ///
    /// `T` is the whole response body, envelope included. A `204 No Content`
    /// answer yields `data: None`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSession`] if the request needs a session and none is held.
    /// - [`Error::Api`] if the server answered with an error status.
    /// - [`Error::ClientSide`] for encoding, transport or decoding failures.
    pub async fn send<T, Q, B>(&self, request: Request<'_, Q, B>) -> Result<Exchange<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.inner.send(request).await
    }

    /// Perform one exchange without decoding the body.
    pub async fn execute<Q, B>(&self, request: Request<'_, Q, B>) -> Result<ResponseMeta>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.inner.execute(request).await
    }
}

impl ClientInner {
    /// Run one HTTP exchange and classify the response.
    ///
    /// Every failure before the request leaves the process is reported
    /// without any I/O. The session is only read.
    pub(crate) async fn dispatch<Q, B>(&self, request: Request<'_, Q, B>) -> Result<Completed>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let Request {
            method,
            path,
            query,
            body,
            auth,
            url_policy,
        } = request;

        let (mut headers, authorization) = match auth {
            Authentication::Session => {
                (HeaderMap::new(), Some(self.session.authorization_header().await?))
            }
            Authentication::Anonymous(headers) => (headers, None),
        };

        let body = match body {
            Some(body) => Some(codec::encode_body(body)?),
            None => None,
        };

        let mut url = self.request_url(&path, url_policy)?;
        if let Some(query) = query {
            let pairs = codec::encode_query(query).map_err(|err| Error::client_side(err, None))?;
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, value);
        }
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        tracing::debug!(method = %method, url = %url, "Dispatching request");

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;

        let meta = ResponseMeta::from_response(&response);
        tracing::debug!(status = %meta.status, url = %meta.url, "Received response");

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return Err(Error::client_side(err, Some(meta))),
        };

        if meta.status == StatusCode::NO_CONTENT {
            return Ok(Completed::NoContent(meta));
        }

        if is_error_status(meta.status) {
            let err = ApiError::decode(meta.status, &body);
            tracing::warn!(
                status = err.status_code,
                code = %err.code,
                message = %err.message,
                "API returned an error"
            );
            return Err(err.with_response(meta).into());
        }

        Ok(Completed::Content(meta, body))
    }

    fn request_url(&self, path: &str, policy: UrlPolicy) -> Result<Url> {
        let endpoints = &self.config.endpoints;
        let raw = match policy {
            UrlPolicy::BaseUrl => format!("{}{}", endpoints.base_url(), path),
            UrlPolicy::OpaqueHost => {
                format!("{}://{}{}", endpoints.scheme(), endpoints.base_host(), path)
            }
        };
        Ok(Url::parse(&raw)?)
    }

    pub(crate) async fn send<T, Q, B>(&self, request: Request<'_, Q, B>) -> Result<Exchange<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        match self.dispatch(request).await? {
            Completed::NoContent(response) => Ok(Exchange {
                response,
                data: None,
            }),
            Completed::Content(response, body) => match serde_json::from_slice(&body) {
                Ok(data) => Ok(Exchange {
                    response,
                    data: Some(data),
                }),
                Err(err) => {
                    tracing::warn!(
                        status = %response.status,
                        error = %err,
                        "Failed to decode response body"
                    );
                    Err(Error::client_side(err, Some(response)))
                }
            },
        }
    }

    pub(crate) async fn execute<Q, B>(&self, request: Request<'_, Q, B>) -> Result<ResponseMeta>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        match self.dispatch(request).await? {
            Completed::NoContent(response) | Completed::Content(response, _) => Ok(response),
        }
    }

    /// Send a request and unwrap the `data` member of the envelope.
    pub(crate) async fn data<T, Q, B>(&self, request: Request<'_, Q, B>) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let Exchange { response, data } = self.send::<Envelope<T>, _, _>(request).await?;
        data.map(|envelope| envelope.data)
            .ok_or_else(|| Error::client_side(ClientSideError::EmptyBody, Some(response)))
    }

    /// Send a request to a list endpoint.
    pub(crate) async fn page<T, Q, B>(&self, request: Request<'_, Q, B>) -> Result<Page<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let Exchange { response, data } = self.send::<Envelope<Items<T>>, _, _>(request).await?;
        data.map(Page::from_envelope)
            .ok_or_else(|| Error::client_side(ClientSideError::EmptyBody, Some(response)))
    }
}

impl std::fmt::Debug for TastyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TastyClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}
