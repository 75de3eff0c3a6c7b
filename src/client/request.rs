//! Request descriptors and exchange results.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

/// How a request authenticates.
#[derive(Debug, Clone, Default)]
pub enum Authentication {
    /// Send the client's session token; fail with
    /// [`Error::InvalidSession`](crate::Error::InvalidSession) if there is none.
    #[default]
    Session,
    /// Send no session token. The headers are sent as given, plus a JSON
    /// content type if they lack one.
    Anonymous(HeaderMap),
}

/// How the request URL is built from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlPolicy {
    /// Base URL followed by the path.
    #[default]
    BaseUrl,
    /// `scheme://base_host` followed by the path taken verbatim.
    ///
    /// Used for paths carrying identifiers with an escaped separator such as
    /// `BRK%2FB`.
    OpaqueHost,
}

/// One HTTP exchange to perform.
///
/// Query and body objects are borrowed and only serialized at dispatch time.
///
/// # Example
///
/// ```
/// use tasty_rs::client::Request;
///
/// #[derive(serde::Serialize)]
/// struct Params {
///     #[serde(rename = "per-page")]
///     per_page: i32,
/// }
///
/// let params = Params { per_page: 10 };
/// let request = Request::get("/accounts/5WV12345/orders").query(&params);
/// assert_eq!(request.path(), "/accounts/5WV12345/orders");
/// ```
#[derive(Debug)]
pub struct Request<'a, Q: ?Sized = (), B: ?Sized = ()> {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<&'a Q>,
    pub(crate) body: Option<&'a B>,
    pub(crate) auth: Authentication,
    pub(crate) url_policy: UrlPolicy,
}

impl<'a> Request<'a> {
    /// A request with no query or body, authenticated by the session.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            auth: Authentication::Session,
            url_policy: UrlPolicy::BaseUrl,
        }
    }

    /// A `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// A `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// A `PATCH` request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// A `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }
}

impl<'a, Q: ?Sized, B: ?Sized> Request<'a, Q, B> {
    /// Attach a query object.
    pub fn query<P: ?Sized>(self, query: &'a P) -> Request<'a, P, B> {
        Request {
            method: self.method,
            path: self.path,
            query: Some(query),
            body: self.body,
            auth: self.auth,
            url_policy: self.url_policy,
        }
    }

    /// Attach a JSON body.
    pub fn json<P: ?Sized>(self, body: &'a P) -> Request<'a, Q, P> {
        Request {
            method: self.method,
            path: self.path,
            query: self.query,
            body: Some(body),
            auth: self.auth,
            url_policy: self.url_policy,
        }
    }

    /// Send without the session token, using these headers instead.
    pub fn anonymous(mut self, headers: HeaderMap) -> Self {
        self.auth = Authentication::Anonymous(headers);
        self
    }

    /// Build the URL from the base host with the path taken verbatim.
    pub fn opaque_host(mut self) -> Self {
        self.url_policy = UrlPolicy::OpaqueHost;
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Status line and headers of a completed exchange.
///
/// The body has already been read by the time this exists.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final request URL
    pub url: Url,
}

impl ResponseMeta {
    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    /// The HTTP status as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

/// The outcome of a successful exchange.
#[derive(Debug, Clone)]
pub struct Exchange<T> {
    /// Response metadata
    pub response: ResponseMeta,
    /// Decoded body; `None` for `204 No Content`
    pub data: Option<T>,
}
