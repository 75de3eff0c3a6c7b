//! Error types for the tastytrade API client.
//!
//! Every failure the client can report falls into one of three disjoint
//! kinds:
//!
//! - [`Error::InvalidSession`]: no session token, detected before any I/O.
//! - [`Error::ClientSide`]: a local failure while serializing, encoding,
//!   transporting or decoding. Never reflects server intent.
//! - [`Error::Api`]: the server rejected the request and said why.

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::client::ResponseMeta;

/// A specialized `Result` type for tastytrade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP statuses whose body is decoded as an error envelope.
///
/// This is an exact set, not a range: 402, 405, 409 and friends are not in it
/// and go down the success path.
pub const ERROR_STATUS_CODES: [u16; 7] = [400, 401, 403, 404, 415, 422, 500];

/// Returns `true` if the response body for `status` must be decoded as an
/// error envelope.
pub fn is_error_status(status: StatusCode) -> bool {
    ERROR_STATUS_CODES.contains(&status.as_u16())
}

/// The main error type for all tastytrade API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The session holds no token; nothing was sent.
    #[error("Session is invalid: session token cannot be empty")]
    InvalidSession,

    /// A local failure before, during or after the exchange.
    #[error("Client side error: {kind}")]
    ClientSide {
        /// What went wrong
        #[source]
        kind: ClientSideError,
        /// Response metadata, when an HTTP exchange completed
        response: Option<Box<ResponseMeta>>,
    },

    /// The API answered with an error envelope
    #[error(transparent)]
    Api(Box<ApiError>),

    /// Invalid input provided to a builder
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The underlying cause of an [`Error::ClientSide`].
#[derive(Error, Debug)]
pub enum ClientSideError {
    /// HTTP transport failed (connection, timeout, scheme)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request URL could not be built
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A header value contained invalid characters
    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    /// The query object has a shape that cannot become URL parameters
    #[error("Query encoding error: {0}")]
    Query(String),

    /// A payload was expected but the server sent none
    #[error("Response carried no body")]
    EmptyBody,
}

impl Error {
    /// Wrap a local failure, keeping the response metadata if there is any.
    pub(crate) fn client_side(
        kind: impl Into<ClientSideError>,
        response: Option<ResponseMeta>,
    ) -> Self {
        Error::ClientSide {
            kind: kind.into(),
            response: response.map(Box::new),
        }
    }

    /// The HTTP status the server reported, or 0 when no server-reported
    /// error applies.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Api(err) => err.status_code,
            _ => 0,
        }
    }

    /// The API error code, if the server supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Api(err) if !err.code.is_empty() => Some(err.code.as_str()),
            Error::InvalidSession => Some("invalid_session"),
            _ => None,
        }
    }

    /// The structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(&**err),
            _ => None,
        }
    }

    /// Metadata of the exchange that produced this error, if one happened.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Error::Api(err) => err.response.as_ref(),
            Error::ClientSide { response, .. } => response.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::InvalidSession => true,
            Error::Api(err) => err.status_code == 401,
            _ => false,
        }
    }

    /// Returns `true` if the server rejected the request as malformed or
    /// unauthorized (4xx).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api(err) => (400..500).contains(&err.status_code),
            Error::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if the server reported an internal failure.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api(err) => err.status_code >= 500,
            _ => false,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(Box::new(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::client_side(err, None)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::client_side(err, None)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::client_side(err, None)
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(err: InvalidHeaderValue) -> Self {
        Error::client_side(err, None)
    }
}

/// One field-level validation failure inside a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// The field or area the failure applies to
    #[serde(default)]
    pub domain: String,
    /// Why it failed
    #[serde(default)]
    pub reason: String,
}

/// An error reported by the tastytrade API.
///
/// See <https://developer.tastytrade.com/#error-codes>.
#[derive(Error, Debug, Clone, Deserialize)]
#[error("Error in request {status_code}; code: {code}; message: {message}")]
pub struct ApiError {
    /// Short error code, e.g. `validation_error`
    #[serde(default)]
    pub code: String,
    /// Human-readable description
    #[serde(default)]
    pub message: String,
    /// Field-level failures, in server order
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    /// HTTP status of the response
    #[serde(skip)]
    pub status_code: u16,
    /// Metadata of the response that carried this error
    #[serde(skip)]
    pub response: Option<ResponseMeta>,
}

impl ApiError {
    /// Decode an error envelope.
    ///
    /// Never fails: a body that does not parse produces a fallback error
    /// describing the parse failure. The status code is always set.
    pub fn decode(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorEnvelope {
            error: ApiError,
        }

        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => ApiError {
                status_code: status.as_u16(),
                ..envelope.error
            },
            Err(err) => ApiError {
                code: String::new(),
                message: format!(
                    "tastytrade: unexpected HTTP {}: {} (empty error)",
                    status.as_u16(),
                    err
                ),
                errors: Vec::new(),
                status_code: status.as_u16(),
                response: None,
            },
        }
    }

    /// Attach the metadata of the response this error came from.
    pub(crate) fn with_response(mut self, response: ResponseMeta) -> Self {
        self.response = Some(response);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_status_set_is_exact() {
        for code in ERROR_STATUS_CODES {
            assert!(is_error_status(StatusCode::from_u16(code).unwrap()));
        }
        assert!(!is_error_status(StatusCode::PAYMENT_REQUIRED));
        assert!(!is_error_status(StatusCode::METHOD_NOT_ALLOWED));
        assert!(!is_error_status(StatusCode::CONFLICT));
        assert!(!is_error_status(StatusCode::BAD_GATEWAY));
        assert!(!is_error_status(StatusCode::OK));
    }

    #[test]
    fn test_decode_validation_error() {
        let body = br#"{
            "error": {
                "code": "validation_error",
                "message": "Request validation failed",
                "errors": [
                    {"domain": "email", "reason": "is empty"},
                    {"domain": "password", "reason": "is missing"}
                ]
            }
        }"#;

        let err = ApiError::decode(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.status_code, 400);
        assert_eq!(err.code, "validation_error");
        assert_eq!(err.message, "Request validation failed");
        assert_eq!(
            err.errors,
            vec![
                ErrorDetail {
                    domain: "email".into(),
                    reason: "is empty".into()
                },
                ErrorDetail {
                    domain: "password".into(),
                    reason: "is missing".into()
                },
            ]
        );
    }

    #[test]
    fn test_decode_without_sub_errors() {
        let body = br#"{"error": {"code": "token_invalid", "message": "This token is invalid or has expired"}}"#;

        let err = ApiError::decode(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.status_code, 401);
        assert_eq!(err.code, "token_invalid");
        assert!(err.errors.is_empty());
        assert_eq!(
            err.to_string(),
            "Error in request 401; code: token_invalid; message: This token is invalid or has expired"
        );
    }

    #[test]
    fn test_decode_empty_body_keeps_status() {
        let err = ApiError::decode(StatusCode::UNPROCESSABLE_ENTITY, b"");
        assert_eq!(err.status_code, 422);
        assert!(err.code.is_empty());
        assert!(err.message.starts_with("tastytrade: unexpected HTTP 422: "));
        assert!(err.message.ends_with("(empty error)"));
    }

    #[test]
    fn test_decode_malformed_body_keeps_status() {
        let err = ApiError::decode(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(err.status_code, 500);
        assert!(err.message.contains("unexpected HTTP 500"));
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::InvalidSession.is_auth_error());
        assert_eq!(Error::InvalidSession.status_code(), 0);
        assert_eq!(Error::InvalidSession.code(), Some("invalid_session"));

        let unauthorized: Error = ApiError::decode(
            StatusCode::UNAUTHORIZED,
            br#"{"error": {"code": "unauthorized", "message": "Unauthorized"}}"#,
        )
        .into();
        assert!(unauthorized.is_auth_error());
        assert!(unauthorized.is_client_error());
        assert!(!unauthorized.is_server_error());
        assert_eq!(unauthorized.status_code(), 401);
        assert_eq!(unauthorized.code(), Some("unauthorized"));

        let internal: Error = ApiError::decode(StatusCode::INTERNAL_SERVER_ERROR, b"").into();
        assert!(internal.is_server_error());
        assert_eq!(internal.code(), None);

        let local = Error::client_side(ClientSideError::EmptyBody, None);
        assert_eq!(local.status_code(), 0);
        assert!(local.response().is_none());
        assert!(!local.is_client_error());
    }
}
