//! In-process mock of the tastytrade API.
//!
//! Every request is recorded verbatim. Responses come from canned routes keyed
//! by method and raw path; anything else gets an empty 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use tasty_rs::{ClientConfig, Endpoints, Session, TastyClient};

pub const TEST_TOKEN: &str = "test-session-token";

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// Decoded query pairs, in wire order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(Method, String), Canned>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    base_url: String,
    state: Shared,
}

impl MockServer {
    pub async fn start() -> Self {
        init_logging();

        let state: Shared = Arc::default();
        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer `method path` with a raw body.
    pub fn mock(&self, method: Method, path: &str, status: u16, body: impl Into<String>) {
        let canned = Canned {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
        };
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method, path.to_string()), canned);
    }

    /// Answer `method path` with a JSON body.
    pub fn mock_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.mock(method, path, status, body.to_string());
    }

    /// Answer `method path` with `{"data": data, "context": path}`.
    pub fn mock_data(&self, method: Method, path: &str, data: serde_json::Value) {
        self.mock_json(
            method,
            path,
            200,
            serde_json::json!({ "data": data, "context": path }),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_endpoints(Endpoints::from_base_url(&self.base_url).unwrap())
    }

    /// A client holding [`TEST_TOKEN`].
    pub fn client(&self) -> TastyClient {
        TastyClient::with_session(Session::with_token(TEST_TOKEN), self.config()).unwrap()
    }

    /// A client with an empty session.
    pub fn anonymous_client(&self) -> TastyClient {
        TastyClient::with_config(self.config()).unwrap()
    }
}

async fn respond(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    match state.routes.get(&(method, uri.path().to_string())) {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, "application/json")],
            canned.body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A minimal order as the API returns it.
pub fn order_json(id: u64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "account-number": "5WV12345",
        "time-in-force": "Day",
        "order-type": "Limit",
        "size": "10",
        "underlying-symbol": "AAPL",
        "underlying-instrument-type": "Equity",
        "price": "150.0",
        "price-effect": "Debit",
        "status": status,
        "cancellable": true,
        "editable": true,
        "edited": false,
        "legs": [{
            "instrument-type": "Equity",
            "symbol": "AAPL",
            "quantity": "10",
            "remaining-quantity": "10",
            "action": "Buy to Open",
            "fills": []
        }]
    })
}
