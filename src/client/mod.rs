//! HTTP client and request dispatch for the tastytrade API.
//!
//! [`TastyClient`] is the entry point. Endpoint services build a [`Request`]
//! and hand it to one dispatcher, which attaches authentication according to
//! the request's [`Authentication`] policy, builds the URL according to its
//! [`UrlPolicy`], and classifies the answer.
//!
//! Requests can also be sent directly for endpoints the services don't cover:
//!
//! ```no_run
//! use tasty_rs::client::{Envelope, Request};
//! use tasty_rs::{TastyClient, Environment};
//!
//! # async fn example() -> tasty_rs::Result<()> {
//! let client = TastyClient::login("username", "password", Environment::Sandbox).await?;
//!
//! let exchange = client
//!     .send::<Envelope<serde_json::Value>, _, _>(Request::get("/customers/me"))
//!     .await?;
//! println!("{} {:?}", exchange.response.status, exchange.data);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod request;

pub use config::{ClientConfig, Endpoints, DEFAULT_TIMEOUT};
pub use http::TastyClient;
pub use paginated::{Envelope, Items, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use request::{Authentication, Exchange, Request, ResponseMeta, UrlPolicy};
pub(crate) use http::ClientInner;
