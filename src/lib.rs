//! # tasty-rs
//!
//! A typed async client for the tastytrade brokerage REST API.
//!
//! Every endpoint call goes through one request dispatcher that attaches
//! the session token, builds the URL, encodes the query and JSON body, and
//! classifies the answer into a typed payload or a typed error.
//!
//! ## Features
//!
//! - **Sessions**: password and remember-token login, validation, logout
//! - **Customers and accounts**: profiles, account lists, quote streamer tokens
//! - **Orders**: place, dry-run, replace, edit, cancel and list with pagination
//! - **Instruments**: equities and symbol search, OCC option symbology
//! - **Structured errors**: every failure is a session, client-side or API error
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasty_rs::{TastyClient, Environment};
//!
//! #[tokio::main]
//! async fn main() -> tasty_rs::Result<()> {
//!     let client = TastyClient::login("username", "password", Environment::Sandbox).await?;
//!
//!     let accounts = client.accounts().list().await?;
//!     println!("Found {} accounts", accounts.len());
//!
//!     if let Some(item) = accounts.first() {
//!         let orders = client.orders().live(&item.account.account_number()).await?;
//!         println!("{} working orders", orders.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use tasty_rs::{Error, TastyClient, Environment};
//!
//! # async fn example(client: TastyClient) {
//! match client.customers().me().await {
//!     Ok(customer) => println!("{:?}", customer.email),
//!     Err(Error::InvalidSession) => println!("log in first"),
//!     Err(Error::Api(err)) => {
//!         println!("{} {}: {}", err.status_code, err.code, err.message);
//!         for detail in &err.errors {
//!             println!("  {}: {}", detail.domain, detail.reason);
//!         }
//!     }
//!     Err(err) => println!("request failed: {}", err),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod codec;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{ApiError, ClientSideError, Error, ErrorDetail, Result};
pub use models::{AccountNumber, Environment, LoginInfo, OrderId, Symbol};
pub use client::{ClientConfig, Endpoints, Exchange, Request, ResponseMeta, TastyClient};
pub use auth::Session;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tasty_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::models::{
        // Primitives
        AccountNumber, OrderId, Symbol, Environment,
        // Enums
        InstrumentType, OrderType, OrderAction, TimeInForce, OrderStatus,
        PriceEffect, OptionType,
        // Session and account models
        LoginInfo, User, Account, AccountItem, Customer,
        // Order models
        NewOrder, NewOrderBuilder, Order, OrderEdit, OrderLeg, OrdersQuery, OrderSubmission,
        // Instrument models
        Equity, EquitiesQuery, OccSymbol, SymbolSearchResult,
    };
    pub use crate::client::{ClientConfig, Endpoints, Page, Request, TastyClient};
    pub use crate::auth::Session;
}
