//! Authentication and session management for the tastytrade API.
//!
//! A [`Session`] holds the token that authenticated requests carry in their
//! `Authorization` header. It starts empty, is filled by logging in and is
//! emptied by logging out:
//!
//! ```no_run
//! use tasty_rs::{LoginInfo, TastyClient, Environment};
//!
//! # async fn example() -> tasty_rs::Result<()> {
//! let client = TastyClient::new(Environment::Sandbox)?;
//! client
//!     .sessions()
//!     .create(&LoginInfo::new("username", "password").remember_me(true))
//!     .await?;
//!
//! let remember_token = client.session().remember_token().await;
//!
//! client.sessions().destroy().await?;
//! # Ok(())
//! # }
//! ```
//!
//! A token obtained elsewhere can be used directly with
//! [`Session::with_token`].

mod session;

pub use session::Session;
