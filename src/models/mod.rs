//! Data models for the tastytrade API.
//!
//! This module contains the strongly-typed data structures used to
//! interact with the tastytrade API. Models are organized by domain:
//!
//! - [`primitives`] - Core types like `AccountNumber`, `Symbol`, etc.
//! - [`enums`] - Enumeration types for order types, statuses, etc.
//! - [`session`] - Login credentials and user
//! - [`account`] - Account and customer models
//! - [`order`] - Order-related models
//! - [`instrument`] - Financial instrument models and OCC symbology
//! - [`trading`] - Order submission results (fees, buying power, etc.)

pub mod primitives;
pub mod enums;
pub mod session;
pub mod account;
pub mod order;
pub mod instrument;
pub mod trading;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use session::*;
pub use account::*;
pub use order::*;
pub use instrument::*;
pub use trading::*;
