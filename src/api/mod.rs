//! API service modules for tastytrade endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the tastytrade API. All of them go through the client's
//! single request dispatcher.

mod accounts;
mod customers;
mod instruments;
mod orders;
mod sessions;
mod symbols;

pub use accounts::AccountsService;
pub use customers::CustomersService;
pub use instruments::InstrumentsService;
pub use orders::OrdersService;
pub use sessions::SessionsService;
pub use symbols::SymbolsService;
