//! Customers service.

use std::sync::Arc;

use crate::client::{ClientInner, Page, Request};
use crate::models::{Account, AccountItem, AccountNumber, Customer, QuoteStreamerTokens};
use crate::Result;

/// Service for customer-level operations.
///
/// Customer IDs are opaque strings; `"me"` names the authenticated customer.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tasty_rs::TastyClient) -> tasty_rs::Result<()> {
/// let customer = client.customers().me().await?;
/// println!("Hello, {:?}!", customer.first_name);
///
/// for account in client.customers().accounts("me").await? {
///     println!("Account: {}", account.account_number);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CustomersService {
    inner: Arc<ClientInner>,
}

impl CustomersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the authenticated customer's profile.
    pub async fn me(&self) -> Result<Customer> {
        self.inner.data(Request::get("/customers/me")).await
    }

    /// Get a customer's profile.
    pub async fn get(&self, customer_id: &str) -> Result<Customer> {
        self.inner
            .data(Request::get(format!("/customers/{}", customer_id)))
            .await
    }

    /// List a customer's accounts.
    pub async fn accounts(&self, customer_id: &str) -> Result<Vec<Account>> {
        let page: Page<AccountItem> = self
            .inner
            .page(Request::get(format!("/customers/{}/accounts", customer_id)))
            .await?;
        Ok(page.into_iter().map(|item| item.account).collect())
    }

    /// Get one of a customer's accounts.
    pub async fn account(
        &self,
        customer_id: &str,
        account_number: &AccountNumber,
    ) -> Result<Account> {
        self.inner
            .data(Request::get(format!(
                "/customers/{}/accounts/{}",
                customer_id, account_number
            )))
            .await
    }

    /// Get the market data streamer endpoint, level and token.
    pub async fn quote_streamer_tokens(&self) -> Result<QuoteStreamerTokens> {
        self.inner.data(Request::get("/quote-streamer-tokens")).await
    }
}
