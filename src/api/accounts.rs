//! Accounts service for the authenticated customer's accounts.

use std::sync::Arc;

use crate::client::{ClientInner, Page, Request};
use crate::models::{Account, AccountItem, AccountNumber};
use crate::Result;

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tasty_rs::TastyClient) -> tasty_rs::Result<()> {
/// let accounts = client.accounts().list().await?;
/// for item in accounts {
///     println!("Account: {} ({:?})", item.account.account_number, item.authority_level);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List all accounts for the current customer.
    ///
    /// Returns a list of all trading accounts the user has access to.
    pub async fn list(&self) -> Result<Vec<AccountItem>> {
        let page: Page<AccountItem> = self
            .inner
            .page(Request::get("/customers/me/accounts"))
            .await?;
        Ok(page.items)
    }

    /// Get details for a specific account.
    pub async fn get(&self, account_number: &AccountNumber) -> Result<Account> {
        self.inner
            .data(Request::get(format!(
                "/customers/me/accounts/{}",
                account_number
            )))
            .await
    }
}
