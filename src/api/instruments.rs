//! Instruments service for retrieving instrument data.

use std::sync::Arc;

use crate::client::{ClientInner, Page, Request};
use crate::models::{EquitiesQuery, Equity, Symbol};
use crate::Result;

/// Service for instrument data operations.
///
/// # Example
///
/// ```no_run
/// use tasty_rs::models::EquitiesQuery;
///
/// # async fn example(client: tasty_rs::TastyClient) -> tasty_rs::Result<()> {
/// let equities = client
///     .instruments()
///     .equities(&EquitiesQuery::symbols(["AAPL", "TSLA"]))
///     .await?;
///
/// let berkshire = client.instruments().equity("BRK/B").await?;
/// # Ok(())
/// # }
/// ```
pub struct InstrumentsService {
    inner: Arc<ClientInner>,
}

impl InstrumentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get equity instruments matching a query.
    pub async fn equities(&self, query: &EquitiesQuery) -> Result<Vec<Equity>> {
        let page: Page<Equity> = self
            .inner
            .page(Request::get("/instruments/equities").query(query))
            .await?;
        Ok(page.items)
    }

    /// Get a single equity by symbol.
    pub async fn equity(&self, symbol: &str) -> Result<Equity> {
        let path = format!(
            "/instruments/equities/{}",
            Symbol::new(symbol).path_segment()
        );
        self.inner.data(Request::get(path).opaque_host()).await
    }
}
