//! Symbol search service.

use std::sync::Arc;

use crate::client::{ClientInner, Page, Request};
use crate::models::{Symbol, SymbolSearchResult};
use crate::Result;

/// Service for symbol search operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tasty_rs::TastyClient) -> tasty_rs::Result<()> {
/// let results = client.symbols().search("BRK/B").await?;
/// for result in results {
///     println!("{}: {:?}", result.symbol, result.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SymbolsService {
    inner: Arc<ClientInner>,
}

impl SymbolsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Search for symbols starting with `symbol`.
    ///
    /// The symbol is sent as one escaped path segment, so class shares such
    /// as `BRK/B` reach the server as `BRK%2FB`.
    pub async fn search(&self, symbol: &str) -> Result<Vec<SymbolSearchResult>> {
        let path = format!("/symbols/search/{}", Symbol::new(symbol).path_segment());
        let page: Page<SymbolSearchResult> =
            self.inner.page(Request::get(path).opaque_host()).await?;
        Ok(page.items)
    }
}
