//! Response envelopes and pagination.
//!
//! Every success body is wrapped as `{ "data": ..., "context": "..." }`. List
//! payloads nest their items under `data.items`, and the pagination block may
//! sit either beside `data` or inside it.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i32 = 250;

/// The success envelope wrapped around every payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// The payload.
    pub data: T,
    /// Request path echoed by the server.
    #[serde(default)]
    pub context: Option<String>,
    /// Top-level pagination, on list endpoints that report it here.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// The `data` object of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Items<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Pagination, on list endpoints that report it inside `data`.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Pagination metadata, if the server sent any.
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Merge a list envelope into a page, preferring top-level pagination.
    pub(crate) fn from_envelope(envelope: Envelope<Items<T>>) -> Self {
        Self {
            items: envelope.data.items,
            pagination: envelope.pagination.or(envelope.data.pagination),
        }
    }

    /// Returns `true` if more pages follow this one.
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(Pagination::has_more)
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Pagination metadata from a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    /// Items per page.
    pub per_page: i32,
    /// Current page offset (0-indexed).
    pub page_offset: i32,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total_items: i32,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: i32,
}

impl Pagination {
    /// Check if there are more pages after the current one.
    pub fn has_more(&self) -> bool {
        self.page_offset + 1 < self.total_pages
    }

    /// Get the next page offset, if available.
    pub fn next_page(&self) -> Option<i32> {
        if self.has_more() {
            Some(self.page_offset + 1)
        } else {
            None
        }
    }
}
