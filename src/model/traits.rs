use crate::error::Result;
use crate::model::CatalogPage;
use async_trait::async_trait;

/// Where the next page of a scan comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// First page of a scan, constrained by an OData `$filter` expression
    First { filter: String },
    /// Continuation link returned by the previous page
    Next { link: String },
}

/// Trait for a remote, paginated price list.
///
/// Implementors handle transport concerns (retries, backoff, status
/// classification) for a single page. They are shared across concurrent
/// operations, so they must be thread-safe and keep no per-scan state.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one page.
    ///
    /// # Returns
    /// - `Ok(CatalogPage)` with the page items and optional continuation link
    /// - `Err` with a classified upstream error once retries are exhausted
    async fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage>;
}
