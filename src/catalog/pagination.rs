//! Page-by-page cursor over one catalog scan.

use crate::catalog::query_builder::QueryBuilder;
use crate::error::Result;
use crate::model::{CatalogPage, CatalogSource, FilterCriteria, PageRequest};

/// Lazily walks the continuation links of a single scan.
///
/// Owned by one operation; callers pull pages with `next_page` and may stop at
/// any point, in which case no further requests are issued.
pub struct PageCursor<'a> {
    source: &'a dyn CatalogSource,
    next: Option<PageRequest>,
    max_pages: usize,
    pages_fetched: usize,
    truncated: bool,
}

impl<'a> PageCursor<'a> {
    /// Starts a scan for `criteria`, fetching at most `max_pages` pages.
    pub fn new(source: &'a dyn CatalogSource, criteria: &FilterCriteria, max_pages: usize) -> Self {
        Self {
            source,
            next: Some(PageRequest::First {
                filter: QueryBuilder::build(criteria),
            }),
            max_pages,
            pages_fetched: 0,
            truncated: false,
        }
    }

    /// Fetches the next page, or `None` once the catalog or the page cap is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<CatalogPage>> {
        if self.pages_fetched >= self.max_pages {
            if self.next.take().is_some() {
                self.truncated = true;
                tracing::warn!(
                    max_pages = self.max_pages,
                    "Page cap reached with more pages available, scan truncated"
                );
            }
            return Ok(None);
        }

        let request = match self.next.take() {
            Some(request) => request,
            None => return Ok(None),
        };

        let page = self.source.fetch_page(&request).await?;
        self.pages_fetched += 1;
        self.next = page.continuation().map(|link| PageRequest::Next {
            link: link.to_string(),
        });

        tracing::debug!(
            page = self.pages_fetched,
            items = page.items.len(),
            has_next = self.next.is_some(),
            "Fetched catalog page"
        );

        Ok(Some(page))
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// True when the catalog offers more pages than were read.
    ///
    /// Covers both the page cap and a caller that stopped pulling early.
    pub fn has_more(&self) -> bool {
        self.truncated || self.next.is_some()
    }
}
