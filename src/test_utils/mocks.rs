//! Mock catalog sources and server helpers for testing.
//!
//! `FakeCatalogSource` serves scripted pages in memory for engine and workflow
//! tests; `MockCatalogServerBuilder` stands up a wiremock Retail Prices API
//! for tests that go through the HTTP client.

use crate::catalog::RetryPolicy;
use crate::error::{PricingError, Result};
use crate::model::{CatalogPage, CatalogSource, PageRequest, PriceRecord};
use crate::test_utils::fixtures::page_json;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock as WireMock, MockServer, ResponseTemplate};

/// Path the mock server serves the price list on.
pub const PRICES_PATH: &str = "/api/retail/prices";

/// Retry policy with millisecond delays so retry tests stay fast.
pub fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_transient_retries: 2,
        max_rate_limit_retries: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

/// In-memory catalog serving one scripted page per index.
///
/// Page `i` links to `page-{i+1}` while more pages remain. Every request is
/// recorded, so tests can assert how far a scan went.
pub struct FakeCatalogSource {
    pages: Vec<Vec<PriceRecord>>,
    fail_at: Option<usize>,
    delay: Option<Duration>,
    requests: Mutex<Vec<PageRequest>>,
}

impl FakeCatalogSource {
    pub fn new(pages: Vec<Vec<PriceRecord>>) -> Self {
        Self {
            pages,
            fail_at: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails with `UpstreamUnavailable` when page `index` is requested.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Sleeps before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn index_of(request: &PageRequest) -> usize {
        match request {
            PageRequest::First { .. } => 0,
            PageRequest::Next { link } => link
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .unwrap_or(usize::MAX),
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalogSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let index = Self::index_of(request);
        if self.fail_at == Some(index) {
            return Err(PricingError::unavailable(1, "scripted failure"));
        }

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_link = if index < self.pages.len().saturating_sub(1) {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };
        Ok(CatalogPage {
            items,
            next_page_link,
        })
    }
}

/// Builder for a wiremock server imitating the Retail Prices API.
///
/// Mocks are matched in the order they are mounted, so a limited mock
/// mounted first (e.g. a burst of 429s) shadows the ones after it.
pub struct MockCatalogServerBuilder {
    server: MockServer,
}

impl MockCatalogServerBuilder {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Catalog URL to put in the client configuration.
    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), PRICES_PATH)
    }

    /// Absolute continuation link for page `skip`.
    pub fn page_link(&self, skip: usize) -> String {
        format!("{}?$skip={}", self.url(), skip)
    }

    /// Answers the first request of a scan.
    pub async fn mock_first_page(self, records: &[PriceRecord], next: Option<&str>) -> Self {
        WireMock::given(method("GET"))
            .and(path(PRICES_PATH))
            .and(query_param("api-version", "2023-01-01-preview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(records, next)))
            .mount(&self.server)
            .await;
        self
    }

    /// Answers the continuation link returned by `page_link(skip)`.
    pub async fn mock_page(self, skip: usize, records: &[PriceRecord], next: Option<&str>) -> Self {
        WireMock::given(method("GET"))
            .and(path(PRICES_PATH))
            .and(query_param("$skip", skip.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(records, next)))
            .mount(&self.server)
            .await;
        self
    }

    /// Answers the next `times` requests with 429, optionally with a Retry-After.
    pub async fn mock_rate_limited(self, times: u64, retry_after: Option<&str>) -> Self {
        let mut response = ResponseTemplate::new(429).set_body_string("Too Many Requests");
        if let Some(seconds) = retry_after {
            response = response.insert_header("Retry-After", seconds);
        }
        WireMock::given(method("GET"))
            .and(path(PRICES_PATH))
            .respond_with(response)
            .up_to_n_times(times)
            .expect(times)
            .mount(&self.server)
            .await;
        self
    }

    /// Answers every request with `status` and `body`.
    pub async fn mock_status(self, status: u16, body: &str) -> Self {
        WireMock::given(method("GET"))
            .and(path(PRICES_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
        self
    }

    pub fn build(self) -> MockServer {
        self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::record;

    #[tokio::test]
    async fn test_fake_source_links_pages() {
        let source = FakeCatalogSource::new(vec![
            vec![record("Compute", "Virtual Machines", "A")],
            vec![record("Compute", "Virtual Machines", "B")],
        ]);

        let first = source
            .fetch_page(&PageRequest::First {
                filter: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(first.continuation(), Some("page-1"));

        let second = source
            .fetch_page(&PageRequest::Next {
                link: "page-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(second.items[0].product_name, "B");
        assert!(second.continuation().is_none());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_catalog_server_builder() {
        let builder = MockCatalogServerBuilder::new().await;
        let url = builder.url();
        let server = builder.mock_status(503, "unavailable").await.build();

        assert!(url.starts_with(&server.uri()));
        assert!(url.ends_with(PRICES_PATH));
    }
}
