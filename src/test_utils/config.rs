//! Configuration builders for tests.

use crate::config::CatalogConfig;
use rust_decimal::Decimal;

/// Builder for catalog configurations pointing at a test server.
#[derive(Debug)]
pub struct TestCatalogConfigBuilder {
    config: CatalogConfig,
}

impl TestCatalogConfigBuilder {
    /// Creates a builder with production defaults and a local URL.
    pub fn new() -> Self {
        Self {
            config: CatalogConfig {
                url: "http://test.local/api/retail/prices".to_string(),
                ..CatalogConfig::default()
            },
        }
    }

    /// Sets the catalog URL, typically a mock server.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Sets the page cap.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Sets the default hours per month.
    pub fn with_hours_in_month(mut self, hours: i64) -> Self {
        self.config.hours_in_month = Decimal::from(hours);
        self
    }

    pub fn build(self) -> CatalogConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_builder() {
        let config = TestCatalogConfigBuilder::new()
            .with_url("http://mock.local/prices")
            .with_max_pages(3)
            .with_hours_in_month(744)
            .build();

        assert_eq!(config.url, "http://mock.local/prices");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.hours_in_month, Decimal::from(744));
        assert_eq!(config.default_region, "westeurope");
        assert_eq!(config.api_version, "2023-01-01-preview");
    }
}
