use crate::catalog::retry::{parse_retry_after, Failure, RetryPolicy, RetryState};
use crate::config::CatalogConfig;
use crate::error::{PricingError, Result};
use crate::model::{CatalogPage, CatalogSource, PageRequest};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tokio::time::sleep;

/// HTTP client for the Azure Retail Prices API.
pub struct Client {
    http_client: HttpClient,
    config: CatalogConfig,
    policy: RetryPolicy,
}

impl Client {
    pub fn new(config: CatalogConfig, policy: RetryPolicy) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| PricingError::unavailable(0, err))?;
        Ok(Self {
            http_client,
            config,
            policy,
        })
    }

    async fn try_fetch(&self, request: &PageRequest) -> Result<CatalogPage, Failure> {
        let builder = match request {
            PageRequest::First { filter } => self.http_client.get(&self.config.url).query(&[
                ("api-version", self.config.api_version.as_str()),
                ("$filter", filter.as_str()),
            ]),
            PageRequest::Next { link } => self.http_client.get(link),
        };

        let response = builder
            .header("user-agent", "azure-pricing-server")
            .send()
            .await
            .map_err(|err| Failure::Transient(format!("request failed: {}", err)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(|err| Failure::Transient(format!("failed to read body: {}", err)))?;
            return serde_json::from_slice::<CatalogPage>(&body)
                .map_err(|err| Failure::Fatal(PricingError::InvalidResponse(err.to_string())));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            return Err(Failure::RateLimited { retry_after });
        }

        if status.is_server_error() {
            return Err(Failure::Transient(format!("server returned {}", status)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(Failure::Fatal(PricingError::upstream_request(status, body)))
    }
}

#[async_trait]
impl CatalogSource for Client {
    async fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage> {
        let mut state = RetryState::default();
        loop {
            match self.try_fetch(request).await {
                Ok(page) => return Ok(page),
                Err(failure) => {
                    let reason = format!("{:?}", failure);
                    let delay = state.next_delay(&self.policy, failure)?;
                    tracing::warn!(
                        attempt = state.attempts() - 1,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason,
                        "Catalog page request failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
