use crate::error::ConfigError;
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_catalog_url() -> String {
    "https://prices.azure.com/api/retail/prices".to_string()
}

fn default_api_version() -> String {
    "2023-01-01-preview".to_string()
}

fn default_region() -> String {
    "westeurope".to_string()
}

fn default_price_type() -> String {
    "Consumption".to_string()
}

// 24h * 365d / 12
fn default_hours_in_month() -> Decimal {
    Decimal::from(730)
}

fn default_max_pages() -> usize {
    20
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_operation_timeout_sec() -> u64 {
    120
}

#[derive(Deserialize, Debug, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_url")]
    pub url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_region")]
    pub default_region: String,
    #[serde(default = "default_price_type")]
    pub default_price_type: String,
    #[serde(default = "default_hours_in_month")]
    pub hours_in_month: Decimal,
    // upper bound on pages scanned per operation
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_operation_timeout_sec")]
    pub operation_timeout_sec: u64,
}

impl CatalogConfig {
    /// Checks the values envy cannot express as types and normalizes the URL.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.url = self.url.trim().trim_end_matches('/').to_string();
        if self.url.is_empty() {
            return Err(ConfigError::missing("AZURE_PRICING_URL"));
        }
        if self.hours_in_month <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "hours_in_month",
                "must be greater than zero",
            ));
        }
        if self.max_pages == 0 {
            return Err(ConfigError::invalid("max_pages", "must be greater than zero"));
        }
        if self.default_region.trim().is_empty() {
            return Err(ConfigError::missing("AZURE_PRICING_DEFAULT_REGION"));
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            api_version: default_api_version(),
            default_region: default_region(),
            default_price_type: default_price_type(),
            hours_in_month: default_hours_in_month(),
            max_pages: default_max_pages(),
            request_timeout_sec: default_request_timeout_sec(),
            operation_timeout_sec: default_operation_timeout_sec(),
        }
    }
}

pub fn load_catalog_config() -> Result<CatalogConfig> {
    match envy::prefixed("AZURE_PRICING_").from_env::<CatalogConfig>() {
        Ok(config) => config
            .validate()
            .map_err(|err| anyhow!("Failed to load CatalogConfig: {}", err)),
        Err(err) => Err(anyhow!(
            "Failed to load CatalogConfig: {}",
            ConfigError::env_parse(err)
        )),
    }
}

fn default_max_transient_retries() -> u32 {
    3
}

fn default_max_rate_limit_retries() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

#[derive(Deserialize, Debug, Clone)]
pub struct RetryConfig {
    // network errors, timeouts and 5xx
    #[serde(default = "default_max_transient_retries")]
    pub max_transient_retries: u32,
    // 429 responses
    #[serde(default = "default_max_rate_limit_retries")]
    pub max_rate_limit_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_transient_retries: default_max_transient_retries(),
            max_rate_limit_retries: default_max_rate_limit_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

pub fn load_retry_config() -> Result<RetryConfig> {
    match envy::prefixed("RETRY_").from_env::<RetryConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load RetryConfig: {}", err)),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Deserialize, Debug)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

pub fn load_server_config() -> Result<ServerConfig> {
    match envy::prefixed("SERVER_").from_env::<ServerConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load ServerConfig: {}", err)),
    }
}
