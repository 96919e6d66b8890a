//! Error types for the Azure pricing server.
//!
//! `PricingError` is the single error surfaced by the four pricing operations.
//! Every variant carries a stable code used at the HTTP boundary, so callers can
//! branch on the kind without parsing messages.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using the pricing error.
pub type Result<T, E = PricingError> = std::result::Result<T, E>;

/// Errors returned by the catalog pipeline and the workflow operations.
#[derive(Error, Debug)]
pub enum PricingError {
    /// The family/region combination yielded no catalog records
    #[error("service family '{family}' not found in region '{region}'")]
    ServiceFamilyNotFound { family: String, region: String },

    /// The exact product name yielded no meter records
    #[error("product '{product}' not found in region '{region}'")]
    ProductNotFound { product: String, region: String },

    /// Upstream kept answering 429 beyond the retry bound
    #[error("pricing catalog rate limit exceeded after {attempts} attempts, retry later")]
    RateLimited { attempts: u32 },

    /// Upstream rejected the request with a 4xx other than 429
    #[error("pricing catalog rejected the request (status {status}): {body}")]
    UpstreamRequest { status: u16, body: String },

    /// Network failures or 5xx responses persisted beyond the retry bound
    #[error("pricing catalog unavailable after {attempts} attempts: {message}")]
    UpstreamUnavailable { attempts: u32, message: String },

    /// Upstream answered 2xx with a body that is not a catalog page
    #[error("pricing catalog returned an invalid page: {0}")]
    InvalidResponse(String),

    /// The overall operation deadline was exceeded
    #[error("operation '{operation}' timed out after {seconds} seconds")]
    Timeout { operation: String, seconds: u64 },

    /// Meters of a single product disagree on currency
    #[error("product '{product}' has meters priced in more than one currency ({first}, {second})")]
    CurrencyMismatch {
        product: String,
        first: String,
        second: String,
    },

    /// Missing or malformed caller input
    #[error("invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl PricingError {
    /// Stable, documented identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ServiceFamilyNotFound { .. } => "SERVICE_FAMILY_NOT_FOUND",
            Self::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::UpstreamRequest { .. } => "UPSTREAM_REQUEST_ERROR",
            Self::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::Timeout { .. } => "TIMEOUT",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::InvalidInput { .. } => "INVALID_INPUT",
        }
    }

    /// Creates a service family not found error.
    pub fn family_not_found(family: impl Into<String>, region: impl Into<String>) -> Self {
        Self::ServiceFamilyNotFound {
            family: family.into(),
            region: region.into(),
        }
    }

    /// Creates a product not found error.
    pub fn product_not_found(product: impl Into<String>, region: impl Into<String>) -> Self {
        Self::ProductNotFound {
            product: product.into(),
            region: region.into(),
        }
    }

    /// Creates an upstream request error from an HTTP status and response body.
    pub fn upstream_request(status: reqwest::StatusCode, body: String) -> Self {
        Self::UpstreamRequest {
            status: status.as_u16(),
            body,
        }
    }

    /// Creates an upstream unavailable error.
    pub fn unavailable(attempts: u32, err: impl std::fmt::Display) -> Self {
        Self::UpstreamUnavailable {
            attempts,
            message: err.to_string(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(operation: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            seconds,
        }
    }

    /// Creates a currency mismatch error.
    pub fn currency_mismatch(
        product: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::CurrencyMismatch {
            product: product.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid input error for a non-positive number.
    pub fn not_positive(field: impl Into<String>, value: Decimal) -> Self {
        Self::invalid_input(field, format!("must be greater than zero, got {}", value))
    }
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
