//! The four pricing operations.
//!
//! Each operation builds its own criteria and page cursor from the injected
//! catalog source, so concurrent calls share nothing but the read-only family
//! list and configuration. Every operation that touches the network runs under
//! a deadline; on expiry the scan is dropped and nothing partial is returned.

use crate::catalog::PageCursor;
use crate::config::CatalogConfig;
use crate::engine::{cost, hierarchy, NameLevel};
use crate::error::{PricingError, Result};
use crate::families::{ServiceFamilyCatalog, FAMILIES_REFERENCE};
use crate::model::{
    CatalogSource, FilterCriteria, MonthlyCostRequest, MonthlyCostResponse, ProductsRequest,
    ProductsResponse, ServiceFamiliesResponse, ServiceNamesRequest, ServiceNamesResponse,
};
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    non_blank(value).ok_or_else(|| PricingError::invalid_input(field, "is required"))
}

/// Entry point for the pricing operations, shared across requests.
pub struct PricingWorkflow {
    source: Arc<dyn CatalogSource>,
    families: Arc<ServiceFamilyCatalog>,
    config: CatalogConfig,
}

impl PricingWorkflow {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        families: Arc<ServiceFamilyCatalog>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            source,
            families,
            config,
        }
    }

    /// Lists the known service families without touching the network.
    pub fn list_service_families(&self) -> ServiceFamiliesResponse {
        let service_families = self.families.families().to_vec();
        tracing::info!(count = service_families.len(), "Returning service families");
        ServiceFamiliesResponse {
            count: service_families.len(),
            service_families,
            source: "static_reference",
            reference: FAMILIES_REFERENCE,
        }
    }

    /// Distinct service names within a family.
    ///
    /// # Errors
    /// `ServiceFamilyNotFound` when the family has no records in the region.
    pub async fn get_service_names(
        &self,
        request: ServiceNamesRequest,
    ) -> Result<ServiceNamesResponse> {
        let family = required("service_family", request.service_family)?;
        let region = self.region(request.region);
        let seconds = self.deadline(request.timeout_sec)?;
        let criteria = FilterCriteria::new(region.clone())
            .with_family(Some(family.as_str()))
            .with_result_limit(request.max_results)
            .with_max_pages(Some(self.max_pages(request.max_pages)));

        tracing::info!(family = %family, region = %region, "Resolving service names");
        let resolved = self
            .with_deadline("get_service_names", seconds, async {
                let mut cursor = self.cursor(&criteria);
                hierarchy::resolve(&mut cursor, &criteria, NameLevel::Service).await
            })
            .await?;

        if resolved.names.is_empty() {
            if !self.families.contains(&family) {
                tracing::warn!(family = %family, "Not a known service family");
            }
            return Err(PricingError::family_not_found(family, region));
        }

        tracing::info!(
            family = %family,
            count = resolved.names.len(),
            is_complete = resolved.is_complete,
            "Resolved service names"
        );
        Ok(ServiceNamesResponse {
            service_family: family,
            region,
            count: resolved.names.len(),
            service_names: resolved.names,
            is_complete: resolved.is_complete,
        })
    }

    /// Distinct product names within a family, optionally narrowed further.
    ///
    /// Zero matches is an empty list, not an error.
    pub async fn get_products(&self, request: ProductsRequest) -> Result<ProductsResponse> {
        let family = required("service_family", request.service_family)?;
        let region = self.region(request.region);
        let seconds = self.deadline(request.timeout_sec)?;
        let criteria = FilterCriteria::new(region.clone())
            .with_family(Some(family.as_str()))
            .with_price_type(request.price_type)
            .with_service_name(request.service_name)
            .with_product_name_contains(request.product_name_contains)
            .with_result_limit(request.limit)
            .with_max_pages(Some(self.max_pages(request.max_pages)));

        tracing::info!(
            family = %family,
            region = %region,
            service_name = ?criteria.service_name,
            contains = ?criteria.product_name_contains,
            "Resolving product names"
        );
        let resolved = self
            .with_deadline("get_products", seconds, async {
                let mut cursor = self.cursor(&criteria);
                hierarchy::resolve(&mut cursor, &criteria, NameLevel::Product).await
            })
            .await?;

        tracing::info!(
            family = %family,
            count = resolved.names.len(),
            was_limited = resolved.was_limited,
            "Resolved product names"
        );
        Ok(ProductsResponse {
            service_family: family,
            region,
            count: resolved.names.len(),
            product_names: resolved.names,
            was_limited: resolved.was_limited,
            limit_applied: criteria.result_limit,
            is_complete: resolved.is_complete,
        })
    }

    /// Monthly cost of every meter of an exactly named product.
    ///
    /// # Errors
    /// - `InvalidInput` for a missing product name or non-positive hours
    /// - `ProductNotFound` when nothing matches the name
    /// - `CurrencyMismatch` when meters disagree on currency
    pub async fn get_monthly_cost(
        &self,
        request: MonthlyCostRequest,
    ) -> Result<MonthlyCostResponse> {
        let product_name = required("product_name", request.product_name)?;
        let region = self.region(request.region);
        let monthly_hours = request.monthly_hours.unwrap_or(self.config.hours_in_month);
        if monthly_hours <= Decimal::ZERO {
            return Err(PricingError::not_positive("monthly_hours", monthly_hours));
        }
        let price_type =
            non_blank(request.price_type).unwrap_or_else(|| self.config.default_price_type.clone());
        let seconds = self.deadline(request.timeout_sec)?;
        let criteria = FilterCriteria::new(region.clone())
            .with_product_name(Some(product_name.as_str()))
            .with_price_type(Some(price_type.as_str()))
            .with_max_pages(Some(self.max_pages(request.max_pages)));

        tracing::info!(
            product = %product_name,
            region = %region,
            price_type = %price_type,
            monthly_hours = %monthly_hours,
            "Computing monthly cost"
        );
        let breakdown = self
            .with_deadline("get_monthly_cost", seconds, async {
                let mut cursor = self.cursor(&criteria);
                cost::monthly_cost(&mut cursor, &criteria, monthly_hours).await
            })
            .await?;

        tracing::info!(
            product = %product_name,
            meters = breakdown.meters.len(),
            unclassified = breakdown.unclassified_meters().count(),
            is_complete = breakdown.is_complete,
            total = %breakdown.total_monthly_cost,
            currency = %breakdown.currency,
            "Computed monthly cost"
        );
        Ok(MonthlyCostResponse {
            product_name: breakdown.product_name,
            region,
            price_type,
            monthly_hours,
            total_monthly_cost: breakdown.total_monthly_cost,
            currency: breakdown.currency,
            count: breakdown.meters.len(),
            products: breakdown.meters,
            is_complete: breakdown.is_complete,
        })
    }

    fn region(&self, region: Option<String>) -> String {
        non_blank(region).unwrap_or_else(|| self.config.default_region.clone())
    }

    /// Requested page cap, never above the configured one.
    fn max_pages(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|p| *p > 0)
            .map_or(self.config.max_pages, |p| p.min(self.config.max_pages))
    }

    fn deadline(&self, timeout_sec: Option<u64>) -> Result<u64> {
        match timeout_sec {
            Some(0) => Err(PricingError::invalid_input(
                "timeout_sec",
                "must be greater than zero",
            )),
            Some(seconds) => Ok(seconds),
            None => Ok(self.config.operation_timeout_sec),
        }
    }

    fn cursor<'a>(&'a self, criteria: &FilterCriteria) -> PageCursor<'a> {
        let max_pages = criteria.max_pages_to_scan.unwrap_or(self.config.max_pages);
        PageCursor::new(self.source.as_ref(), criteria, max_pages)
    }

    async fn with_deadline<T, F>(&self, operation: &str, seconds: u64, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(Duration::from_secs(seconds), future).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, seconds, "Operation deadline exceeded");
                Err(PricingError::timeout(operation, seconds))
            }
        }
    }
}
