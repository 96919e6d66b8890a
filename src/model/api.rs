//! Request and response shapes of the four pricing operations.

use crate::model::MeterCost;
use rust_decimal::Decimal;
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFamiliesResponse {
    pub service_families: Vec<String>,
    pub count: usize,
    pub source: &'static str,
    pub reference: &'static str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceNamesRequest {
    pub service_family: Option<String>,
    pub region: Option<String>,
    pub max_results: Option<usize>,
    pub max_pages: Option<usize>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceNamesResponse {
    pub service_family: String,
    pub region: String,
    pub service_names: Vec<String>,
    pub count: usize,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsRequest {
    pub service_family: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "type")]
    pub price_type: Option<String>,
    pub service_name: Option<String>,
    pub product_name_contains: Option<String>,
    pub limit: Option<usize>,
    pub max_pages: Option<usize>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductsResponse {
    pub service_family: String,
    pub region: String,
    pub product_names: Vec<String>,
    pub count: usize,
    pub was_limited: bool,
    pub limit_applied: Option<usize>,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyCostRequest {
    pub product_name: Option<String>,
    pub region: Option<String>,
    pub monthly_hours: Option<Decimal>,
    #[serde(rename = "type")]
    pub price_type: Option<String>,
    pub max_pages: Option<usize>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCostResponse {
    pub product_name: String,
    pub region: String,
    pub price_type: String,
    pub monthly_hours: Decimal,
    pub total_monthly_cost: Decimal,
    pub currency: String,
    pub products: Vec<MeterCost>,
    pub count: usize,
    pub is_complete: bool,
}
