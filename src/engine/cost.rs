//! Monthly cost aggregation for a single product.

use crate::catalog::PageCursor;
use crate::engine::{filter, units};
use crate::error::{PricingError, Result};
use crate::model::{FilterCriteria, MeterCost, PriceRecord, ProductCostBreakdown, UnitClass};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Reduces records to one per (meter, sku), keeping the lowest pricing tier.
///
/// Meters keep the order in which they were first seen.
pub fn group_meters(records: impl IntoIterator<Item = PriceRecord>) -> Vec<PriceRecord> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut meters: Vec<PriceRecord> = Vec::new();

    for record in records {
        let (meter, sku) = record.meter_key();
        let key = (meter.to_string(), sku.to_string());
        match index.get(&key) {
            Some(&i) => {
                if record.tier_floor() < meters[i].tier_floor() {
                    meters[i] = record;
                }
            }
            None => {
                index.insert(key, meters.len());
                meters.push(record);
            }
        }
    }
    meters
}

fn overflow(hours_per_month: Decimal) -> PricingError {
    PricingError::invalid_input(
        "monthly_hours",
        format!("{} is too large to compute a monthly cost", hours_per_month),
    )
}

fn meter_cost(record: PriceRecord, hours_per_month: Decimal) -> Result<MeterCost> {
    let unit_class = units::classify(&record.unit_of_measure);
    if unit_class == UnitClass::Unclassified {
        tracing::warn!(
            product = %record.product_name,
            meter = %record.meter_name,
            unit_of_measure = %record.unit_of_measure,
            "Unrecognized unit of measure, using unit price as monthly cost"
        );
    }
    let monthly_cost = units::monthly_multiplier(&unit_class, hours_per_month)
        .and_then(|factor| record.unit_price.checked_mul(factor))
        .ok_or_else(|| overflow(hours_per_month))?;

    Ok(MeterCost {
        meter_name: record.meter_name,
        sku_name: record.sku_name,
        unit_price: record.unit_price,
        unit_of_measure: record.unit_of_measure,
        hour_normalized: unit_class.is_hourly(),
        unit_class,
        monthly_cost,
        currency: record.currency_code,
    })
}

/// Builds the cost breakdown from the already filtered records of one product.
///
/// # Errors
/// - `ProductNotFound` when `records` is empty
/// - `CurrencyMismatch` when meters are priced in more than one currency
/// - `InvalidInput` when `hours_per_month` pushes a cost past `Decimal::MAX`
pub fn breakdown(
    product_name: &str,
    region: &str,
    records: impl IntoIterator<Item = PriceRecord>,
    hours_per_month: Decimal,
) -> Result<ProductCostBreakdown> {
    let meters = group_meters(records);
    let currency = match meters.first() {
        Some(first) => first.currency_code.clone(),
        None => return Err(PricingError::product_not_found(product_name, region)),
    };
    if let Some(other) = meters.iter().find(|m| m.currency_code != currency) {
        return Err(PricingError::currency_mismatch(
            product_name,
            currency,
            other.currency_code.clone(),
        ));
    }

    let mut meters: Vec<MeterCost> = meters
        .into_iter()
        .map(|record| meter_cost(record, hours_per_month))
        .collect::<Result<_>>()?;
    meters.sort_by(|a, b| b.monthly_cost.cmp(&a.monthly_cost));
    let total_monthly_cost = meters
        .iter()
        .try_fold(Decimal::ZERO, |total, m| total.checked_add(m.monthly_cost))
        .ok_or_else(|| overflow(hours_per_month))?;

    Ok(ProductCostBreakdown {
        product_name: product_name.to_string(),
        meters,
        total_monthly_cost,
        currency,
        is_complete: true,
    })
}

/// Scans every page for the product named in `criteria` and prices its meters.
///
/// When the page cap stops the scan early the breakdown is returned with
/// `is_complete` unset.
pub async fn monthly_cost(
    cursor: &mut PageCursor<'_>,
    criteria: &FilterCriteria,
    hours_per_month: Decimal,
) -> Result<ProductCostBreakdown> {
    let product_name = criteria
        .product_name
        .as_deref()
        .ok_or_else(|| PricingError::invalid_input("product_name", "is required"))?;

    let mut records = Vec::new();
    while let Some(page) = cursor.next_page().await? {
        records.extend(filter::apply(page.items, criteria));
    }
    let is_complete = !cursor.has_more();
    if !is_complete {
        tracing::warn!(
            product = %product_name,
            pages = cursor.pages_fetched(),
            "Cost computed from a truncated scan"
        );
    }

    let mut result = breakdown(product_name, &criteria.region, records, hours_per_month)?;
    result.is_complete = is_complete;
    Ok(result)
}
