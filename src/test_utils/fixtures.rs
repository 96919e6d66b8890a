//! Price record fixtures and catalog page bodies.

use crate::model::PriceRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

/// Builder for price records.
///
/// Defaults to a `Consumption` meter in `westeurope` billed at 1 USD per hour.
#[derive(Debug, Clone)]
pub struct PriceRecordBuilder {
    record: PriceRecord,
}

impl PriceRecordBuilder {
    pub fn new(family: &str, service_name: &str, product_name: &str) -> Self {
        Self {
            record: PriceRecord {
                service_family: family.to_string(),
                service_name: service_name.to_string(),
                product_name: product_name.to_string(),
                meter_name: "Standard".to_string(),
                sku_name: "Standard".to_string(),
                region: "westeurope".to_string(),
                price_type: "Consumption".to_string(),
                unit_price: Decimal::ONE,
                unit_of_measure: "1 Hour".to_string(),
                currency_code: "USD".to_string(),
                tier_minimum_units: None,
            },
        }
    }

    pub fn meter(mut self, meter_name: &str, sku_name: &str) -> Self {
        self.record.meter_name = meter_name.to_string();
        self.record.sku_name = sku_name.to_string();
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.record.region = region.to_string();
        self
    }

    pub fn price_type(mut self, price_type: &str) -> Self {
        self.record.price_type = price_type.to_string();
        self
    }

    /// Sets the unit price from its decimal text, e.g. `"0.05"`.
    pub fn unit_price(mut self, price: &str) -> Self {
        self.record.unit_price = Decimal::from_str(price).unwrap();
        self
    }

    pub fn unit_of_measure(mut self, unit: &str) -> Self {
        self.record.unit_of_measure = unit.to_string();
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.record.currency_code = currency.to_string();
        self
    }

    pub fn tier(mut self, minimum_units: &str) -> Self {
        self.record.tier_minimum_units = Some(Decimal::from_str(minimum_units).unwrap());
        self
    }

    pub fn build(self) -> PriceRecord {
        self.record
    }
}

/// A default record for the given family, service and product.
pub fn record(family: &str, service_name: &str, product_name: &str) -> PriceRecord {
    PriceRecordBuilder::new(family, service_name, product_name).build()
}

// the API sends prices as JSON numbers
fn number(value: Decimal) -> f64 {
    value.to_f64().unwrap()
}

/// Renders a record the way the Retail Prices API does.
pub fn item_json(record: &PriceRecord) -> Value {
    json!({
        "currencyCode": record.currency_code,
        "tierMinimumUnits": record.tier_minimum_units.map(number),
        "retailPrice": number(record.unit_price),
        "unitPrice": number(record.unit_price),
        "armRegionName": record.region,
        "meterName": record.meter_name,
        "productName": record.product_name,
        "skuName": record.sku_name,
        "serviceName": record.service_name,
        "serviceFamily": record.service_family,
        "unitOfMeasure": record.unit_of_measure,
        "type": record.price_type,
        "isPrimaryMeterRegion": true
    })
}

/// A catalog page body holding `records`, optionally linking to another page.
pub fn page_json(records: &[PriceRecord], next_page_link: Option<&str>) -> Value {
    json!({
        "BillingCurrency": "USD",
        "CustomerEntityId": "Default",
        "CustomerEntityType": "Retail",
        "Items": records.iter().map(item_json).collect::<Vec<_>>(),
        "NextPageLink": next_page_link,
        "Count": records.len()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogPage;

    #[test]
    fn test_builder_defaults() {
        let record = record("Compute", "Virtual Machines", "Virtual Machines Dv3 Series");
        assert_eq!(record.region, "westeurope");
        assert_eq!(record.price_type, "Consumption");
        assert_eq!(record.unit_of_measure, "1 Hour");
        assert_eq!(record.currency_code, "USD");
    }

    #[test]
    fn test_page_json_deserializes_back() {
        let records = vec![PriceRecordBuilder::new("Storage", "Storage", "Blob Storage")
            .meter("Hot LRS Data Stored", "Hot LRS")
            .unit_price("0.0184")
            .unit_of_measure("1 GB/Month")
            .build()];
        let body = page_json(&records, Some("http://test.local/next"));

        let page: CatalogPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.items, records);
        assert_eq!(page.continuation(), Some("http://test.local/next"));
    }
}
