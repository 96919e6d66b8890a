use rust_decimal::Decimal;
use serde_derive::Deserialize;

/// One row of the retail price list.
///
/// Field names follow the Azure Retail Prices API. The source does not
/// guarantee uniqueness of (product, meter, sku, region, price type), so
/// consumers must tolerate duplicates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default)]
    pub service_family: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub meter_name: String,
    #[serde(default)]
    pub sku_name: String,
    #[serde(default, rename = "armRegionName")]
    pub region: String,
    #[serde(default, rename = "type")]
    pub price_type: String,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub unit_of_measure: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub tier_minimum_units: Option<Decimal>,
}

impl PriceRecord {
    /// Key that groups the records of one billable meter.
    pub fn meter_key(&self) -> (&str, &str) {
        (self.meter_name.as_str(), self.sku_name.as_str())
    }

    /// Lower bound of the pricing tier, absent meaning the base tier.
    pub fn tier_floor(&self) -> Decimal {
        self.tier_minimum_units.unwrap_or(Decimal::ZERO)
    }
}

/// One page of the price list plus its continuation link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(rename = "Items", default)]
    pub items: Vec<PriceRecord>,
    #[serde(rename = "NextPageLink", default)]
    pub next_page_link: Option<String>,
}

impl CatalogPage {
    /// Continuation link, treating an empty string as "no more pages".
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}
