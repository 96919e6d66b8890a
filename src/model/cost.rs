use rust_decimal::Decimal;
use serde::Serializer;
use serde_derive::Serialize;
use std::fmt;

/// How a meter's unit of measure relates to running time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitClass {
    /// Priced per `n` hours; scaled by hours per month
    Hourly { per_hours: Decimal },
    /// Priced per month; taken as-is
    Monthly,
    /// Priced per consumed quantity (GB, transactions, days); taken as-is
    Usage,
    /// Not in the classifier table; taken as-is and flagged
    Unclassified,
}

impl UnitClass {
    pub fn is_hourly(&self) -> bool {
        matches!(self, UnitClass::Hourly { .. })
    }
}

impl serde::Serialize for UnitClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnitClass::Hourly { .. } => write!(f, "hourly"),
            UnitClass::Monthly => write!(f, "monthly"),
            UnitClass::Usage => write!(f, "usage"),
            UnitClass::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Monthly cost of one meter of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterCost {
    pub meter_name: String,
    pub sku_name: String,
    pub unit_price: Decimal,
    pub unit_of_measure: String,
    pub unit_class: UnitClass,
    /// False when the monthly cost is the unit price itself
    pub hour_normalized: bool,
    pub monthly_cost: Decimal,
    pub currency: String,
}

/// Per-meter and total monthly cost of one product. Built per request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCostBreakdown {
    pub product_name: String,
    pub meters: Vec<MeterCost>,
    pub total_monthly_cost: Decimal,
    pub currency: String,
    /// False when the page cap stopped the scan before the last page
    pub is_complete: bool,
}

impl ProductCostBreakdown {
    /// Meters whose unit of measure could not be classified.
    pub fn unclassified_meters(&self) -> impl Iterator<Item = &MeterCost> {
        self.meters
            .iter()
            .filter(|m| m.unit_class == UnitClass::Unclassified)
    }
}
