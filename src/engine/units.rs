//! Unit-of-measure classification.
//!
//! The catalog's `unitOfMeasure` is free text such as `1 Hour`, `100 Hours`,
//! `1 GB/Month` or `10K`. Only hour-denominated units are scaled by the
//! hours in a month; everything else is priced as-is.

use crate::model::UnitClass;
use rust_decimal::Decimal;
use std::str::FromStr;

const HOURLY_UNITS: &[&str] = &["hour", "hours", "/hour"];

const MONTHLY_UNITS: &[&str] = &[
    "month", "months", "/month", "gb/month", "gib/month", "tb/month",
];

const USAGE_UNITS: &[&str] = &[
    "gb",
    "gib",
    "tb",
    "day",
    "days",
    "/day",
    "transactions",
    "requests",
    "operations",
    "calls",
    "messages",
    "units",
    "gb/hour",
];

/// Lowercases and collapses runs of whitespace.
fn normalize(unit_of_measure: &str) -> String {
    unit_of_measure
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Splits a leading quantity such as `100` or `10k` from the unit name.
///
/// Returns `None` for the count when the unit has no leading number.
fn split_count(unit: &str) -> (Option<Decimal>, &str) {
    let digits_end = unit
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unit.len());
    if digits_end == 0 {
        return (None, unit);
    }
    let count = match Decimal::from_str(&unit[..digits_end]) {
        Ok(count) => count,
        Err(_) => return (None, unit),
    };

    let rest = &unit[digits_end..];
    let scale = match rest.chars().next() {
        Some('k') => Some(Decimal::from(1_000)),
        Some('m') => Some(Decimal::from(1_000_000)),
        _ => None,
    };
    if let Some(scale) = scale {
        let after = &rest[1..];
        if after.is_empty() || after.starts_with(' ') || after.starts_with('/') {
            return match count.checked_mul(scale) {
                Some(count) => (Some(count), after.trim()),
                None => (None, unit),
            };
        }
    }
    (Some(count), rest.trim())
}

/// Classifies a raw `unitOfMeasure` value.
pub fn classify(unit_of_measure: &str) -> UnitClass {
    let normalized = normalize(unit_of_measure);
    let (count, unit) = split_count(&normalized);

    if HOURLY_UNITS.contains(&unit) {
        let per_hours = count.unwrap_or(Decimal::ONE);
        if per_hours > Decimal::ZERO {
            return UnitClass::Hourly { per_hours };
        }
        return UnitClass::Unclassified;
    }
    if MONTHLY_UNITS.contains(&unit) {
        return UnitClass::Monthly;
    }
    if USAGE_UNITS.contains(&unit) || (unit.is_empty() && count.is_some()) {
        return UnitClass::Usage;
    }
    UnitClass::Unclassified
}

/// Factor applied to the unit price to get a monthly figure.
///
/// `None` when the factor does not fit in a `Decimal`.
pub fn monthly_multiplier(class: &UnitClass, hours_per_month: Decimal) -> Option<Decimal> {
    match class {
        UnitClass::Hourly { per_hours } => hours_per_month.checked_div(*per_hours),
        UnitClass::Monthly | UnitClass::Usage | UnitClass::Unclassified => Some(Decimal::ONE),
    }
}
