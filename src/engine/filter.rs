//! Structural predicates over raw price records.

use crate::model::{FilterCriteria, PriceRecord};

fn exact(expected: Option<&str>, actual: &str) -> bool {
    expected.map_or(true, |e| e == actual)
}

/// True when `record` satisfies every constraint present in `criteria`.
///
/// Cheap exact comparisons run first; the case-insensitive substring check
/// allocates and runs last.
pub fn matches(record: &PriceRecord, criteria: &FilterCriteria) -> bool {
    exact(criteria.family.as_deref(), &record.service_family)
        && record.region == criteria.region
        && exact(criteria.price_type.as_deref(), &record.price_type)
        && exact(criteria.service_name.as_deref(), &record.service_name)
        && exact(criteria.product_name.as_deref(), &record.product_name)
        && criteria
            .product_name_contains
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(&record.product_name, needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Lazily keeps the records that match `criteria`.
pub fn apply<'a, I>(records: I, criteria: &'a FilterCriteria) -> impl Iterator<Item = PriceRecord> + 'a
where
    I: IntoIterator<Item = PriceRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .filter(move |record| matches(record, criteria))
}
