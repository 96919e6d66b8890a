//! Distinct service and product names derived from a filtered scan.

use crate::catalog::PageCursor;
use crate::engine::filter;
use crate::error::Result;
use crate::model::{FilterCriteria, PriceRecord};
use std::collections::HashSet;

/// Which level of the hierarchy to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLevel {
    Service,
    Product,
}

impl NameLevel {
    fn of<'r>(&self, record: &'r PriceRecord) -> &'r str {
        match self {
            NameLevel::Service => &record.service_name,
            NameLevel::Product => &record.product_name,
        }
    }
}

/// Names in first-seen order, plus how the scan ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinctNames {
    pub names: Vec<String>,
    /// The result limit was reached before the scan ran out of records
    pub was_limited: bool,
    /// Every matching record in the catalog was read
    pub is_complete: bool,
}

/// Insertion-ordered set with an optional size cap.
struct NameSet {
    seen: HashSet<String>,
    names: Vec<String>,
    limit: Option<usize>,
}

impl NameSet {
    fn new(limit: Option<usize>) -> Self {
        Self {
            seen: HashSet::new(),
            names: Vec::new(),
            limit,
        }
    }

    fn is_new(&self, name: &str) -> bool {
        !name.is_empty() && !self.seen.contains(name)
    }

    fn insert(&mut self, name: &str) {
        if self.is_new(name) {
            self.seen.insert(name.to_string());
            self.names.push(name.to_string());
        }
    }

    fn is_full(&self) -> bool {
        self.limit.map_or(false, |limit| self.names.len() >= limit)
    }
}

/// Scans pages from `cursor` and collects the distinct names at `level`.
///
/// Stops pulling pages as soon as `criteria.result_limit` distinct names are
/// collected. Blank names are skipped.
pub async fn resolve(
    cursor: &mut PageCursor<'_>,
    criteria: &FilterCriteria,
    level: NameLevel,
) -> Result<DistinctNames> {
    let mut set = NameSet::new(criteria.result_limit);

    while let Some(page) = cursor.next_page().await? {
        let mut records = filter::apply(page.items, criteria);
        for record in records.by_ref() {
            set.insert(level.of(&record));
            if set.is_full() {
                break;
            }
        }

        if set.is_full() {
            let more_on_page = records.any(|record| set.is_new(level.of(&record)));
            let was_limited = more_on_page || cursor.has_more();
            tracing::debug!(
                count = set.names.len(),
                was_limited,
                pages = cursor.pages_fetched(),
                "Result limit reached, scan stopped"
            );
            return Ok(DistinctNames {
                names: set.names,
                was_limited,
                is_complete: !was_limited,
            });
        }
    }

    Ok(DistinctNames {
        names: set.names,
        was_limited: false,
        is_complete: !cursor.has_more(),
    })
}
