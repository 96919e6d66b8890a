//! OData query builder for Azure Retail Prices requests.
//!
//! Only exact-match constraints are pushed upstream; substring matching on
//! product names stays local to the filter engine.

use crate::model::FilterCriteria;

/// One `field eq 'value'` clause of an OData `$filter`.
#[derive(Debug, Clone)]
pub enum Clause<'a> {
    ServiceFamily(&'a str),
    Region(&'a str),
    PriceType(&'a str),
    ServiceName(&'a str),
    ProductName(&'a str),
}

impl Clause<'_> {
    fn field(&self) -> &'static str {
        match self {
            Clause::ServiceFamily(_) => "serviceFamily",
            Clause::Region(_) => "armRegionName",
            Clause::PriceType(_) => "type",
            Clause::ServiceName(_) => "serviceName",
            Clause::ProductName(_) => "productName",
        }
    }

    fn value(&self) -> &str {
        match self {
            Clause::ServiceFamily(v)
            | Clause::Region(v)
            | Clause::PriceType(v)
            | Clause::ServiceName(v)
            | Clause::ProductName(v) => v,
        }
    }

    fn render(&self) -> String {
        format!("{} eq '{}'", self.field(), escape_literal(self.value()))
    }
}

/// Doubles single quotes, the OData escape for string literals.
fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Builder for the `$filter` expression of a catalog scan.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Renders the exact-match fields of `criteria` as an OData filter.
    ///
    /// # Format
    /// ```text
    /// serviceFamily eq 'Compute' and armRegionName eq 'westeurope' and type eq 'Consumption'
    /// ```
    pub fn build(criteria: &FilterCriteria) -> String {
        let mut clauses = Vec::with_capacity(5);
        if let Some(family) = criteria.family.as_deref() {
            clauses.push(Clause::ServiceFamily(family));
        }
        if !criteria.region.is_empty() {
            clauses.push(Clause::Region(&criteria.region));
        }
        if let Some(price_type) = criteria.price_type.as_deref() {
            clauses.push(Clause::PriceType(price_type));
        }
        if let Some(service_name) = criteria.service_name.as_deref() {
            clauses.push(Clause::ServiceName(service_name));
        }
        if let Some(product_name) = criteria.product_name.as_deref() {
            clauses.push(Clause::ProductName(product_name));
        }

        clauses
            .iter()
            .map(Clause::render)
            .collect::<Vec<_>>()
            .join(" and ")
    }
}
