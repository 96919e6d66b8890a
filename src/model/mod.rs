//! Data model of the retail price catalog.
//!
//! Raw records and pages as they arrive from the catalog, the criteria used to
//! narrow a scan, the derived cost breakdown, and the request/response shapes
//! of the pricing operations.

pub mod api;
pub mod cost;
pub mod criteria;
pub mod traits;
pub mod types;

pub use api::{
    MonthlyCostRequest, MonthlyCostResponse, ProductsRequest, ProductsResponse,
    ServiceFamiliesResponse, ServiceNamesRequest, ServiceNamesResponse,
};
pub use cost::{MeterCost, ProductCostBreakdown, UnitClass};
pub use criteria::FilterCriteria;
pub use traits::{CatalogSource, PageRequest};
pub use types::{CatalogPage, PriceRecord};
