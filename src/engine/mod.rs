//! Record filtering, hierarchy resolution and cost aggregation.

pub mod cost;
pub mod filter;
pub mod hierarchy;
pub mod units;

pub use hierarchy::NameLevel;
