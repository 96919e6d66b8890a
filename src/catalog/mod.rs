//! Access to the remote Azure Retail Prices catalog.
//!
//! `Client` fetches single pages with retry and backoff, `PageCursor` walks
//! the continuation links of one scan, and `QueryBuilder` renders the OData
//! filter sent with the first request.

pub mod client;
pub mod pagination;
pub mod query_builder;
pub mod retry;

pub use client::Client;
pub use pagination::PageCursor;
pub use retry::RetryPolicy;
