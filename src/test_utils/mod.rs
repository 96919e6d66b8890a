//! Test utilities shared across the pricing server's unit tests.
//!
//! Record fixtures, a scripted in-memory catalog source, a wiremock catalog
//! server builder and test configuration builders.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod mocks;
