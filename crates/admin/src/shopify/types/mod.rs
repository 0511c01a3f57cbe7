//! Domain types for Shopify Admin API.
//!
//! These types provide a clean, ergonomic API separate from the raw GraphQL
//! request and response shapes in `admin::queries`.

pub mod discount;

pub use discount::*;
