//! Business logic services for admin.
//!
//! # Services
//!
//! - `discount_codes` - Registers a code batch as one Shopify discount
//! - `bulk_discount` - Generates a code batch and hands it to the registrar

pub mod bulk_discount;
pub mod discount_codes;

pub use bulk_discount::BulkDiscountService;
pub use discount_codes::{AppendFailurePolicy, DiscountCodeApi, DiscountRegistrar, ParsePolicyError};
