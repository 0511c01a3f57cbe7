//! Bulk Codes Core - Shared domain library.
//!
//! This crate provides domain types shared across:
//! - `admin` - Merchant-facing admin service that registers discounts with Shopify
//! - `integration-tests` - End-to-end tests against in-process fakes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Randomness is always injected by the caller.
//!
//! # Modules
//!
//! - [`types`] - Validated discount requests, code sets, and registration outcomes
//! - [`generator`] - Unique redemption code generation with bounded sampling

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod generator;
pub mod types;

pub use generator::{CODE_ALPHABET, CapacityError, CodeGenerator, GenerationLimits};
pub use types::*;
