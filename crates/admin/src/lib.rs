//! Bulk discount codes admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate contains HIGH PRIVILEGE access:
//! - Shopify Admin API (discount creation for the whole store)
//!
//! Bind to a private interface or put it behind an authenticating proxy.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
