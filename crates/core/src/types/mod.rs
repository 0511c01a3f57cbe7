//! Core types for the bulk discount code generator.
//!
//! This module provides validated request types and the values passed to and
//! returned from discount registration.

pub mod codes;
pub mod discount;
pub mod registration;

pub use codes::{CodeSet, DuplicateCode};
pub use discount::{DiscountKind, DiscountRequest, DiscountRequestInput, DiscountValue, ValidationError};
pub use registration::{CREATE_FAILED_MESSAGE, FailedCode, RegistrationOutcome};
