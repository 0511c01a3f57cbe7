//! Discount domain types for Shopify Admin API.

use bulk_codes_core::DiscountValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for creating a basic code discount.
///
/// The discount always applies to all customers and all items.
#[derive(Debug, Clone, Copy)]
pub struct CodeDiscountInput<'a> {
    /// Internal discount title.
    pub title: &'a str,
    /// Customer-facing code the discount is created with.
    pub code: &'a str,
    /// When the discount becomes active.
    pub starts_at: DateTime<Utc>,
    /// Percentage or fixed amount off.
    pub value: &'a DiscountValue,
}

/// A user-facing error from a discount mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountUserError {
    /// Path to the offending input field, if any.
    pub field: Vec<String>,
    /// Error message.
    pub message: String,
    /// Machine-readable error code, if any.
    pub code: Option<String>,
}

/// Result of `discountCodeBasicCreate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountCreatePayload {
    /// ID of the created discount node (`gid://shopify/DiscountCodeNode/...`).
    pub discount_id: Option<String>,
    /// User errors, in the order Shopify reported them.
    pub user_errors: Vec<DiscountUserError>,
}

impl DiscountCreatePayload {
    /// Message of the first user error.
    #[must_use]
    pub fn first_error_message(&self) -> Option<&str> {
        self.user_errors.first().map(|e| e.message.as_str())
    }
}
