//! Application state shared across handlers.

use std::sync::Arc;

use bulk_codes_core::CodeGenerator;

use crate::config::AdminConfig;
use crate::services::{BulkDiscountService, DiscountCodeApi, DiscountRegistrar};
use crate::shopify::{AdminClient, AdminShopifyError};

/// Application state shared across all handlers.
///
/// Cheap to clone via `Arc`; everything inside is read-only.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    bulk_discounts: BulkDiscountService,
}

impl AppState {
    /// Create application state backed by the Shopify Admin API.
    ///
    /// # Errors
    ///
    /// Returns an error if the Admin API client cannot be built.
    pub fn from_config(config: &AdminConfig) -> Result<Self, AdminShopifyError> {
        let client = AdminClient::new(&config.shopify)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Create application state with an explicit discount API.
    #[must_use]
    pub fn new(config: &AdminConfig, api: Arc<dyn DiscountCodeApi>) -> Self {
        let bulk = config.bulk_discount;
        let bulk_discounts = BulkDiscountService::new(
            CodeGenerator::new(bulk.limits),
            DiscountRegistrar::new(api, bulk.append_failure_policy),
        );

        Self {
            inner: Arc::new(AppStateInner { bulk_discounts }),
        }
    }

    /// Get a reference to the bulk discount service.
    #[must_use]
    pub fn bulk_discounts(&self) -> &BulkDiscountService {
        &self.inner.bulk_discounts
    }
}
