//! Discount management operations for the Admin API.

use bulk_codes_core::DiscountValue;
use chrono::SecondsFormat;
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    queries::{DiscountCodeBasicCreate, DiscountRedeemCodeBulkAdd},
};
use crate::shopify::types::{CodeDiscountInput, DiscountCreatePayload, DiscountUserError};

impl AdminClient {
    /// Create a basic code discount for all customers and all items.
    ///
    /// User errors are returned in the payload rather than as `Err`, so the
    /// caller can show the first one to the merchant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns GraphQL errors.
    #[instrument(skip(self, input), fields(title = %input.title, code = %input.code))]
    pub async fn create_code_discount(
        &self,
        input: &CodeDiscountInput<'_>,
    ) -> Result<DiscountCreatePayload, AdminShopifyError> {
        use super::queries::discount_code_basic_create::{
            DiscountAmountInput, DiscountBuyerSelection, DiscountCodeBasicInput,
            DiscountContextInput, DiscountCustomerGetsInput, DiscountCustomerGetsValueInput,
            DiscountItemsInput, Variables,
        };

        let value = match input.value {
            DiscountValue::Percentage { fraction } => DiscountCustomerGetsValueInput {
                percentage: Some(*fraction),
                discount_amount: None,
            },
            DiscountValue::FixedAmount {
                amount,
                applies_on_each_item,
            } => DiscountCustomerGetsValueInput {
                percentage: None,
                discount_amount: Some(DiscountAmountInput {
                    amount: amount.clone(),
                    applies_on_each_item: *applies_on_each_item,
                }),
            },
        };

        let variables = Variables {
            basic_code_discount: DiscountCodeBasicInput {
                title: input.title.to_string(),
                code: input.code.to_string(),
                starts_at: input.starts_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                context: DiscountContextInput {
                    all: DiscountBuyerSelection::All,
                },
                customer_gets: DiscountCustomerGetsInput {
                    value,
                    items: DiscountItemsInput { all: true },
                },
            },
        };

        let response = self.execute::<DiscountCodeBasicCreate>(variables).await?;
        tracing::debug!(?response, "Shopify discountCodeBasicCreate response");

        let Some(payload) = response.discount_code_basic_create else {
            return Ok(DiscountCreatePayload::default());
        };

        Ok(DiscountCreatePayload {
            discount_id: payload.code_discount_node.map(|node| node.id),
            user_errors: payload
                .user_errors
                .into_iter()
                .map(|e| DiscountUserError {
                    field: e.field.unwrap_or_default(),
                    message: e.message,
                    code: e.code,
                })
                .collect(),
        })
    }

    /// Add redeem codes to an existing code discount.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` with the joined messages if
    /// Shopify rejects the codes, or another error if the request fails.
    #[instrument(skip(self, codes), fields(discount_id = %discount_id, count = codes.len()))]
    pub async fn add_redeem_codes(
        &self,
        discount_id: &str,
        codes: &[String],
    ) -> Result<(), AdminShopifyError> {
        use super::queries::discount_redeem_code_bulk_add::{DiscountRedeemCodeInput, Variables};

        let variables = Variables {
            discount_id: discount_id.to_string(),
            codes: codes
                .iter()
                .map(|code| DiscountRedeemCodeInput { code: code.clone() })
                .collect(),
        };

        let response = self.execute::<DiscountRedeemCodeBulkAdd>(variables).await?;

        if let Some(payload) = response.discount_redeem_code_bulk_add
            && !payload.user_errors.is_empty()
        {
            let messages: Vec<String> = payload
                .user_errors
                .into_iter()
                .map(|e| e.message)
                .collect();
            return Err(AdminShopifyError::UserError(messages.join("; ")));
        }

        Ok(())
    }
}
