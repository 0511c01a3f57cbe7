//! Registers a generated code batch as one Shopify discount.
//!
//! The first code creates the discount; every other code is appended to it
//! with its own `discountRedeemCodeBulkAdd` call, one at a time.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bulk_codes_core::{
    CREATE_FAILED_MESSAGE, CodeSet, DiscountRequest, FailedCode, RegistrationOutcome,
};
use tracing::instrument;

use crate::shopify::{AdminClient, AdminShopifyError, CodeDiscountInput, DiscountCreatePayload};

/// The two Admin API operations registration needs.
#[async_trait]
pub trait DiscountCodeApi: Send + Sync {
    /// Create a basic code discount carrying a single code.
    async fn create_basic_code_discount(
        &self,
        input: &CodeDiscountInput<'_>,
    ) -> Result<DiscountCreatePayload, AdminShopifyError>;

    /// Attach one more code to an existing discount.
    async fn bulk_add_redeem_code(
        &self,
        discount_id: &str,
        code: &str,
    ) -> Result<(), AdminShopifyError>;
}

#[async_trait]
impl DiscountCodeApi for AdminClient {
    async fn create_basic_code_discount(
        &self,
        input: &CodeDiscountInput<'_>,
    ) -> Result<DiscountCreatePayload, AdminShopifyError> {
        self.create_code_discount(input).await
    }

    async fn bulk_add_redeem_code(
        &self,
        discount_id: &str,
        code: &str,
    ) -> Result<(), AdminShopifyError> {
        self.add_redeem_codes(discount_id, &[code.to_owned()]).await
    }
}

/// What to do when appending a code to a created discount fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppendFailurePolicy {
    /// Log the failure, record it, and keep appending.
    #[default]
    Absorb,
    /// Stop at the first failure and reject the whole batch.
    Abort,
}

/// Error parsing an [`AppendFailurePolicy`].
#[derive(Debug, thiserror::Error)]
#[error("expected `absorb` or `abort`, got `{0}`")]
pub struct ParsePolicyError(String);

impl FromStr for AppendFailurePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absorb" => Ok(Self::Absorb),
            "abort" => Ok(Self::Abort),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}

/// Creates a discount from a code batch and appends the remaining codes.
#[derive(Clone)]
pub struct DiscountRegistrar {
    api: Arc<dyn DiscountCodeApi>,
    policy: AppendFailurePolicy,
}

impl std::fmt::Debug for DiscountRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountRegistrar")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl DiscountRegistrar {
    #[must_use]
    pub fn new(api: Arc<dyn DiscountCodeApi>, policy: AppendFailurePolicy) -> Self {
        Self { api, policy }
    }

    /// Register `codes` as one discount described by `request`.
    ///
    /// Never returns an error: every failure becomes
    /// [`RegistrationOutcome::Rejected`] with the message to show the user.
    /// A discount created before an aborted append is left in place.
    #[instrument(skip(self, request, codes), fields(title = %request.title(), count = codes.len()))]
    pub async fn register(&self, request: &DiscountRequest, codes: CodeSet) -> RegistrationOutcome {
        let Some((seed, rest)) = codes.split_first() else {
            tracing::warn!("Refusing to register an empty code batch");
            return RegistrationOutcome::rejected(CREATE_FAILED_MESSAGE);
        };

        let value = request.discount_value();
        let input = CodeDiscountInput {
            title: request.title(),
            code: seed,
            starts_at: request.starts_at(),
            value: &value,
        };

        let payload = match self.api.create_basic_code_discount(&input).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create discount");
                return RegistrationOutcome::rejected(CREATE_FAILED_MESSAGE);
            }
        };

        let Some(discount_id) = payload.discount_id.clone() else {
            let message = payload
                .first_error_message()
                .unwrap_or(CREATE_FAILED_MESSAGE);
            tracing::warn!(%message, "Shopify rejected discount");
            return RegistrationOutcome::rejected(message);
        };

        tracing::info!(%discount_id, "Discount created");

        let mut failed_codes = Vec::new();
        for code in rest {
            let Err(e) = self.api.bulk_add_redeem_code(&discount_id, code).await else {
                continue;
            };

            let reason = match e {
                AdminShopifyError::UserError(message) => message,
                other => other.to_string(),
            };
            tracing::warn!(%discount_id, %code, %reason, "Failed to add code");

            match self.policy {
                AppendFailurePolicy::Absorb => failed_codes.push(FailedCode {
                    code: code.clone(),
                    reason,
                }),
                AppendFailurePolicy::Abort => {
                    return RegistrationOutcome::rejected(format!(
                        "Failed to add code {code} to discount {discount_id}: {reason}"
                    ));
                }
            }
        }

        tracing::info!(
            %discount_id,
            added = rest.len() - failed_codes.len(),
            failed = failed_codes.len(),
            "Discount codes registered"
        );

        RegistrationOutcome::Registered {
            discount_id,
            codes,
            failed_codes,
        }
    }
}
