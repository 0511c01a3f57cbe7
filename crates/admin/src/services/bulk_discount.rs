//! Generate a code batch and register it as one discount.

use bulk_codes_core::{CapacityError, CodeGenerator, CodeSet, DiscountRequest, RegistrationOutcome};
use tracing::instrument;

use super::DiscountRegistrar;

/// Issues discounts with freshly generated codes.
#[derive(Debug, Clone)]
pub struct BulkDiscountService {
    generator: CodeGenerator,
    registrar: DiscountRegistrar,
}

impl BulkDiscountService {
    #[must_use]
    pub const fn new(generator: CodeGenerator, registrar: DiscountRegistrar) -> Self {
        Self {
            generator,
            registrar,
        }
    }

    #[must_use]
    pub const fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// Generate `request.number_of_codes()` codes and register them.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the batch cannot be generated. No remote
    /// call is made in that case.
    #[instrument(skip(self, request), fields(title = %request.title()))]
    pub async fn issue(
        &self,
        request: &DiscountRequest,
    ) -> Result<RegistrationOutcome, CapacityError> {
        let codes = self.generate(request)?;
        tracing::debug!(count = codes.len(), "Generated discount codes");
        Ok(self.registrar.register(request, codes).await)
    }

    // The thread RNG is not `Send`, so it must not live across an await.
    fn generate(&self, request: &DiscountRequest) -> Result<CodeSet, CapacityError> {
        self.generator.generate(
            &mut rand::rng(),
            request.number_of_codes(),
            request.code_length(),
        )
    }
}
