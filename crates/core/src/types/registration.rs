//! Result of registering a code batch with the commerce platform.

use serde::{Deserialize, Serialize};

use super::codes::CodeSet;

/// Message used when a create call fails without a user-facing reason.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create discount";

/// A code whose append call reported an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCode {
    pub code: String,
    pub reason: String,
}

/// Terminal outcome of one registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The discount exists and every code was submitted.
    Registered {
        /// Remote discount node id.
        discount_id: String,
        /// The full generated batch, including codes whose append failed.
        codes: CodeSet,
        /// Append calls that reported an error.
        failed_codes: Vec<FailedCode>,
    },
    /// Registration stopped; `message` is the single error shown to the user.
    Rejected {
        message: String,
    },
}

impl RegistrationOutcome {
    /// Build a rejection with the given message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Returns true for [`RegistrationOutcome::Registered`].
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_helper() {
        let outcome = RegistrationOutcome::rejected(CREATE_FAILED_MESSAGE);
        assert!(!outcome.is_registered());
        assert_eq!(
            outcome,
            RegistrationOutcome::Rejected {
                message: "Failed to create discount".to_string()
            }
        );
    }
}
