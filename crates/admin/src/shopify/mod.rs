//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the Shopify Admin API access token.**
//!
//! The token can create and modify discounts for the whole store. It is kept
//! in a [`secrecy::SecretString`] and only exposed when building the request
//! header.
//!
//! # Architecture
//!
//! - `graphql_client::GraphQLQuery` envelopes for each operation
//! - Direct API calls to Shopify over reqwest (no local state)
//! - Rate limiting and auth failures surfaced as typed errors
//!
//! # Example
//!
//! ```rust,ignore
//! use bulk_codes_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! let payload = client.create_code_discount(&input).await?;
//! if let Some(id) = payload.discount_id {
//!     client.add_redeem_codes(&id, &["SECOND".to_string()]).await?;
//! }
//! ```

mod admin;
pub mod types;

pub use admin::AdminClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured store domain does not form a valid endpoint URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User error from mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = AdminShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = AdminShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_unauthorized_error() {
        let err = AdminShopifyError::Unauthorized("Invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid token");
    }

    #[test]
    fn test_user_error() {
        let err = AdminShopifyError::UserError("Code must be unique".to_string());
        assert_eq!(err.to_string(), "User error: Code must be unique");
    }
}
