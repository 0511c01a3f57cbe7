//! Shopify Admin API GraphQL client with access-token authentication.
//!
//! This module provides a type-safe client for the discount mutations of the
//! Shopify Admin GraphQL API.

use std::sync::Arc;
use std::time::Duration;

use graphql_client::GraphQLQuery;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

mod discounts;
pub mod queries;

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Security
///
/// This client holds an access token with write access to store discounts.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl AdminClient {
    /// Create a new Admin API client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::InvalidEndpoint` if the store domain does
    /// not form a valid URL, or `AdminShopifyError::Http` if the HTTP client
    /// cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminShopifyError> {
        Self::with_endpoint(
            config.graphql_endpoint()?,
            config.access_token.clone(),
            config.request_timeout,
        )
    }

    /// Create a client for an explicit GraphQL endpoint.
    ///
    /// Every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Http` if the HTTP client cannot be built.
    pub fn with_endpoint(
        endpoint: Url,
        access_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, AdminShopifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint,
                access_token,
            }),
        })
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, self.inner.access_token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let response = response.error_for_status()?;
        let graphql_response: GraphQLResponse<Q::ResponseData> = response.json().await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(AdminShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}
