//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bulk_codes_core::{CapacityError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the admin panel.
///
/// Every variant renders as a JSON body `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Form input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested batch cannot be generated.
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// Shopify refused the discount or one of its codes.
    #[error("{0}")]
    Rejected(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Capacity(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (self.status(), Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Rejected("Discount already exists".to_string());
        assert_eq!(err.to_string(), "Discount already exists");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::Validation(ValidationError::EmptyTitle).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Capacity(CapacityError::CodeSpaceTooSmall {
                requested: 37,
                length: 1,
                available: 36,
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Rejected("no".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_rejection_body() {
        let (status, body) = render(AppError::Rejected("Title is too long".to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, serde_json::json!({ "error": "Title is too long" }));
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let (status, body) = render(AppError::Internal("pool exhausted".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
