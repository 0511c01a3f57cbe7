//! Bulk discount route handlers.

use askama::Template;
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use bulk_codes_core::{DiscountRequest, DiscountRequestInput, FailedCode, RegistrationOutcome};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::AppError, state::AppState};

/// Bulk discount form template.
#[derive(Template)]
#[template(path = "discounts/bulk.html")]
pub struct BulkDiscountTemplate {
    pub current_path: String,
    pub title: String,
    pub value: String,
    pub number_of_codes: usize,
    pub code_length: usize,
    pub start_date: String,
    pub max_codes: usize,
    pub max_code_length: usize,
}

/// Form input for a bulk discount.
///
/// Missing fields arrive as empty strings and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkDiscountForm {
    pub title: String,
    pub discount_type: String,
    pub value: String,
    pub number_of_codes: String,
    pub code_length: String,
    pub start_date: String,
}

impl BulkDiscountForm {
    fn as_input(&self) -> DiscountRequestInput<'_> {
        DiscountRequestInput {
            title: &self.title,
            discount_type: &self.discount_type,
            value: &self.value,
            number_of_codes: &self.number_of_codes,
            code_length: &self.code_length,
            start_date: &self.start_date,
        }
    }
}

/// JSON body returned when the discount was created.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDiscountResponse {
    pub success: bool,
    pub codes: Vec<String>,
    pub discount_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_codes: Vec<FailedCode>,
}

/// Bulk discount form page.
///
/// # Errors
///
/// Returns 500 if the template fails to render.
#[instrument(skip(state))]
pub async fn new_bulk_discount(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let limits = state.bulk_discounts().generator().limits();
    let template = BulkDiscountTemplate {
        current_path: "/app/creatediscount".to_string(),
        title: "Bulk Discount Offer".to_string(),
        value: "10".to_string(),
        number_of_codes: 5.min(limits.max_codes()),
        code_length: 8.min(limits.max_code_length()),
        start_date: chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        max_codes: limits.max_codes(),
        max_code_length: limits.max_code_length(),
    };

    render_page(&template)
}

fn render_page<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template render error: {e}")))
}

/// Create a discount with a batch of generated codes.
///
/// # Errors
///
/// Returns 400 for invalid input or an impossible batch, 422 when Shopify
/// rejects the discount.
#[instrument(skip(state, form))]
pub async fn create_bulk_discount(
    State(state): State<AppState>,
    form: Result<Form<BulkDiscountForm>, FormRejection>,
) -> Result<Json<BulkDiscountResponse>, AppError> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let limits = state.bulk_discounts().generator().limits();
    let request = DiscountRequest::parse(&form.as_input(), limits)?;

    tracing::info!(
        title = %request.title(),
        kind = %request.kind(),
        count = request.number_of_codes(),
        length = request.code_length(),
        "Creating bulk discount"
    );

    match state.bulk_discounts().issue(&request).await? {
        RegistrationOutcome::Registered {
            discount_id,
            codes,
            failed_codes,
        } => Ok(Json(BulkDiscountResponse {
            success: true,
            codes: codes.into_vec(),
            discount_id,
            failed_codes,
        })),
        RegistrationOutcome::Rejected { message } => Err(AppError::Rejected(message)),
    }
}
