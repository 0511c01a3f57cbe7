//! GraphQL operation definitions for Shopify Admin API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` by hand. The query
//! text and the request/response shapes live in a module named after the
//! operation, the same layout `#[derive(GraphQLQuery)]` produces, so callers
//! write `queries::discount_code_basic_create::Variables` either way.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Custom scalar type aliases
// =============================================================================

/// ISO 8601 date-time string.
type DateTime = String;

/// Decimal number as string (preserves precision).
type Decimal = String;

/// Shopify global ID.
#[allow(clippy::upper_case_acronyms)]
type ID = String;

// =============================================================================
// Discount mutations
// =============================================================================

/// `discountCodeBasicCreate`: create an amount-off discount with one code.
pub struct DiscountCodeBasicCreate;

pub mod discount_code_basic_create {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "DiscountCodeBasicCreate";
    pub const QUERY: &str = r"mutation DiscountCodeBasicCreate($basicCodeDiscount: DiscountCodeBasicInput!) {
  discountCodeBasicCreate(basicCodeDiscount: $basicCodeDiscount) {
    codeDiscountNode {
      id
    }
    userErrors {
      field
      message
      code
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub basic_code_discount: DiscountCodeBasicInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCodeBasicInput {
        pub title: String,
        pub code: String,
        pub starts_at: super::DateTime,
        pub context: DiscountContextInput,
        pub customer_gets: DiscountCustomerGetsInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountContextInput {
        pub all: DiscountBuyerSelection,
    }

    #[derive(Debug, Clone, Copy, Serialize)]
    pub enum DiscountBuyerSelection {
        #[serde(rename = "ALL")]
        All,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountCustomerGetsInput {
        pub value: DiscountCustomerGetsValueInput,
        pub items: DiscountItemsInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCustomerGetsValueInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub percentage: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub discount_amount: Option<DiscountAmountInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountAmountInput {
        pub amount: super::Decimal,
        pub applies_on_each_item: bool,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountItemsInput {
        pub all: bool,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub discount_code_basic_create: Option<DiscountCodeBasicCreatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCodeBasicCreatePayload {
        pub code_discount_node: Option<CodeDiscountNode>,
        #[serde(default)]
        pub user_errors: Vec<DiscountUserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CodeDiscountNode {
        pub id: super::ID,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct DiscountUserError {
        pub field: Option<Vec<String>>,
        pub message: String,
        pub code: Option<String>,
    }
}

impl GraphQLQuery for DiscountCodeBasicCreate {
    type Variables = discount_code_basic_create::Variables;
    type ResponseData = discount_code_basic_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: discount_code_basic_create::QUERY,
            operation_name: discount_code_basic_create::OPERATION_NAME,
        }
    }
}

/// `discountRedeemCodeBulkAdd`: attach more codes to an existing discount.
pub struct DiscountRedeemCodeBulkAdd;

pub mod discount_redeem_code_bulk_add {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "DiscountRedeemCodeBulkAdd";
    pub const QUERY: &str = r"mutation DiscountRedeemCodeBulkAdd($discountId: ID!, $codes: [DiscountRedeemCodeInput!]!) {
  discountRedeemCodeBulkAdd(discountId: $discountId, codes: $codes) {
    bulkCreation {
      id
    }
    userErrors {
      field
      message
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub discount_id: super::ID,
        pub codes: Vec<DiscountRedeemCodeInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountRedeemCodeInput {
        pub code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub discount_redeem_code_bulk_add: Option<DiscountRedeemCodeBulkAddPayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountRedeemCodeBulkAddPayload {
        pub bulk_creation: Option<BulkCreation>,
        #[serde(default)]
        pub user_errors: Vec<UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct BulkCreation {
        pub id: super::ID,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct UserError {
        pub field: Option<Vec<String>>,
        pub message: String,
    }
}

impl GraphQLQuery for DiscountRedeemCodeBulkAdd {
    type Variables = discount_redeem_code_bulk_add::Variables;
    type ResponseData = discount_redeem_code_bulk_add::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: discount_redeem_code_bulk_add::QUERY,
            operation_name: discount_redeem_code_bulk_add::OPERATION_NAME,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_body_shape() {
        use discount_code_basic_create::{
            DiscountBuyerSelection, DiscountCodeBasicInput, DiscountContextInput,
            DiscountCustomerGetsInput, DiscountCustomerGetsValueInput, DiscountItemsInput,
            Variables,
        };

        let body = DiscountCodeBasicCreate::build_query(Variables {
            basic_code_discount: DiscountCodeBasicInput {
                title: "Promo".to_string(),
                code: "ABC123".to_string(),
                starts_at: "2024-01-01T00:00:00Z".to_string(),
                context: DiscountContextInput {
                    all: DiscountBuyerSelection::All,
                },
                customer_gets: DiscountCustomerGetsInput {
                    value: DiscountCustomerGetsValueInput {
                        percentage: Some(0.1),
                        discount_amount: None,
                    },
                    items: DiscountItemsInput { all: true },
                },
            },
        });

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["operationName"], "DiscountCodeBasicCreate");
        assert!(
            value["query"]
                .as_str()
                .unwrap()
                .contains("discountCodeBasicCreate(basicCodeDiscount: $basicCodeDiscount)")
        );
        assert_eq!(
            value["variables"],
            json!({
                "basicCodeDiscount": {
                    "title": "Promo",
                    "code": "ABC123",
                    "startsAt": "2024-01-01T00:00:00Z",
                    "context": { "all": "ALL" },
                    "customerGets": {
                        "value": { "percentage": 0.1 },
                        "items": { "all": true }
                    }
                }
            })
        );
    }

    #[test]
    fn test_create_response_decodes_user_errors() {
        let data: discount_code_basic_create::ResponseData = serde_json::from_value(json!({
            "discountCodeBasicCreate": {
                "codeDiscountNode": null,
                "userErrors": [
                    { "field": ["basicCodeDiscount", "code"], "message": "Discount already exists", "code": "TAKEN" }
                ]
            }
        }))
        .unwrap();

        let payload = data.discount_code_basic_create.unwrap();
        assert!(payload.code_discount_node.is_none());
        assert_eq!(payload.user_errors[0].message, "Discount already exists");
        assert_eq!(payload.user_errors[0].code.as_deref(), Some("TAKEN"));
    }

    #[test]
    fn test_bulk_add_body_carries_one_code() {
        use discount_redeem_code_bulk_add::{DiscountRedeemCodeInput, Variables};

        let body = DiscountRedeemCodeBulkAdd::build_query(Variables {
            discount_id: "gid://shopify/DiscountCodeNode/1".to_string(),
            codes: vec![DiscountRedeemCodeInput {
                code: "XYZ789".to_string(),
            }],
        });

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["operationName"], "DiscountRedeemCodeBulkAdd");
        assert_eq!(
            value["variables"],
            json!({
                "discountId": "gid://shopify/DiscountCodeNode/1",
                "codes": [{ "code": "XYZ789" }]
            })
        );
    }

    #[test]
    fn test_bulk_add_response_without_errors() {
        let data: discount_redeem_code_bulk_add::ResponseData = serde_json::from_value(json!({
            "discountRedeemCodeBulkAdd": {
                "bulkCreation": { "id": "gid://shopify/DiscountRedeemCodeBulkCreation/9" },
                "userErrors": []
            }
        }))
        .unwrap();

        let payload = data.discount_redeem_code_bulk_add.unwrap();
        assert!(payload.user_errors.is_empty());
        assert_eq!(
            payload.bulk_creation.unwrap().id,
            "gid://shopify/DiscountRedeemCodeBulkCreation/9"
        );
    }
}
