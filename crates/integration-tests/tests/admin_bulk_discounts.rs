//! Integration tests for the bulk discount routes.
//!
//! The admin router and a fake Shopify Admin GraphQL endpoint both run
//! in-process; requests go over real HTTP.

use bulk_codes_admin::services::AppendFailurePolicy;
use bulk_codes_integration_tests::{
    FAKE_DISCOUNT_ID, FakeShopify, FakeShopifyBehavior, TEST_ACCESS_TOKEN, spawn_admin,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

fn bulk_form<'a>(number_of_codes: &'a str, code_length: &'a str) -> [(&'static str, &'a str); 6] {
    [
        ("title", "Promo"),
        ("discountType", "percentage"),
        ("value", "10"),
        ("numberOfCodes", number_of_codes),
        ("codeLength", code_length),
        ("startDate", "2024-01-01"),
    ]
}

async fn submit(base: &Url, form: &[(&str, &str)]) -> (StatusCode, Value) {
    let resp = Client::new()
        .post(base.join("app/creatediscount").expect("valid url"))
        .form(form)
        .send()
        .await
        .expect("Failed to submit form");
    let status = resp.status();
    let body = resp.json().await.expect("JSON body");
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior::default()).await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let resp = reqwest::get(base.join("health").expect("valid url"))
        .await
        .expect("Failed to reach admin");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_form_page_is_served() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior::default()).await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let resp = reqwest::get(base.join("app/creatediscount").expect("valid url"))
        .await
        .expect("Failed to reach admin");

    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.expect("body");
    assert!(html.contains("Bulk Discount Offer"));
    assert!(shopify.requests().is_empty());
}

#[tokio::test]
async fn test_promo_creates_one_discount_with_three_codes() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior::default()).await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let (status, body) = submit(&base, &bulk_form("3", "6")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["discountId"], FAKE_DISCOUNT_ID);
    assert!(body.get("failedCodes").is_none());

    let codes: Vec<&str> = body["codes"]
        .as_array()
        .expect("codes array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(codes.len(), 3);
    for code in &codes {
        assert_eq!(code.len(), 6);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    let creates = shopify.requests_for("DiscountCodeBasicCreate");
    assert_eq!(creates.len(), 1);
    let input = &creates[0].variables["basicCodeDiscount"];
    assert_eq!(input["title"], "Promo");
    assert_eq!(input["code"], codes[0]);
    assert_eq!(input["startsAt"], "2024-01-01T00:00:00Z");
    assert_eq!(input["context"]["all"], "ALL");
    assert_eq!(input["customerGets"]["value"]["percentage"], 0.1);
    assert_eq!(input["customerGets"]["items"]["all"], true);

    let appends = shopify.requests_for("DiscountRedeemCodeBulkAdd");
    assert_eq!(appends.len(), 2);
    for (append, code) in appends.iter().zip(&codes[1..]) {
        assert_eq!(append.variables["discountId"], FAKE_DISCOUNT_ID);
        assert_eq!(append.variables["codes"].as_array().map(Vec::len), Some(1));
        assert_eq!(append.variables["codes"][0]["code"], *code);
    }

    assert!(
        shopify
            .requests()
            .iter()
            .all(|r| r.access_token.as_deref() == Some(TEST_ACCESS_TOKEN))
    );
}

#[tokio::test]
async fn test_fixed_amount_is_rounded_to_cents() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior::default()).await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let (status, _) = submit(
        &base,
        &[
            ("title", "Ten off"),
            ("discountType", "fixed"),
            ("value", "19.999"),
            ("numberOfCodes", "1"),
            ("codeLength", "8"),
            ("startDate", "2024-06-30"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let creates = shopify.requests_for("DiscountCodeBasicCreate");
    let value = &creates[0].variables["basicCodeDiscount"]["customerGets"]["value"];
    assert_eq!(value["discountAmount"]["amount"], "20.00");
    assert_eq!(value["discountAmount"]["appliesOnEachItem"], false);
    assert!(value.get("percentage").is_none());
    assert!(shopify.requests_for("DiscountRedeemCodeBulkAdd").is_empty());
}

#[tokio::test]
async fn test_create_user_error_is_returned_verbatim() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior {
        create_user_errors: vec!["Title is too long".to_string(), "Second".to_string()],
        ..FakeShopifyBehavior::default()
    })
    .await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let (status, body) = submit(&base, &bulk_form("3", "6")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Title is too long");
    assert!(shopify.requests_for("DiscountRedeemCodeBulkAdd").is_empty());
}

#[tokio::test]
async fn test_upstream_failure_on_create_uses_fallback_message() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior {
        status_override: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..FakeShopifyBehavior::default()
    })
    .await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let (status, body) = submit(&base, &bulk_form("2", "6")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Failed to create discount");
    assert_eq!(shopify.requests().len(), 1);
}

#[tokio::test]
async fn test_absorbed_append_failures_are_listed() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior {
        reject_all_appends: true,
        ..FakeShopifyBehavior::default()
    })
    .await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let (status, body) = submit(&base, &bulk_form("3", "6")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["codes"].as_array().map(Vec::len), Some(3));
    let failed = body["failedCodes"].as_array().expect("failedCodes");
    assert_eq!(failed.len(), 2);
    assert_eq!(failed[0]["code"], body["codes"][1]);
    assert_eq!(failed[0]["reason"], "Code must be unique");
    assert_eq!(shopify.requests_for("DiscountRedeemCodeBulkAdd").len(), 2);
}

#[tokio::test]
async fn test_abort_policy_stops_at_first_failed_append() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior {
        reject_all_appends: true,
        ..FakeShopifyBehavior::default()
    })
    .await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Abort).await;

    let (status, body) = submit(&base, &bulk_form("3", "6")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("Failed to add code "));
    assert!(message.contains(&format!(" to discount {FAKE_DISCOUNT_ID}: ")));
    assert!(message.ends_with(": Code must be unique"));
    assert_eq!(shopify.requests_for("DiscountRedeemCodeBulkAdd").len(), 1);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_shopify() {
    let shopify = FakeShopify::spawn(FakeShopifyBehavior::default()).await;
    let base = spawn_admin(&shopify, AppendFailurePolicy::Absorb).await;

    let cases: [&[(&str, &str)]; 4] = [
        &bulk_form("0", "6"),
        &bulk_form("3", "zero"),
        &bulk_form("37", "1"),
        &[("title", "   "), ("discountType", "percentage")],
    ];

    for form in cases {
        let (status, body) = submit(&base, form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{form:?}");
        assert!(body["error"].is_string());
    }

    assert!(shopify.requests().is_empty());
}
