//! Integration tests for the product catalog.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (fb-cli migrate)
//! - The storefront running (cargo run -p frostbites-storefront)
//! - `STOREFRONT_DATABASE_URL` pointing at the same database, for admin accounts
//!
//! Run with: cargo test -p frostbites-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use frostbites_core::api::{
    ErrorResponse, MessageResponse, ProductResponse, ProductsResponse, TOKEN_HEADER,
};
use frostbites_core::{Price, ProductId};
use frostbites_integration_tests::{TestContext, json_body, unique_email, unique_product_name};

fn product_body(name: &str, price: &str) -> Value {
    json!({
        "imageUrl": "https://cdn.frostbites.co/test-scoop.jpg",
        "name": name,
        "price": price,
    })
}

async fn create(ctx: &TestContext, token: &str, body: &Value) -> reqwest::Response {
    ctx.client
        .post(ctx.url("/product/create"))
        .header(TOKEN_HEADER, token)
        .json(body)
        .send()
        .await
        .unwrap()
}

async fn list(ctx: &TestContext) -> ProductsResponse {
    let resp = ctx.client.get(ctx.url("/product")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    json_body(resp).await
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_list_is_public_and_ordered() {
    let ctx = TestContext::new();

    let body = list(&ctx).await;

    let ids: Vec<ProductId> = body.products.iter().map(|p| p.product_id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_create_without_token_is_forbidden() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/product/create"))
        .json(&product_body(&unique_product_name("Nope"), "3.00"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: ErrorResponse = json_body(resp).await;
    assert_eq!(body.message, "Not authorized");
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_create_as_shopper_is_forbidden() {
    let ctx = TestContext::new();
    let token = ctx.register(&unique_email()).await;

    let resp = create(&ctx, &token, &product_body(&unique_product_name("Nope"), "3.00")).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Admin CRUD
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_admin_product_lifecycle() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let name = unique_product_name("Lifecycle");

    // Create
    let resp = create(&ctx, &token, &product_body(&name, "4.5")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ProductResponse = json_body(resp).await;
    assert!(created.success);
    assert_eq!(created.message, format!("{name} created"));
    assert_eq!(created.product.product_price, Price::from_cents(450));
    let id = created.product.product_id;

    // Listed (the cache is invalidated on create)
    assert!(list(&ctx).await.products.iter().any(|p| p.product_id == id));

    // Update
    let renamed = unique_product_name("Renamed");
    let resp = ctx
        .client
        .put(ctx.url(&format!("/product/{id}")))
        .header(TOKEN_HEADER, &token)
        .json(&product_body(&renamed, "5.25"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: ProductResponse = json_body(resp).await;
    assert_eq!(updated.product.product_name, renamed);
    assert_eq!(updated.product.product_price, Price::from_cents(525));

    // Delete
    let delete = || {
        ctx.client
            .delete(ctx.url(&format!("/product/{id}")))
            .header(TOKEN_HEADER, &token)
            .send()
    };
    let resp = delete().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: MessageResponse = json_body(resp).await;
    assert!(deleted.success);
    assert!(!list(&ctx).await.products.iter().any(|p| p.product_id == id));

    // Gone
    let resp = delete().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_create_rejects_invalid_draft() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;

    let resp = create(&ctx, &token, &product_body(&unique_product_name("Gold"), "250")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(resp).await;
    assert_eq!(body.message, "Price must be less than 200.00");

    let resp = create(&ctx, &token, &product_body("Ube", "3.00")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(resp).await;
    assert_eq!(body.message, "Name must be at least 4 chars");
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_create_duplicate_name_conflicts() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let name = unique_product_name("Twin");

    let first = create(&ctx, &token, &product_body(&name, "3.00")).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created: ProductResponse = json_body(first).await;

    let second = create(&ctx, &token, &product_body(&name, "3.00")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Clean up
    ctx.client
        .delete(ctx.url(&format!("/product/{}", created.product.product_id)))
        .header(TOKEN_HEADER, &token)
        .send()
        .await
        .unwrap();
}
