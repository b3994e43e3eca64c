//! Integration tests for the client state types against the live API.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (fb-cli migrate)
//! - The storefront running (cargo run -p frostbites-storefront)
//! - `STOREFRONT_DATABASE_URL` pointing at the same database, for admin accounts
//!
//! Run with: cargo test -p frostbites-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use frostbites_client::routing::navigate;
use frostbites_client::{
    ApiClient, AuthFlags, AuthSync, Catalog, ClientConfig, MemoryTokenStore, NoticeLevel, Notices,
    Route,
};
use frostbites_core::ProductDraft;
use frostbites_core::api::{LoginRequest, RegisterRequest};
use frostbites_integration_tests::{
    TEST_PASSWORD, TestContext, grant_admin, storefront_base_url, unique_email, unique_product_name,
};

fn api() -> ApiClient {
    let config = ClientConfig::new(&storefront_base_url()).unwrap();
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_sync_with_expired_session_keeps_flags_and_notifies() {
    let api = api();
    let mut notices = Notices::default();
    let mut auth = AuthSync::new(MemoryTokenStore::with_token("stale.session.token"));
    auth.set_authenticated(true);

    auth.sync(&api, &mut notices).await;

    assert!(auth.flags().is_authenticated);
    let notice = notices.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Not authorized");
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_register_then_route_gating() {
    let api = api();
    let mut notices = Notices::default();
    let mut auth = AuthSync::new(MemoryTokenStore::default());

    auth.sync(&api, &mut notices).await;
    assert_eq!(navigate("/profile", auth.flags()), Route::NotFound);

    auth.register(
        &api,
        &RegisterRequest {
            name: "Route Tester".to_string(),
            email: unique_email(),
            password: TEST_PASSWORD.to_string(),
        },
        &mut notices,
    )
    .await
    .unwrap();
    auth.sync(&api, &mut notices).await;

    assert_eq!(auth.flags(), AuthFlags::user());
    assert_eq!(navigate("/profile", auth.flags()), Route::Profile);
    assert_eq!(navigate("/admin", auth.flags()), Route::NotFound);
    assert_eq!(navigate("/login", auth.flags()), Route::Home);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_admin_catalog_round_trip() {
    let ctx = TestContext::new();
    let email = unique_email();
    ctx.register(&email).await;
    grant_admin(&email).await;

    let api = api();
    let mut notices = Notices::default();
    let mut auth = AuthSync::new(MemoryTokenStore::default());
    auth.login(
        &api,
        &LoginRequest {
            email,
            password: TEST_PASSWORD.to_string(),
        },
        &mut notices,
    )
    .await
    .unwrap();
    auth.sync(&api, &mut notices).await;
    assert_eq!(auth.flags(), AuthFlags::admin());
    assert_eq!(navigate("/admin", auth.flags()), Route::Admin);

    let mut catalog = Catalog::new();
    catalog.refresh(&api, &mut notices).await;
    let before = catalog.products().len();

    let name = unique_product_name("Client");
    let draft = ProductDraft::new("https://cdn.frostbites.co/client.jpg", &name, "6.75");
    let token = auth.token();
    let created = catalog
        .create(&api, token.as_deref(), &draft, &mut notices)
        .await
        .unwrap();
    assert_eq!(catalog.products().len(), before + 1);
    assert_eq!(notices.last().unwrap().message, format!("{name} created"));

    catalog
        .delete(&api, token.as_deref(), created.product_id, &mut notices)
        .await
        .unwrap();
    assert!(catalog.get(created.product_id).is_none());
}
