//! Live HTTP tests against the storefront API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p telar-storefront)
//! - Seeded products
//!
//! Run with: `cargo test -p telar-integration-tests -- --ignored`

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use telar_core::ProductId;
use telar_integration_tests::storefront_base_url;
use telar_storefront::catalog::CatalogClient;
use telar_storefront::notify::Notifier;
use telar_storefront::store::ClientStore;
use telar_storefront::wishlist::{RemoteWishlist, WishlistError};

/// Create a client with a cookie store so the session survives requests.
fn api_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_product_list_and_detail() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to get products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse products");
    assert!(!products.is_empty(), "seed data expected");

    let id = products[0]["id"].as_i64().expect("product id");
    let resp = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);

    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product["id"].as_i64(), Some(id));
    // Option fields always arrive normalized as arrays.
    assert!(product["sizes"].is_array());
    assert!(product["colors"].is_array());
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_unknown_product_is_404() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/products/999999999"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_ofertas_only_lists_discounted() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/products/ofertas"))
        .send()
        .await
        .expect("Failed to get ofertas");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse ofertas");
    for product in &products {
        assert!(
            product.get("discountPrice").is_some(),
            "every oferta carries a discount"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_categories_are_distinct_strings() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/categories"))
        .send()
        .await
        .expect("Failed to get categories");
    assert_eq!(resp.status(), StatusCode::OK);

    let categories: Vec<String> = resp.json().await.expect("Failed to parse categories");
    let mut deduped = categories.clone();
    deduped.dedup();
    assert_eq!(categories, deduped);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_anonymous_session_snapshot() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/session"))
        .send()
        .await
        .expect("Failed to get session");
    assert_eq!(resp.status(), StatusCode::OK);

    let session: Value = resp.json().await.expect("Failed to parse session");
    assert_eq!(session["authenticated"].as_bool(), Some(false));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_wishlist_mutations_require_session() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/wishlist/check/1"))
        .send()
        .await
        .expect("Failed to send check");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .post(format!("{base_url}/api/wishlist"))
        .json(&serde_json::json!({ "productId": 1 }))
        .send()
        .await
        .expect("Failed to send add");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_remote_wishlist_redirects_anonymous_users_to_login() {
    let client = CatalogClient::new(&storefront_base_url(), Duration::from_secs(10))
        .expect("Failed to create catalog client");
    let notifier = Notifier::new();
    let store = ClientStore::in_memory();
    let wishlist = RemoteWishlist::new(client, notifier.clone(), store);

    let result = wishlist.sync_toggle(ProductId::new(1), "/products/1").await;
    match result {
        Err(WishlistError::NotAuthenticated { login_url }) => {
            assert_eq!(login_url, "/login?return_to=%2Fproducts%2F1");
        }
        other => panic!("expected NotAuthenticated, got {other:?}"),
    }
    // The warning was surfaced before the redirect, and the anonymous
    // session snapshot was persisted.
    assert!(notifier.current().is_some());
    let session = wishlist.cached_session().expect("session snapshot");
    assert!(!session.authenticated);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health_endpoints() {
    let client = api_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to get health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}
