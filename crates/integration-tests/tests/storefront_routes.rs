//! Storefront HTTP routes driven through the router in-process.
//!
//! Run with: cargo test -p tidewater-integration-tests

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tidewater_core::CatalogSnapshot;
use tidewater_integration_tests::{fixture_state, test_config};
use tidewater_storefront::app;
use tidewater_storefront::catalog::CatalogStore;
use tidewater_storefront::middleware::REQUEST_ID_HEADER;
use tidewater_storefront::state::AppState;
use tower::ServiceExt;

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn product_ids(&self) -> Vec<String> {
        self.json()["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }
}

async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

async fn get(uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app(fixture_state()), request).await
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let resp = get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, b"ok");
}

#[tokio::test]
async fn test_readiness_with_catalog() {
    let resp = get("/health/ready").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_with_empty_catalog() {
    let state = AppState::new(test_config(), CatalogStore::new(CatalogSnapshot::default()));
    let request = Request::builder()
        .uri("/health/ready")
        .body(Body::empty())
        .unwrap();

    let resp = send(app(state), request).await;
    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
}

// ============================================================================
// Request IDs
// ============================================================================

#[tokio::test]
async fn test_request_id_generated() {
    let resp = get("/health").await;
    let id = resp.headers.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "edge-1234")
        .body(Body::empty())
        .unwrap();

    let resp = send(app(fixture_state()), request).await;
    assert_eq!(resp.headers.get(REQUEST_ID_HEADER).unwrap(), "edge-1234");
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_both_words_required() {
    let resp = get("/search?q=red%20jacket").await;
    assert_eq!(resp.status, StatusCode::OK);

    let body = resp.json();
    assert_eq!(body["query"], "red jacket");
    assert_eq!(body["total_count"], 1);
    assert_eq!(resp.product_ids(), vec!["red"]);
}

#[tokio::test]
async fn test_search_fuzzy_typo() {
    let resp = get("/search?q=jaket").await;
    assert_eq!(resp.product_ids(), vec!["red", "blue"]);
}

#[tokio::test]
async fn test_search_through_collections() {
    let resp = get("/search?q=outerwear").await;
    assert_eq!(resp.product_ids(), vec!["red", "blue"]);

    let resp = get("/search?q=outerwear&categories=false").await;
    assert_eq!(resp.json()["total_count"], 0);
    assert!(resp.product_ids().is_empty());
}

#[tokio::test]
async fn test_search_blank_query_pages_catalog() {
    let resp = get("/search").await;
    let body = resp.json();

    assert_eq!(body["total_count"], 5);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 2);
    assert_eq!(body["has_next_page"], true);
    assert_eq!(resp.product_ids(), vec!["red", "blue"]);
}

#[tokio::test]
async fn test_search_second_page() {
    let resp = get("/search?q=%20%20&page=2&per_page=3").await;
    let body = resp.json();

    assert_eq!(body["per_page"], 3);
    assert_eq!(body["has_next_page"], false);
    assert_eq!(resp.product_ids(), vec!["legs", "tote"]);
}

#[tokio::test]
async fn test_search_per_page_clamped() {
    let resp = get("/search?per_page=500").await;
    assert_eq!(resp.json()["per_page"], 4);

    let resp = get("/search?per_page=0").await;
    assert_eq!(resp.json()["per_page"], 1);
}

#[tokio::test]
async fn test_suggest() {
    let resp = get("/search/suggest?q=jacket").await;
    assert_eq!(resp.status, StatusCode::OK);

    let body = resp.json();
    let names: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Red Leather Jacket", "Blue Denim Jacket"]);
}

#[tokio::test]
async fn test_suggest_blank_query() {
    let resp = get("/search/suggest?q=%20").await;
    let body = resp.json();
    assert_eq!(body["query"], "");
    assert!(body["suggestions"].as_array().unwrap().is_empty());
}

// ============================================================================
// Collections
// ============================================================================

#[tokio::test]
async fn test_collections_hide_all_products() {
    let resp = get("/collections").await;
    let body = resp.json();
    let ids: Vec<&str> = body["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["outerwear", "footwear", "sale"]);
}

#[tokio::test]
async fn test_collection_products() {
    let resp = get("/collections/sale/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["collection"]["name"], "Sale");
    assert_eq!(resp.product_ids(), vec!["red", "boot"]);

    let resp = get("/collections/sale/products?q=boot").await;
    assert_eq!(resp.product_ids(), vec!["boot"]);
}

#[tokio::test]
async fn test_collection_products_unknown() {
    let resp = get("/collections/hats/products").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"], "Not found: collection hats");
}

// ============================================================================
// Mixed rails
// ============================================================================

#[tokio::test]
async fn test_mix_round_robin_default() {
    let resp = get("/collections/mix?ids=sale,outerwear").await;
    assert_eq!(resp.status, StatusCode::OK);

    let body = resp.json();
    assert_eq!(body["strategy"], "round-robin");
    assert_eq!(body["limit"], 3);
    assert_eq!(resp.product_ids(), vec!["red", "boot", "blue"]);
}

#[tokio::test]
async fn test_mix_sequential_with_limit() {
    let resp = get("/collections/mix?ids=outerwear,%20footwear&strategy=sequential&limit=2").await;
    assert_eq!(resp.json()["strategy"], "sequential");
    assert_eq!(resp.product_ids(), vec!["red", "blue"]);
}

#[tokio::test]
async fn test_mix_limit_clamped() {
    let resp = get("/collections/mix?ids=sale,outerwear,footwear&limit=50").await;
    assert_eq!(resp.json()["limit"], 4);
}

#[tokio::test]
async fn test_mix_weighted_shuffled_is_bounded() {
    let resp = get(
        "/collections/mix?ids=sale,outerwear,footwear&strategy=weighted&shuffle_collections=true&shuffle_items=true",
    )
    .await;
    let mut ids = resp.product_ids();
    assert_eq!(ids.len(), 3);

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_mix_rejects_bad_input() {
    let resp = get("/collections/mix").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = get("/collections/mix?ids=sale&strategy=zigzag").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json()["error"],
        "Bad request: unknown mix strategy: zigzag"
    );

    let resp = get("/collections/mix?ids=sale,hats").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"], "Bad request: unknown collection: hats");
}
