//! In-process API tests over the file backend.
//!
//! Each test builds the full application router (session layer included)
//! against a scratch data directory and drives it with `oneshot` requests.
//! The session cookie from the first mutating response is replayed by hand
//! to continue the same cart.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use jng_storefront::config::{StoreBackend, StoreConfig};
use jng_storefront::routes;
use jng_storefront::state::AppState;
use jng_storefront::store;

async fn test_app(data_dir: &Path) -> Router {
    let config = StoreConfig {
        backend: StoreBackend::File {
            data_dir: data_dir.to_path_buf(),
        },
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        chat: None,
        payment: None,
        sentry_dsn: None,
    };

    let store = store::connect(&config).await.expect("open file store");
    store.seed_demo_products().await.expect("seed catalog");

    let state = AppState::new(config, store).expect("build state");
    routes::app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("build request")
}

fn post_json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}

/// The session cookie set by a response, ready to send back.
fn session_cookie(response: &axum::http::Response<axum::body::Body>) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(str::to_owned)
}

async fn body_json(response: axum::http::Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[tokio::test]
async fn test_health_endpoints_respond() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_product_listing_and_detail() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app.clone().oneshot(get("/api/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 4);

    let response = app.clone().oneshot(get("/api/products/p1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["product"]["name"], "Solar Panel 320W");
    assert_eq!(body["product"]["price"], "189.00");

    let response = app.oneshot(get("/api/products/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_cart_lifecycle_in_one_session() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    // First add creates the session
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/add",
            &json!({"productId": "p1", "qty": 2}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("session cookie");
    let body = body_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["qty"], 2);

    // Second add for the same product merges into one line
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/add",
            &json!({"productId": "p1", "qty": 3}),
            Some(&cookie),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["qty"], 5);
    assert_eq!(body["total"], "945.00");

    // Update clamps a zero quantity to one
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/update",
            &json!({"productId": "p1", "qty": 0}),
            Some(&cookie),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"][0]["qty"], 1);

    // Removing an unknown product leaves the cart unchanged
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/remove",
            &json!({"productId": "p9"}),
            Some(&cookie),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    // Removing the line empties the cart
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/remove",
            &json!({"productId": "p1"}),
            Some(&cookie),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], "0");
}

#[tokio::test]
async fn test_adding_unknown_product_is_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app
        .oneshot(post_json(
            "/api/cart/add",
            &json!({"productId": "p9"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_carts_are_isolated_per_session() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/add",
            &json!({"productId": "p2"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A request without the session cookie sees an empty cart
    let response = app.oneshot(get("/api/cart")).await.unwrap();
    let body = body_json(response).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_requires_contact_details_and_a_cart() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    // Missing fields
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/checkout",
            &json!({"name": "Ana", "email": "", "address": "Av. 24 de Julho"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing checkout details");

    // Valid contact but empty cart
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/checkout",
            &json!({"name": "Ana", "email": "ana@example.com", "address": "Av. 24 de Julho"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Cart is empty");

    // No purchase was written by either failure
    let response = app.oneshot(get("/api/purchases/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_persists_purchase_and_clears_cart() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/cart/add",
            &json!({"productId": "p1", "qty": 2}),
            None,
        ))
        .await
        .unwrap();
    let cookie = session_cookie(&response).expect("session cookie");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/checkout",
            &json!({"name": "Ana Macamo", "email": "ana@example.com", "address": "Av. 24 de Julho"}),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Purchase complete");
    assert_eq!(body["purchaseId"], 1);
    assert_eq!(body["total"], "378.00");

    // The cart is emptied by the successful checkout
    let response = app
        .clone()
        .oneshot(get_with_cookie("/api/cart", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    // The purchase and its line snapshot are durably readable
    let response = app
        .clone()
        .oneshot(get("/api/purchases/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["purchase"]["total"], "378.00");
    assert_eq!(body["purchase"]["name"], "Ana Macamo");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["qty"], 2);
    assert_eq!(items[0]["productId"], "p1");
    assert_eq!(items[0]["purchaseId"], 1);

    // The same session cannot check the same cart out twice
    let response = app
        .oneshot(post_json(
            "/api/checkout",
            &json!({"name": "Ana Macamo", "email": "ana@example.com", "address": "Av. 24 de Julho"}),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Cart is empty");
}

#[tokio::test]
async fn test_chat_returns_the_scripted_reply() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/chat",
            &json!({"message": "Do you install cameras?"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["reply"],
        "Thanks for your message: \"Do you install cameras?\". A JNG specialist will reply shortly."
    );

    let response = app
        .oneshot(post_json("/api/chat", &json!({}), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["reply"], "Please share how we can help.");
}

#[tokio::test]
async fn test_location_returns_showroom_details() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app.oneshot(get("/api/location")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "JNG Solar & Security");
    assert!(body["mapUrl"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_checkout_session_without_gateway_is_bad_gateway() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create-checkout-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_html_pages_render() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path()).await;

    for uri in ["/", "/products", "/products/p1", "/services", "/contact", "/cart", "/admin"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }

    let response = app.oneshot(get("/products/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
