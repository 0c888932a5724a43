//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (featured reel)
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store ping)
//!
//! # Pages
//! GET  /products                - Product listing
//! GET  /products/{id}           - Product detail (404 page on unknown id)
//! GET  /services                - Services page
//! GET  /contact                 - Contact page
//! GET  /cart                    - Cart page (items rendered from /api/cart)
//!
//! # Admin
//! GET  /admin                   - Catalog table + add form
//! POST /admin/products          - Add product (redirects back)
//! POST /admin/products/{id}/delete  - Delete product
//! POST /admin/products/{id}/feature - Toggle featured flag
//!
//! # JSON API
//! GET  /api/products            - {products}
//! GET  /api/products/{id}       - {product} | 404 {message}
//! GET  /api/purchases/{id}      - {purchase, items} | 404 {message}
//! GET  /api/cart                - {items, total}
//! POST /api/cart/add            - Add line | 404 unknown product
//! POST /api/cart/update         - Set quantity | 404 line absent
//! POST /api/cart/remove         - Drop line (no-op when absent)
//! POST /api/checkout            - Persist purchase, clear cart | 400
//! POST /api/chat                - {reply} (scripted or proxied)
//! GET  /api/location            - Showroom contact details
//!
//! # Payment gateway
//! POST /create-checkout-session - Hosted checkout URL | 400 | 502
//! ```

pub mod admin;
pub mod api;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware;
use crate::state::AppState;

/// Create the HTML page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/services", get(pages::services))
        .route("/contact", get(pages::contact))
        .route("/cart", get(pages::cart))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::index))
        .route("/products", post(admin::add_product))
        .route("/products/{id}/delete", post(admin::delete_product))
        .route("/products/{id}/feature", post(admin::toggle_featured))
}

/// Assemble the full application router: pages, admin, API, static assets,
/// health probes, and the session layer.
///
/// Built as a function of state so the integration tests can drive the exact
/// router the binary serves.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(page_routes())
        .nest("/admin", admin_routes())
        .nest("/api", api::router())
        .route(
            "/create-checkout-session",
            post(api::checkout::create_checkout_session),
        )
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Pings the storage backend; 503 when it is unreachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
