//! JSON API routes.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod checkout;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Static showroom contact details served at `/api/location`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub hours: &'static str,
    pub map_url: &'static str,
}

/// `GET /api/location` - showroom contact details for the contact page.
#[instrument]
pub async fn location() -> Json<LocationInfo> {
    Json(LocationInfo {
        name: "JNG Solar & Security",
        address: "Maputo, Mozambique",
        phone: "+258 84 000 0000",
        hours: "Mon-Fri 08:00 - 17:00",
        map_url: "https://maps.google.com/?q=Maputo%2C%20Mozambique",
    })
}

/// Create the `/api` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/purchases/{id}", get(catalog::get_purchase))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", post(checkout::checkout))
        .route("/chat", post(chat::chat))
        .route("/location", get(location))
}
