//! Catalog and purchase lookup JSON API.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::{Product, Purchase, PurchaseItem};
use crate::state::AppState;

/// `{products: [...]}` response.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `{product}` response.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// `{purchase, items}` response.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub purchase: Purchase,
    pub items: Vec<PurchaseItem>,
}

/// `GET /api/products` - the whole catalog.
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let products = state.store().list_products().await?;
    Ok(Json(ProductsResponse { products }))
}

/// `GET /api/products/{id}` - one product, or 404.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = state
        .store()
        .get_product(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
    Ok(Json(ProductResponse { product }))
}

/// `GET /api/purchases/{id}` - a purchase and its line items, or 404.
#[instrument(skip(state))]
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PurchaseResponse>> {
    let (purchase, items) = state
        .store()
        .get_purchase(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase not found".to_owned()))?;
    Ok(Json(PurchaseResponse { purchase, items }))
}
