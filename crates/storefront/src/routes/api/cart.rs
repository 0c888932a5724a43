//! Session cart JSON API.
//!
//! The cart lives in the session, never in the storage backend. Every
//! response carries the full cart plus a freshly computed total, so the
//! client can re-render without a second round trip.

use axum::{Json, extract::State};
use jng_core::{Cart, CartLine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session::keys;
use crate::state::AppState;

/// Wire shape of the cart: `{items, total}`.
#[derive(Debug, Serialize)]
pub struct CartPayload {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

impl From<Cart> for CartPayload {
    fn from(cart: Cart) -> Self {
        Self {
            total: cart.total(),
            items: cart.lines().to_vec(),
        }
    }
}

/// Load the session's cart, creating an empty one on first touch.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub product_id: String,
    pub qty: Option<u32>,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub product_id: String,
    pub qty: Option<u32>,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub product_id: String,
}

/// `GET /api/cart` - the session's cart and its total.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartPayload>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.into()))
}

/// `POST /api/cart/add` - add a product snapshot to the cart.
///
/// Unknown products are a 404; an existing line for the same product has its
/// quantity increased instead of a second line being appended.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartPayload>> {
    let product = state
        .store()
        .get_product(&request.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let mut cart = load_cart(&session).await?;
    cart.add(CartLine {
        product_id: product.id,
        name: product.name,
        price: product.price,
        image: product.image,
        qty: request.qty.unwrap_or(1),
    });
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// `POST /api/cart/update` - set a line's quantity (clamped to at least 1).
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<CartPayload>> {
    let mut cart = load_cart(&session).await?;
    if !cart.set_qty(&request.product_id, request.qty.unwrap_or(1)) {
        return Err(AppError::NotFound("Item not found".to_owned()));
    }
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// `POST /api/cart/remove` - drop a line. A no-op when the line is absent.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<CartPayload>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&request.product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}
