//! Checkout endpoints.
//!
//! `POST /api/checkout` converts the session cart into a durable purchase.
//! The order matters: validate the contact details, reject an empty cart,
//! persist the purchase with its items (all-or-nothing in the store), and
//! only then clear the session cart. A storage failure leaves the cart
//! untouched so the client can retry.

use axum::{Json, extract::State};
use jng_core::{ContactInfo, PurchaseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::{load_cart, save_cart};
use crate::error::{AppError, Result};
use crate::services::payment::PaymentError;
use crate::state::AppState;

/// Checkout request body. Fields default to empty so a missing field is a
/// validation failure, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    pub purchase_id: PurchaseId,
    pub total: Decimal,
}

/// Hosted-checkout session response from the payment gateway.
#[derive(Debug, Serialize)]
pub struct GatewaySessionResponse {
    pub url: String,
}

/// `POST /api/checkout` - persist the session cart as a purchase.
#[instrument(skip(state, session, request))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let contact = ContactInfo::new(&request.name, &request.email, &request.address)
        .map_err(|_| AppError::BadRequest("Missing checkout details".to_owned()))?;

    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_owned()));
    }

    let purchase = state.store().create_purchase(&contact, &cart).await?;

    cart.clear();
    save_cart(&session, &cart).await?;

    tracing::info!(purchase_id = %purchase.id, total = %purchase.total, "purchase recorded");

    Ok(Json(CheckoutResponse {
        message: "Purchase complete".to_owned(),
        purchase_id: purchase.id,
        total: purchase.total,
    }))
}

/// `POST /create-checkout-session` - hand the cart to the external payment
/// gateway and return the hosted checkout URL.
#[instrument(skip(state, session))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<GatewaySessionResponse>> {
    let Some(client) = state.payment() else {
        return Err(AppError::Payment(PaymentError::NotConfigured));
    };

    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_owned()));
    }

    let base_url = state.config().base_url.trim_end_matches('/');
    let url = client.create_session(&cart, base_url).await?;

    Ok(Json(GatewaySessionResponse { url }))
}
