//! Payment-gateway session creation.
//!
//! The gateway is an opaque external service: it takes the cart as line items
//! (amounts in cents) plus redirect URLs, and answers with a hosted checkout
//! URL the browser is sent to. No payment state is kept locally.

use jng_core::Cart;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::PaymentConfig;

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No gateway endpoint is configured.
    #[error("payment gateway is not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the external checkout-session API.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Serialize)]
struct SessionRequest {
    line_items: Vec<LineItem>,
    success_url: String,
    cancel_url: String,
}

#[derive(Debug, Serialize)]
struct LineItem {
    name: String,
    /// Unit amount in the smallest currency unit.
    unit_amount: i64,
    quantity: u32,
    image: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    url: String,
}

impl PaymentClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client fails to build.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Create a hosted checkout session for the cart.
    ///
    /// `base_url` (no trailing slash) is used for item image links and the
    /// success/cancel redirects back to the cart page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the gateway responds with a
    /// non-success status, or the response cannot be parsed.
    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    pub async fn create_session(&self, cart: &Cart, base_url: &str) -> Result<String, PaymentError> {
        let line_items = cart
            .lines()
            .iter()
            .map(|line| LineItem {
                name: line.name.clone(),
                unit_amount: to_cents(line.price),
                quantity: line.qty,
                image: format!("{base_url}/static/{}", line.image),
            })
            .collect();

        let request = SessionRequest {
            line_items,
            success_url: format!("{base_url}/cart?success=1"),
            cancel_url: format!("{base_url}/cart?canceled=1"),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(session.url)
    }
}

/// Convert a decimal price to the smallest currency unit.
fn to_cents(price: Decimal) -> i64 {
    (price * Decimal::ONE_HUNDRED).round().to_i64().unwrap_or(0)
}
