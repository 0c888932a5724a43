//! Product listing and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::filters::format_price;
use crate::models::Product;
use crate::state::AppState;

/// Product display data for templates.
///
/// Prices are pre-formatted; templates never see raw decimals.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub featured: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: format_price(product.price),
            image: product.image,
            featured: product.featured,
        }
    }
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub products: Vec<ProductView>,
}

/// Product detail template. `product` is `None` for unknown ids; the page
/// body then renders a not-found message under a 404 status.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductTemplate {
    pub product: Option<ProductView>,
}

/// `GET /products` - the full catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<ProductsTemplate> {
    let products = state
        .store()
        .list_products()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductsTemplate { products })
}

/// `GET /products/{id}` - one product, or a 404 page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let product = state.store().get_product(&id).await?.map(ProductView::from);

    let status = if product.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    Ok((status, ProductTemplate { product }).into_response())
}
