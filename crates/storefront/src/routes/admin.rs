//! Admin catalog screen.
//!
//! Plain HTML forms posting back to the server, each redirecting to `/admin`.
//! A rejected add (duplicate id, unparseable price) redirects with an
//! `?error=` tag the page turns into a notice, instead of dumping a JSON
//! error at a human.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use super::products::ProductView;
use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::state::AppState;
use crate::store::StoreError;

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub products: Vec<ProductView>,
    pub notice: Option<String>,
}

/// Query string on `/admin` (`?error=duplicate` after a rejected add).
#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub error: Option<String>,
}

/// Add-product form fields. `featured` is a checkbox, present only when
/// ticked; `price` arrives as text and is parsed server-side.
#[derive(Debug, Deserialize)]
pub struct AdminProductForm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub featured: Option<String>,
}

fn notice_for(error: &str) -> String {
    match error {
        "duplicate" => "A product with that id already exists.".to_owned(),
        "invalid-price" => "Price must be a non-negative number.".to_owned(),
        _ => "The product could not be added.".to_owned(),
    }
}

/// `GET /admin` - catalog table plus the add-product form.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<AdminTemplate> {
    let products = state
        .store()
        .list_products()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(AdminTemplate {
        products,
        notice: query.error.as_deref().map(notice_for),
    })
}

/// `POST /admin/products` - add a product to the catalog.
#[instrument(skip(state, form))]
pub async fn add_product(
    State(state): State<AppState>,
    Form(form): Form<AdminProductForm>,
) -> Result<Redirect> {
    let Ok(price) = form.price.trim().parse::<Decimal>() else {
        return Ok(Redirect::to("/admin?error=invalid-price"));
    };
    if price < Decimal::ZERO {
        return Ok(Redirect::to("/admin?error=invalid-price"));
    }

    let product = Product {
        id: form.id.trim().to_owned(),
        name: form.name,
        description: form.description,
        price,
        image: form.image,
        featured: form.featured.is_some(),
    };

    match state.store().add_product(product).await {
        Ok(()) => Ok(Redirect::to("/admin")),
        Err(StoreError::Conflict(_)) => Ok(Redirect::to("/admin?error=duplicate")),
        Err(e) => Err(e.into()),
    }
}

/// `POST /admin/products/{id}/delete` - drop a product. Unknown ids are a
/// no-op, matching the store contract.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    state.store().remove_product(&id).await?;
    Ok(Redirect::to("/admin"))
}

/// `POST /admin/products/{id}/feature` - flip a product's featured flag.
#[instrument(skip(state))]
pub async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    state.store().toggle_featured(&id).await?;
    Ok(Redirect::to("/admin"))
}
