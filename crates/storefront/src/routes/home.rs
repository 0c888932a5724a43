//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::products::ProductView;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Home page template with the featured-product reel.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductView>,
}

/// `GET /` - home page with the featured reel.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let featured = state
        .store()
        .featured_products()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(HomeTemplate { featured })
}
