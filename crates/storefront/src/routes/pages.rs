//! Static marketing pages and the cart page shell.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::filters;

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/services.html")]
pub struct ServicesTemplate;

/// Contact page template. The location block is filled client-side from
/// `/api/location`.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate;

/// Cart page template. Line items are rendered client-side from `/api/cart`.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate;

/// `GET /services`.
#[instrument]
pub async fn services() -> ServicesTemplate {
    ServicesTemplate
}

/// `GET /contact`.
#[instrument]
pub async fn contact() -> ContactTemplate {
    ContactTemplate
}

/// `GET /cart`.
#[instrument]
pub async fn cart() -> CartTemplate {
    CartTemplate
}
