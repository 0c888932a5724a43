//! Session middleware configuration.
//!
//! Sessions hold exactly one thing: the shopping cart. They are kept in the
//! in-process `MemoryStore` - the cart is request-scoped per-session state
//! with session lifetime, so it does not belong in the storage backend, and
//! it must behave identically whether the backend is the document store or
//! `PostgreSQL`.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StoreConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "jng_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with the in-process store.
#[must_use]
pub fn create_session_layer(config: &StoreConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
