//! Session key constants.
//!
//! The only state kept in a session is the shopping cart; it is created empty
//! on first touch, cleared on successful checkout, and expires with the
//! session.

/// Session keys for cart data.
pub mod keys {
    /// Key for storing the session's [`jng_core::Cart`].
    pub const CART: &str = "cart";
}
