//! JNG Core - Shared domain types for the storefront.
//!
//! This crate provides the types used across the JNG storefront components:
//! - `storefront` - Public-facing shop server
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and domain logic - no I/O, no database
//! access, no HTTP clients. The session cart lives here because its merge and
//! total rules are pure and must behave identically on every storage backend.
//!
//! # Modules
//!
//! - [`cart`] - Session-scoped shopping cart and its line items
//! - [`types`] - Newtype IDs and checkout contact information

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
