//! Newtype wrappers for IDs and checkout contact details.

pub mod contact;
pub mod id;

pub use contact::{ContactError, ContactInfo};
pub use id::{PurchaseId, PurchaseItemId};
