//! Checkout contact details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error validating checkout contact details.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// A required field was empty or whitespace-only.
    #[error("missing {0}")]
    MissingField(&'static str),
}

/// Contact details captured at checkout time.
///
/// Stored as a snapshot on the purchase record. Fields are only required to be
/// non-empty; no further validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    name: String,
    email: String,
    address: String,
}

impl ContactInfo {
    /// Validate and construct contact details from raw form input.
    ///
    /// Leading and trailing whitespace is trimmed from every field.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingField` naming the first field that is
    /// empty after trimming.
    pub fn new(name: &str, email: &str, address: &str) -> Result<Self, ContactError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        let address = address.trim();
        if address.is_empty() {
            return Err(ContactError::MissingField("address"));
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            address: address.to_owned(),
        })
    }

    /// The customer's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The customer's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The customer's delivery address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}
