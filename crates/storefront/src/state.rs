//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::services::chat::{ChatClient, ChatError};
use crate::services::payment::{PaymentClient, PaymentError};
use crate::store::DynStore;

/// Error constructing the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("chat client: {0}")]
    Chat(#[from] ChatError),
    #[error("payment client: {0}")]
    Payment(#[from] PaymentError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// selected storage backend, configuration, and the optional external-service
/// clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    store: DynStore,
    chat: Option<ChatClient>,
    payment: Option<PaymentClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The chat and payment clients are only built when their sections are
    /// present in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured client cannot be constructed.
    pub fn new(config: StoreConfig, store: DynStore) -> Result<Self, StateError> {
        let chat = config.chat.as_ref().map(ChatClient::new).transpose()?;
        let payment = config
            .payment
            .as_ref()
            .map(PaymentClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                chat,
                payment,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn store(&self) -> &DynStore {
        &self.inner.store
    }

    /// Get the chat completion client, if one is configured.
    #[must_use]
    pub fn chat(&self) -> Option<&ChatClient> {
        self.inner.chat.as_ref()
    }

    /// Get the payment gateway client, if one is configured.
    #[must_use]
    pub fn payment(&self) -> Option<&PaymentClient> {
        self.inner.payment.as_ref()
    }
}
