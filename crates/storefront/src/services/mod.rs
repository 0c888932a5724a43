//! External service clients and the scripted chat assistant.

pub mod chat;
pub mod payment;

pub use chat::ChatClient;
pub use payment::PaymentClient;
