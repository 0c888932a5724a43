//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Backend selection
//! - `STORE_BACKEND` - `file` (default) or `postgres`
//! - `STORE_DATA_DIR` - Data directory for the file backend (default: `data`)
//! - `STORE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`); required for the postgres backend
//!
//! ## Server
//! - `STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_PORT` - Listen port (default: 3000)
//! - `STORE_BASE_URL` - Public URL for the storefront (default derived from
//!   host and port)
//!
//! ## Optional integrations
//! - `CHAT_API_URL` + `CHAT_API_KEY` (+ `CHAT_MODEL`) - OpenAI-compatible
//!   completion endpoint for the chat widget; scripted replies when unset
//! - `PAYMENT_API_URL` + `PAYMENT_API_KEY` - External payment gateway for
//!   `/create-checkout-session`
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storage backend selected at startup.
    pub backend: StoreBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Optional completion-API proxy for the chat widget
    pub chat: Option<ChatConfig>,
    /// Optional external payment gateway
    pub payment: Option<PaymentConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Storage backend selection.
///
/// `SecretString` redacts the connection string (which carries a password)
/// from `Debug` output.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// JSON document store under a local data directory.
    File { data_dir: PathBuf },
    /// `PostgreSQL` via sqlx.
    Postgres { database_url: SecretString },
}

/// Completion-API configuration for the chat proxy.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ChatConfig {
    /// Chat completion endpoint (OpenAI-compatible).
    pub endpoint: Url,
    /// Bearer token for the completion API.
    pub api_key: SecretString,
    /// Model name sent with every request.
    pub model: String,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Payment gateway configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct PaymentConfig {
    /// Gateway endpoint that creates checkout sessions.
    pub endpoint: Url,
    /// Bearer token for the gateway.
    pub api_key: SecretString,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("STORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_PORT".to_string(), e.to_string()))?;
        let base_url =
            get_env_or_default("STORE_BASE_URL", &format!("http://localhost:{port}"));

        let backend = StoreBackend::from_env()?;
        let chat = ChatConfig::from_env()?;
        let payment = PaymentConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            backend,
            host,
            port,
            base_url,
            chat,
            payment,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StoreBackend {
    fn from_env() -> Result<Self, ConfigError> {
        match get_env_or_default("STORE_BACKEND", "file").as_str() {
            "file" => Ok(Self::File {
                data_dir: PathBuf::from(get_env_or_default("STORE_DATA_DIR", "data")),
            }),
            "postgres" => Ok(Self::Postgres {
                database_url: get_database_url("STORE_DATABASE_URL")?,
            }),
            other => Err(ConfigError::InvalidEnvVar(
                "STORE_BACKEND".to_string(),
                format!("expected `file` or `postgres`, got `{other}`"),
            )),
        }
    }
}

impl ChatConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(raw) = get_optional_env("CHAT_API_URL") else {
            return Ok(None);
        };
        Ok(Some(Self {
            endpoint: parse_endpoint("CHAT_API_URL", &raw)?,
            api_key: get_required_secret("CHAT_API_KEY")?,
            model: get_env_or_default("CHAT_MODEL", "gpt-4o-mini"),
        }))
    }
}

impl PaymentConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(raw) = get_optional_env("PAYMENT_API_URL") else {
            return Ok(None);
        };
        Ok(Some(Self {
            endpoint: parse_endpoint("PAYMENT_API_URL", &raw)?,
            api_key: get_required_secret("PAYMENT_API_KEY")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an endpoint URL from an environment variable value.
fn parse_endpoint(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_accepts_http_urls() {
        let url = parse_endpoint("CHAT_API_URL", "https://api.example.com/v1/chat").unwrap();
        assert_eq!(url.host_str(), Some("api.example.com"));
    }

    #[test]
    fn test_parse_endpoint_rejects_garbage() {
        let result = parse_endpoint("CHAT_API_URL", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let config = StoreConfig {
            backend: StoreBackend::File {
                data_dir: PathBuf::from("data"),
            },
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            chat: None,
            payment: None,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_chat_config_debug_redacts_secrets() {
        let config = ChatConfig {
            endpoint: Url::parse("https://api.example.com/v1/chat").unwrap(),
            api_key: SecretString::from("super_secret_chat_key"),
            model: "gpt-4o-mini".to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("api.example.com"));
        assert!(debug_output.contains("gpt-4o-mini"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_chat_key"));
    }

    #[test]
    fn test_payment_config_debug_redacts_secrets() {
        let config = PaymentConfig {
            endpoint: Url::parse("https://pay.example.com/sessions").unwrap(),
            api_key: SecretString::from("super_secret_gateway_key"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("pay.example.com"));
        assert!(!debug_output.contains("super_secret_gateway_key"));
    }
}
