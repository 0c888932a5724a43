//! Chat assistant for the storefront widget.
//!
//! Two modes behind one route: a scripted canned reply (the default), and a
//! proxy to an OpenAI-compatible completion API when one is configured. The
//! widget never talks to the completion API directly; the key stays on the
//! server.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::ChatConfig;

/// System prompt sent ahead of every proxied message.
const SYSTEM_PROMPT: &str =
    "You are a helpful sales and support assistant for a solar and security company.";

/// Token budget for upstream replies.
const DEFAULT_MAX_TOKENS: u32 = 400;

/// Canned reply for the scripted (no upstream) variant.
///
/// Mirrors what a human dispatcher would send before a specialist picks the
/// conversation up.
#[must_use]
pub fn scripted_reply(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        return "Please share how we can help.".to_owned();
    }
    format!("Thanks for your message: \"{message}\". A JNG specialist will reply shortly.")
}

/// Errors that can occur when proxying to the completion API.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for an OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<CompletionMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionReply,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    content: String,
}

impl ChatClient {
    /// Create a new completion-API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client fails to build.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ChatError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// Proxy one visitor message upstream and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API responds with a
    /// non-success status, or the response carries no completion.
    #[instrument(skip(self, message), fields(model = %self.model))]
    pub async fn reply(&self, message: &str) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_owned(),
                },
                CompletionMessage {
                    role: "user",
                    content: message.to_owned(),
                },
            ],
            max_tokens: DEFAULT_MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Parse("completion had no choices".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_reply_prompts_on_empty_message() {
        assert_eq!(scripted_reply(""), "Please share how we can help.");
        assert_eq!(scripted_reply("   "), "Please share how we can help.");
    }

    #[test]
    fn test_scripted_reply_echoes_the_message() {
        let reply = scripted_reply("Do you install cameras?");
        assert_eq!(
            reply,
            "Thanks for your message: \"Do you install cameras?\". A JNG specialist will reply shortly."
        );
    }
}
