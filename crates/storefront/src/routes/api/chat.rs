//! Chat widget endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::services::chat::scripted_reply;
use crate::state::AppState;

/// Visitor message body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// `{reply}` response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `POST /api/chat` - answer a visitor message.
///
/// Proxies to the configured completion API when one exists; otherwise the
/// scripted dispatcher reply. Upstream failures surface as 502, they are
/// never silently replaced by the scripted variant.
#[instrument(skip(state, request))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let message = request.message.trim();

    let reply = match state.chat() {
        Some(client) if !message.is_empty() => client.reply(message).await?,
        _ => scripted_reply(message),
    };

    Ok(Json(ChatResponse { reply }))
}
