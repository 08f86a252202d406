use axum::{Json, extract::State};
use reqwest::Url;

use crate::{
    error::AppError,
    message::{Agent, ChatRequest},
    state::SharedState,
};

/// Relay one chat message to the caller-supplied webhook and hand back the
/// normalized reply. Validation runs before any outbound call is attempted.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let webhook_url = payload
        .webhook_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or(AppError::MissingField("webhookUrl"))?;

    let message = payload
        .message
        .as_deref()
        .map(str::trim)
        .filter(|msg| !msg.is_empty())
        .ok_or(AppError::MissingField("message"))?;

    let url =
        Url::parse(webhook_url).map_err(|_| AppError::InvalidUrl(webhook_url.to_string()))?;

    let reply = state
        .relay
        .forward(&url, message, payload.agent.as_deref())
        .await
        .map_err(|err| AppError::UpstreamUnavailable(err.to_string()))?;

    Ok(Json(reply.into_envelope()))
}

pub async fn list_agents_handler(State(state): State<SharedState>) -> Json<Vec<Agent>> {
    Json(state.agents.clone())
}
