//! Text chat handler

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use tracing::debug;

use super::require;
use crate::errors::relay_error::RelayResult;
use crate::state::AppState;

/// Conversation history sent when the client supplies none
///
/// The history is an opaque string (by convention a JSON-encoded array); the
/// gateway never parses it.
const EMPTY_HISTORY: &str = "[]";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: Option<String>,
    pub history: Option<String>,
}

/// Relay a text chat turn
///
/// Takes JSON from the caller, forwards it as url-encoded form fields (the
/// upstream's expected shape), and relays the JSON reply verbatim.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> RelayResult<Response> {
    let text = require("text", request.text.as_deref())?;
    let history = request.history.as_deref().unwrap_or(EMPTY_HISTORY);

    debug!(text_len = text.len(), "Relaying chat request");
    let upstream = state
        .relay
        .post_form(
            "/chat",
            &[("text", text), ("history", history)],
            state.relay.timeouts.chat,
        )
        .await?;
    Ok(upstream.into_response())
}
