//! Voice chat handlers
//!
//! `chat_voice` sends a text turn and streams the spoken reply back as WAV,
//! passing through the upstream's `X-Reply-Text` header so clients can show
//! the transcript while audio plays. `chat_voice_cloned` does the same
//! against a previously uploaded reference speaker.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::Response;
use http::{HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use super::{audio_response, require};
use crate::errors::relay_error::RelayResult;
use crate::state::AppState;

/// Optional header carrying the text transcript of a spoken reply
const REPLY_TEXT_HEADER: HeaderName = HeaderName::from_static("x-reply-text");

#[derive(Debug, Deserialize)]
pub struct VoiceChatRequest {
    pub text: Option<String>,
    pub history: Option<String>,
    pub speaker_id: Option<String>,
    /// Accepted alias for `speaker_id`; forwarded under the name the client
    /// used
    pub speaker: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClonedVoiceChatRequest {
    pub speaker_id: Option<String>,
    pub text: Option<String>,
    pub history: Option<String>,
}

/// Relay a voice chat turn, streaming the spoken reply
///
/// Optional fields follow an explicit allow-list (`history`, `speaker_id`,
/// `speaker`); anything else the client sends is dropped rather than
/// forwarded.
pub async fn chat_voice(
    State(state): State<Arc<AppState>>,
    Form(request): Form<VoiceChatRequest>,
) -> RelayResult<Response> {
    let text = require("text", request.text.as_deref())?;
    let timeout = state.relay.timeouts.voice_chat;

    let mut form = reqwest::multipart::Form::new().text("text", text.to_string());
    if let Some(history) = request.history {
        form = form.text("history", history);
    }
    if let Some(speaker_id) = request.speaker_id {
        form = form.text("speaker_id", speaker_id);
    }
    if let Some(speaker) = request.speaker {
        form = form.text("speaker", speaker);
    }

    debug!(text_len = text.len(), "Relaying voice chat request");
    let stream = state
        .relay
        .post_multipart_streaming("/chat-voice", form, "audio/wav", timeout)
        .await?;

    if !stream.status().is_success() {
        return Ok(stream.into_buffered(timeout).await?.into_response());
    }

    let mut extra_headers: Vec<(HeaderName, HeaderValue)> = Vec::new();
    if let Some(reply_text) = stream.header(REPLY_TEXT_HEADER.as_str()) {
        extra_headers.push((REPLY_TEXT_HEADER, reply_text.clone()));
    }
    Ok(audio_response(stream, extra_headers))
}

/// Relay a cloned-voice chat turn, streaming the spoken reply
pub async fn chat_voice_cloned(
    State(state): State<Arc<AppState>>,
    Form(request): Form<ClonedVoiceChatRequest>,
) -> RelayResult<Response> {
    let speaker_id = require("speaker_id", request.speaker_id.as_deref())?;
    let text = require("text", request.text.as_deref())?;
    let timeout = state.relay.timeouts.cloned_voice_chat;

    let mut fields = vec![("speaker_id", speaker_id), ("text", text)];
    if let Some(history) = request.history.as_deref() {
        fields.push(("history", history));
    }

    debug!(speaker_id, "Relaying cloned voice chat request");
    let stream = state
        .relay
        .post_form_streaming("/chat-voice-cloned", &fields, "audio/wav", timeout)
        .await?;

    if !stream.status().is_success() {
        return Ok(stream.into_buffered(timeout).await?.into_response());
    }

    Ok(audio_response(stream, Vec::new()))
}
