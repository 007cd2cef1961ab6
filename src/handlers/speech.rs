//! Text-to-speech and transcription handlers
//!
//! Both operations front the upstream's speech endpoints. TTS streams raw
//! WAV bytes back to the caller as they are synthesized; transcription
//! forwards the uploaded audio and relays the JSON result verbatim.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Multipart, State};
use axum::response::Response;
use http::{HeaderValue, header};
use serde::Deserialize;
use tracing::debug;

use super::{UploadedFile, audio_response, require};
use crate::errors::relay_error::{RelayError, RelayResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: Option<String>,
}

/// Relay a text-to-speech request, streaming the synthesized WAV back
///
/// The upstream body is copied to the caller incrementally; playback can
/// start before synthesis finishes. A non-success upstream status is relayed
/// verbatim instead (the error payload is JSON, not audio).
pub async fn tts(
    State(state): State<Arc<AppState>>,
    Form(request): Form<TtsRequest>,
) -> RelayResult<Response> {
    let text = require("text", request.text.as_deref())?;
    let timeout = state.relay.timeouts.tts;

    debug!(text_len = text.len(), "Relaying TTS request");
    let form = reqwest::multipart::Form::new().text("text", text.to_string());
    let stream = state
        .relay
        .post_multipart_streaming("/tts", form, "audio/wav", timeout)
        .await?;

    if !stream.status().is_success() {
        return Ok(stream.into_buffered(timeout).await?.into_response());
    }

    Ok(audio_response(
        stream,
        vec![
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("inline"),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            ),
        ],
    ))
}

/// Relay an audio transcription request
///
/// The uploaded file is forwarded with its original filename and declared
/// MIME type (falling back to `audio/wav`); the upstream's JSON transcript is
/// relayed verbatim. Unknown multipart fields are ignored.
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> RelayResult<Response> {
    let mut file: Option<UploadedFile> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file = Some(UploadedFile::from_field(field).await?);
        }
    }
    let file = file.ok_or_else(|| {
        RelayError::Validation("The file field is required".to_string())
    })?;

    debug!(
        file_name = %file.file_name,
        content_type = %file.content_type,
        bytes = file.data.len(),
        "Relaying transcription request"
    );
    let form = reqwest::multipart::Form::new().part("file", file.into_part()?);
    let upstream = state
        .relay
        .post_multipart("/transcribe", form, state.relay.timeouts.transcribe)
        .await?;
    Ok(upstream.into_response())
}
