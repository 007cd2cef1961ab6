//! HTTP request handlers
//!
//! This module organizes the caller-facing handlers into logical groups:
//! - `api` - Health check (relayed upstream root probe)
//! - `chat` - Text chat
//! - `speech` - Text-to-speech and transcription
//! - `voice` - Voice chat (streamed audio reply) and cloned voice chat
//! - `speakers` - Speaker reference upload, listing and deletion
//!
//! Handlers validate required fields, hand the payload to the [`Relay`] and
//! return the upstream response unmodified. They never interpret bodies.
//!
//! [`Relay`]: crate::relay::Relay

use axum::extract::multipart::Field;
use axum::response::Response;
use bytes::Bytes;
use http::{HeaderName, HeaderValue, header};

use crate::errors::relay_error::{RelayError, RelayResult};
use crate::relay::UpstreamStream;

pub mod api;
pub mod chat;
pub mod speakers;
pub mod speech;
pub mod voice;

/// MIME type assumed for uploads that declare none
pub(crate) const DEFAULT_AUDIO_MIME: &str = "audio/wav";

/// Filename assumed for uploads that declare none
pub(crate) const DEFAULT_AUDIO_FILENAME: &str = "audio.wav";

/// Check a required text field, rejecting absent or blank values
///
/// Returns the original (untrimmed) value so field contents pass through
/// uninterpreted.
pub(crate) fn require<'a>(name: &str, value: Option<&'a str>) -> RelayResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RelayError::Validation(format!(
            "The {name} field is required"
        ))),
    }
}

/// Build a streamed `audio/wav` response from an upstream stream
///
/// The upstream status is preserved and the body is consumed incrementally,
/// so audio playback can begin before the transfer completes. Callers must
/// read any headers they need off the stream before calling this.
pub(crate) fn audio_response(
    stream: UpstreamStream,
    extra_headers: Vec<(HeaderName, HeaderValue)>,
) -> Response {
    let status = stream.status();
    let mut response = Response::new(stream.into_body());
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    for (name, value) in extra_headers {
        headers.insert(name, value);
    }
    response
}

/// An uploaded file read out of a multipart field
pub(crate) struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    /// Read a multipart field carrying a file
    ///
    /// The client's filename and declared MIME type are preserved so the
    /// upstream sees the upload exactly as the gateway did. A missing MIME
    /// type falls back to `audio/wav`; a non-audio one is rejected before
    /// any upstream call.
    pub(crate) async fn from_field(field: Field<'_>) -> RelayResult<Self> {
        let file_name = field
            .file_name()
            .unwrap_or(DEFAULT_AUDIO_FILENAME)
            .to_string();
        let content_type = match field.content_type() {
            Some(mime) if mime.starts_with("audio/") => mime.to_string(),
            Some(mime) => {
                return Err(RelayError::Validation(format!(
                    "The file must be audio, got content type {mime}"
                )));
            }
            None => DEFAULT_AUDIO_MIME.to_string(),
        };
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(RelayError::Validation(
                "The file field is required".to_string(),
            ));
        }
        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }

    /// Convert into an outbound multipart part
    pub(crate) fn into_part(self) -> RelayResult<reqwest::multipart::Part> {
        reqwest::multipart::Part::bytes(self.data.to_vec())
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| RelayError::Validation(format!("Invalid file content type: {e}")))
    }
}
