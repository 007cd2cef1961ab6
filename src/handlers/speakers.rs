//! Speaker management handlers
//!
//! Reference speakers power voice cloning upstream. The gateway only relays:
//! upload a reference WAV, list known speakers, delete one.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use tracing::debug;

use super::{UploadedFile, require};
use crate::errors::relay_error::{RelayError, RelayResult};
use crate::state::AppState;

/// Speaker ids become upstream path segments, so keep them to a single
/// segment
fn is_valid_speaker_id(speaker_id: &str) -> bool {
    !speaker_id.is_empty() && !speaker_id.contains("..") && !speaker_id.contains('/')
}

/// Relay a reference speaker upload
///
/// Expects multipart fields `speaker_id` and `file`; both are required and
/// checked before the upstream is contacted.
pub async fn upload_speaker(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> RelayResult<Response> {
    let mut speaker_id: Option<String> = None;
    let mut file: Option<UploadedFile> = None;
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("speaker_id") => speaker_id = Some(field.text().await?),
            Some("file") => file = Some(UploadedFile::from_field(field).await?),
            _ => {}
        }
    }

    let speaker_id = require("speaker_id", speaker_id.as_deref())?.to_string();
    let file = file.ok_or_else(|| {
        RelayError::Validation("The file field is required".to_string())
    })?;

    debug!(speaker_id = %speaker_id, bytes = file.data.len(), "Relaying speaker upload");
    let form = reqwest::multipart::Form::new()
        .text("speaker_id", speaker_id)
        .part("file", file.into_part()?);
    let upstream = state
        .relay
        .post_multipart("/speaker/upload", form, state.relay.timeouts.speaker_upload)
        .await?;
    Ok(upstream.into_response())
}

/// Relay the speaker listing
pub async fn list_speakers(State(state): State<Arc<AppState>>) -> RelayResult<Response> {
    let upstream = state
        .relay
        .get("/speaker/list", state.relay.timeouts.speaker_list)
        .await?;
    Ok(upstream.into_response())
}

/// Relay a speaker deletion
pub async fn delete_speaker(
    State(state): State<Arc<AppState>>,
    Path(speaker_id): Path<String>,
) -> RelayResult<Response> {
    if !is_valid_speaker_id(&speaker_id) {
        return Err(RelayError::Validation(
            "Invalid speaker_id format".to_string(),
        ));
    }

    debug!(speaker_id = %speaker_id, "Relaying speaker deletion");
    let upstream = state
        .relay
        .delete(
            &format!("/speaker/{speaker_id}"),
            state.relay.timeouts.speaker_delete,
        )
        .await?;
    Ok(upstream.into_response())
}
