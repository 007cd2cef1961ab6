use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, chat, speakers, speech, voice};
use crate::state::AppState;
use std::sync::Arc;

/// Body cap for the upload routes. The framework default of 2 MB is far too
/// small for audio: a minute of 16-bit 44.1 kHz WAV is roughly 10 MB.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Create the gateway router
///
/// The caller-facing surface mirrors the upstream endpoint paths one-to-one,
/// so clients written against the upstream work against the gateway
/// unchanged.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/chat", post(chat::chat))
        .route("/tts", post(speech::tts))
        .route(
            "/transcribe",
            post(speech::transcribe).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/chat-voice", post(voice::chat_voice))
        .route("/chat-voice-cloned", post(voice::chat_voice_cloned))
        .route(
            "/speaker/upload",
            post(speakers::upload_speaker).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/speaker/list", get(speakers::list_speakers))
        .route("/speaker/{speaker_id}", delete(speakers::delete_speaker))
        .layer(TraceLayer::new_for_http())
}
