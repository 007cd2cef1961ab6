//! Relay error taxonomy and HTTP mapping
//!
//! Four failure classes exist:
//! - `Validation`: a required field is missing or empty. The upstream is
//!   never contacted. Maps to 400.
//! - `UpstreamTimeout`: the upstream did not complete within the operation's
//!   timeout. Maps to 504.
//! - `UpstreamUnreachable`: connect refused, DNS failure, or another
//!   transport-level fault. Maps to 502.
//! - `Internal`: any other fault while relaying. Maps to 502.
//!
//! A non-success status from the upstream is NOT an error: the status and
//! body are relayed verbatim so the caller sees the upstream's own payload.

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result alias used by the relay and handlers
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors produced while relaying a request to the upstream
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required request field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// The upstream did not respond within the operation's timeout
    #[error("Upstream timed out after {timeout:?}")]
    UpstreamTimeout { timeout: Duration },

    /// The upstream could not be reached at all
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Any other fault while communicating with the upstream
    #[error("Relay failure: {0}")]
    Internal(String),
}

impl RelayError {
    /// Classify a `reqwest` transport error
    ///
    /// `timeout` is the per-operation bound that was in effect, reported back
    /// to the caller when the error is a timeout.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            RelayError::UpstreamTimeout { timeout }
        } else if err.is_connect() || err.is_request() {
            RelayError::UpstreamUnreachable(err.to_string())
        } else {
            RelayError::Internal(err.to_string())
        }
    }

    /// The HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::UpstreamUnreachable(_) | RelayError::Internal(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Relay error: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Malformed multipart bodies are a client problem, not a relay fault
impl From<axum::extract::multipart::MultipartError> for RelayError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        RelayError::Validation(format!("Invalid multipart body: {err}"))
    }
}
