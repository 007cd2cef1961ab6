//! Health check handler
//!
//! The gateway has no health of its own worth reporting; the check probes
//! the upstream root endpoint and relays whatever it says.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;

use crate::errors::relay_error::RelayResult;
use crate::state::AppState;

/// Relay `GET /` to the upstream and return its answer verbatim
pub async fn health_check(State(state): State<Arc<AppState>>) -> RelayResult<Response> {
    let upstream = state.relay.get("/", state.relay.timeouts.health).await?;
    Ok(upstream.into_response())
}
