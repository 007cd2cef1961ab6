//! The Relay: outbound request construction and response passthrough
//!
//! Every gateway operation reduces to the same shape: build one outbound
//! request against the configured upstream base URL, wait for (or stream)
//! the upstream response, and hand it back with its status and body intact.
//! This module owns that shape. Handlers decide which endpoint, payload and
//! timeout to use; the relay decides nothing about the payload contents.
//!
//! Two response modes exist:
//! - [`UpstreamResponse`]: the body is buffered. Used for JSON endpoints
//!   where the payload is small and relayed verbatim.
//! - [`UpstreamStream`]: the body is consumed incrementally. Used for audio
//!   endpoints so playback can begin before synthesis completes. Dropping
//!   the stream (client disconnect) releases the upstream connection.
//!
//! Each call is attempted exactly once; there is no retry.

use std::time::Duration;

use axum::body::Body;
use bytes::Bytes;
use http::{HeaderValue, StatusCode, header};
use reqwest::Client;
use reqwest::multipart::Form;
use tracing::debug;

use crate::errors::relay_error::{RelayError, RelayResult};

/// Per-operation upstream timeouts
///
/// Audio synthesis is slow compared to text generation, so each operation
/// carries its own bound. `Relay::new` takes this struct explicitly, which
/// lets tests shrink the bounds to milliseconds.
#[derive(Debug, Clone)]
pub struct RelayTimeouts {
    pub health: Duration,
    pub chat: Duration,
    pub tts: Duration,
    pub transcribe: Duration,
    pub voice_chat: Duration,
    pub cloned_voice_chat: Duration,
    pub speaker_upload: Duration,
    pub speaker_list: Duration,
    pub speaker_delete: Duration,
}

impl Default for RelayTimeouts {
    fn default() -> Self {
        Self {
            health: Duration::from_secs(10),
            chat: Duration::from_secs(60),
            tts: Duration::from_secs(120),
            transcribe: Duration::from_secs(120),
            voice_chat: Duration::from_secs(300),
            cloned_voice_chat: Duration::from_secs(180),
            speaker_upload: Duration::from_secs(180),
            speaker_list: Duration::from_secs(30),
            speaker_delete: Duration::from_secs(60),
        }
    }
}

/// A buffered upstream response, relayed verbatim
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Convert into a caller-facing response without touching status or body
    pub fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}

/// A streaming upstream response
///
/// Holds the open upstream connection. The body is not read until the
/// returned stream is polled, and dropping it closes the connection, so the
/// inbound and outbound lifetimes stay coupled.
#[derive(Debug)]
pub struct UpstreamStream {
    response: reqwest::Response,
}

impl UpstreamStream {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Look up a response header by name
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.response.headers().get(name)
    }

    /// Buffer the remaining body
    ///
    /// Used when the upstream answered an audio request with a non-success
    /// status: the error payload is small and is relayed verbatim instead of
    /// streamed.
    pub async fn into_buffered(self, timeout: Duration) -> RelayResult<UpstreamResponse> {
        let status = self.response.status();
        let content_type = self.response.headers().get(header::CONTENT_TYPE).cloned();
        let body = self
            .response
            .bytes()
            .await
            .map_err(|e| RelayError::from_reqwest(e, timeout))?;
        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    /// Turn the remaining body into an incrementally consumed response body
    ///
    /// Bytes flow from the upstream socket to the caller as they arrive. If
    /// the upstream fails mid-stream the caller receives a truncated body;
    /// bytes already flushed cannot be recalled.
    pub fn into_body(self) -> Body {
        Body::from_stream(self.response.bytes_stream())
    }
}

/// The relay itself: one HTTP client, one upstream base URL
///
/// Shared read-only across all in-flight requests; the client's connection
/// pool is reused between calls.
#[derive(Debug, Clone)]
pub struct Relay {
    http: Client,
    base: String,
    pub timeouts: RelayTimeouts,
}

impl Relay {
    /// Create a relay for the given upstream base URL
    ///
    /// `base` must already be normalized (no trailing slash); config loading
    /// guarantees this.
    ///
    /// # Errors
    /// Returns `RelayError::Internal` if the HTTP client cannot be built.
    pub fn new(
        base: &str,
        connect_timeout: Duration,
        timeouts: RelayTimeouts,
    ) -> RelayResult<Self> {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base: base.to_string(),
            timeouts,
        })
    }

    /// Full upstream URL for a fixed endpoint path
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// GET an upstream endpoint, buffering the response
    pub async fn get(&self, path: &str, timeout: Duration) -> RelayResult<UpstreamResponse> {
        debug!(path, "Relaying GET to upstream");
        self.send_buffered(self.http.get(self.endpoint(path)), timeout)
            .await
    }

    /// DELETE an upstream endpoint, buffering the response
    pub async fn delete(&self, path: &str, timeout: Duration) -> RelayResult<UpstreamResponse> {
        debug!(path, "Relaying DELETE to upstream");
        self.send_buffered(self.http.delete(self.endpoint(path)), timeout)
            .await
    }

    /// POST url-encoded form fields, buffering the response
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        timeout: Duration,
    ) -> RelayResult<UpstreamResponse> {
        debug!(path, "Relaying form POST to upstream");
        self.send_buffered(self.http.post(self.endpoint(path)).form(fields), timeout)
            .await
    }

    /// POST url-encoded form fields, leaving the response streamable
    pub async fn post_form_streaming(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        accept: &str,
        timeout: Duration,
    ) -> RelayResult<UpstreamStream> {
        debug!(path, accept, "Relaying streaming form POST to upstream");
        self.send_streaming(
            self.http
                .post(self.endpoint(path))
                .header(header::ACCEPT, accept)
                .form(fields),
            timeout,
        )
        .await
    }

    /// POST a multipart form, buffering the response
    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
        timeout: Duration,
    ) -> RelayResult<UpstreamResponse> {
        debug!(path, "Relaying multipart POST to upstream");
        self.send_buffered(self.http.post(self.endpoint(path)).multipart(form), timeout)
            .await
    }

    /// POST a multipart form, leaving the response streamable
    pub async fn post_multipart_streaming(
        &self,
        path: &str,
        form: Form,
        accept: &str,
        timeout: Duration,
    ) -> RelayResult<UpstreamStream> {
        debug!(path, accept, "Relaying streaming multipart POST to upstream");
        self.send_streaming(
            self.http
                .post(self.endpoint(path))
                .header(header::ACCEPT, accept)
                .multipart(form),
            timeout,
        )
        .await
    }

    async fn send_buffered(
        &self,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> RelayResult<UpstreamResponse> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RelayError::from_reqwest(e, timeout))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::from_reqwest(e, timeout))?;

        debug!(status = %status, bytes = body.len(), "Upstream response buffered");
        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    /// Send a request but return before the body has been read
    ///
    /// The timeout covers the whole exchange: if the upstream stalls past it
    /// mid-body, the stream yields an error and the caller's response is cut
    /// off.
    async fn send_streaming(
        &self,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> RelayResult<UpstreamStream> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RelayError::from_reqwest(e, timeout))?;

        debug!(status = %response.status(), "Upstream response headers received, streaming body");
        Ok(UpstreamStream { response })
    }
}
