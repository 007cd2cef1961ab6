//! Upstream base URL validation
//!
//! The gateway forwards every request to a single configured upstream, so a
//! malformed base URL should fail at startup rather than on the first
//! request. Validation ensures the URL:
//! - Uses the http or https scheme
//! - Has a host
//! - Carries no query string or fragment
//!
//! The upstream is commonly a loopback address (the voicebot API runs on the
//! same machine by default), so private addresses are allowed here.

use thiserror::Error;
use url::Url;

/// Errors that can occur during upstream URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not carry a query string or fragment")]
    UnexpectedComponents,
}

/// Validate and normalize an upstream base URL
///
/// Returns the URL with any trailing slashes trimmed so fixed endpoint paths
/// (`/chat`, `/tts`, ...) can be appended directly.
///
/// # Example
/// ```rust
/// use voicebot_gateway::utils::url_validation::normalize_base_url;
///
/// let base = normalize_base_url("http://127.0.0.1:8000/").unwrap();
/// assert_eq!(base, "http://127.0.0.1:8000");
/// ```
pub fn normalize_base_url(raw: &str) -> Result<String, UrlValidationError> {
    let parsed = Url::parse(raw)?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(UrlValidationError::UnexpectedComponents);
    }

    Ok(raw.trim_end_matches('/').to_string())
}
