//! Configuration module for the Voicebot Gateway
//!
//! This module handles gateway configuration from various sources: .env files,
//! YAML files, and environment variables. Priority: YAML > ENV vars > .env
//! values > defaults.
//!
//! # Example
//! ```rust,no_run
//! use voicebot_gateway::config::GatewayConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = GatewayConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config_path = PathBuf::from("config.yaml");
//! let config = GatewayConfig::from_file(&config_path)?;
//!
//! println!("Gateway listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod yaml;

use crate::utils::url_validation::normalize_base_url;

/// Default upstream base URL when `UPSTREAM_BASE_URL` is unset.
///
/// Matches the voicebot API's default local bind address, so a bare
/// `cargo run` against a locally running upstream works out of the box.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://127.0.0.1:8000";

/// Gateway configuration
///
/// Contains all configuration needed to run the gateway, including:
/// - Server settings (host, port)
/// - The upstream voicebot service base URL
/// - Security settings (CORS, rate limiting)
/// - Outbound connection settings
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Base URL of the upstream voicebot service. Resolved once at startup;
    /// handlers never consult the environment directly.
    pub upstream_base_url: String,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,

    /// Connect timeout for the outbound HTTP client, in seconds
    /// Default: 10
    pub connect_timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            cors_allowed_origins: None,
            rate_limit_requests_per_second: 60,
            rate_limit_burst_size: 10,
            connect_timeout_seconds: 10,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `HOST`, `PORT`, `UPSTREAM_BASE_URL`, `CORS_ALLOWED_ORIGINS`,
    /// `RATE_LIMIT_REQUESTS_PER_SECOND`, `RATE_LIMIT_BURST_SIZE` and
    /// `CONNECT_TIMEOUT_SECONDS`, falling back to defaults for anything
    /// unset. The `.env` file (if any) is loaded in `main` before this runs,
    /// so its values are visible here as ordinary environment variables.
    ///
    /// # Errors
    /// Returns an error if a numeric variable fails to parse or the upstream
    /// base URL is malformed.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port = parse_env("PORT", defaults.port)?;
        let upstream_base_url = std::env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string());
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();
        let rate_limit_requests_per_second = parse_env(
            "RATE_LIMIT_REQUESTS_PER_SECOND",
            defaults.rate_limit_requests_per_second,
        )?;
        let rate_limit_burst_size =
            parse_env("RATE_LIMIT_BURST_SIZE", defaults.rate_limit_burst_size)?;
        let connect_timeout_seconds =
            parse_env("CONNECT_TIMEOUT_SECONDS", defaults.connect_timeout_seconds)?;

        let config = Self {
            host,
            port,
            upstream_base_url,
            cors_allowed_origins,
            rate_limit_requests_per_second,
            rate_limit_burst_size,
            connect_timeout_seconds,
        };
        config.validated()
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Environment variables (with defaults) provide the base configuration;
    /// values present in the YAML file override them.
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is malformed,
    /// or the merged configuration fails validation.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let overrides = yaml::YamlConfig::from_file(path)?;
        let base = Self::from_env()?;
        overrides.apply(base).validated()
    }

    /// Get the bind address as a "host:port" string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration, normalizing the upstream base URL
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended
    /// directly.
    fn validated(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        self.upstream_base_url = normalize_base_url(&self.upstream_base_url)?;
        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| format!("Invalid value for {name}: {e}")),
        Err(_) => Ok(default),
    }
}
