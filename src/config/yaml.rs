//! YAML configuration file loading
//!
//! All fields are optional; anything present overrides the environment-derived
//! base configuration.
//!
//! # Example YAML
//! ```yaml
//! server:
//!   host: "0.0.0.0"
//!   port: 8080
//! upstream:
//!   base_url: "http://voicebot.internal:8000"
//! security:
//!   cors_allowed_origins: "*"
//!   rate_limit_requests_per_second: 60
//!   rate_limit_burst_size: 10
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use super::GatewayConfig;

#[derive(Debug, Default, Deserialize)]
pub(super) struct YamlConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    upstream: UpstreamSection,
    #[serde(default)]
    security: SecuritySection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamSection {
    base_url: Option<String>,
    connect_timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SecuritySection {
    cors_allowed_origins: Option<String>,
    rate_limit_requests_per_second: Option<u32>,
    rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load and parse a YAML configuration file
    pub(super) fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Apply YAML overrides on top of an environment-derived base config
    pub(super) fn apply(self, mut base: GatewayConfig) -> GatewayConfig {
        if let Some(host) = self.server.host {
            base.host = host;
        }
        if let Some(port) = self.server.port {
            base.port = port;
        }
        if let Some(url) = self.upstream.base_url {
            base.upstream_base_url = url;
        }
        if let Some(secs) = self.upstream.connect_timeout_seconds {
            base.connect_timeout_seconds = secs;
        }
        if let Some(origins) = self.security.cors_allowed_origins {
            base.cors_allowed_origins = Some(origins);
        }
        if let Some(rps) = self.security.rate_limit_requests_per_second {
            base.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = self.security.rate_limit_burst_size {
            base.rate_limit_burst_size = burst;
        }
        base
    }
}
