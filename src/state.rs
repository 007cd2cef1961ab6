//! Shared application state
//!
//! Built once at startup and shared read-only across all requests via `Arc`.
//! Nothing in here is mutated after construction.

use std::sync::Arc;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::errors::relay_error::RelayResult;
use crate::relay::{Relay, RelayTimeouts};

/// Application state: the configuration and the relay built from it
pub struct AppState {
    pub config: GatewayConfig,
    pub relay: Relay,
}

impl AppState {
    /// Build state with the default per-operation timeouts
    pub fn new(config: GatewayConfig) -> RelayResult<Arc<Self>> {
        Self::with_timeouts(config, RelayTimeouts::default())
    }

    /// Build state with explicit timeouts (tests shrink these)
    pub fn with_timeouts(config: GatewayConfig, timeouts: RelayTimeouts) -> RelayResult<Arc<Self>> {
        let relay = Relay::new(
            &config.upstream_base_url,
            Duration::from_secs(config.connect_timeout_seconds),
            timeouts,
        )?;
        Ok(Arc::new(Self { config, relay }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_builds_from_default_config() {
        let state = AppState::new(GatewayConfig::default()).unwrap();
        assert_eq!(
            state.config.upstream_base_url,
            crate::config::DEFAULT_UPSTREAM_BASE_URL
        );
    }
}
