pub mod config;
pub mod errors;
pub mod handlers;
pub mod relay;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::GatewayConfig;
pub use errors::relay_error::{RelayError, RelayResult};
pub use relay::{Relay, RelayTimeouts};
pub use state::AppState;
