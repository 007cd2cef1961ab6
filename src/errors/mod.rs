//! Error types for the gateway
//!
//! All handler failures resolve into a [`relay_error::RelayError`]; nothing
//! surfaces to the caller as an unhandled fault.

pub mod relay_error;

pub use relay_error::{RelayError, RelayResult};
