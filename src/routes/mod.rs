//! Router assembly

pub mod api;
