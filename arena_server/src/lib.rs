//! HTTP server for the arena tournament/news platform.
//!
//! The binary in `main.rs` wires configuration, stores, and the router
//! together; everything reusable (and everything the integration tests
//! drive) lives here.

pub mod api;
pub mod config;
pub mod logging;
pub mod seed;
