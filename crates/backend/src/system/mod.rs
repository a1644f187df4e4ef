pub mod auth;
pub mod middleware;
pub mod slider_core;
pub mod state;
pub mod tracing;
