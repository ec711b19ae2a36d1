//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - Server-rendered HTML pages, JSON errors

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod views;
#[cfg(test)]
pub(crate) mod testing;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
