//! # Threatline API Library
//!
//! Axum HTTP surface over the snapshot cache: actor, campaign and timeline
//! reads plus the forced-refresh write. Transport concerns only; all join
//! and query semantics live in the engine.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use server::{ApiServer, ServerConfig};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "threatline";
