//! HTTP server for the record catalog.
//!
//! This module provides:
//! - REST API using axum
//! - Optional static front-end and image directories
//! - Health and metrics endpoints

mod app;
pub mod metrics;
pub mod observability;
mod rest;

pub use app::{App, ServerConfig};
pub use metrics::init_metrics;
pub use observability::init_tracing;
pub use rest::{create_rest_router, ApiError, HealthResponse};
