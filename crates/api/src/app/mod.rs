//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: factor table + per-session ledger registry
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use carbonledger_factors::EmissionFactorTable;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(factors: EmissionFactorTable) -> Router {
    let services = Arc::new(services::AppServices::new(factors));

    // Session-scoped routes: require an x-session-id header.
    let scoped = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn(middleware::session_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/factors", get(routes::factors::catalog))
        .layer(Extension(services))
        .merge(scoped)
}
