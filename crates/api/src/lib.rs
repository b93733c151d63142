//! HTTP API: server, routing, and request/response mapping.
//!
//! This adapter owns no business rules; it resolves a session's ledger,
//! translates JSON to domain calls, and maps domain errors to responses.

pub mod app;
pub mod context;
pub mod middleware;
