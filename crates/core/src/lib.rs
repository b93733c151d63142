//! `carbonledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod scope;

pub use error::{DomainError, DomainResult};
pub use id::SessionId;
pub use scope::Scope;
