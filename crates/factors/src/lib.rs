//! `carbonledger-factors` — the static emission-factor lookup table.
//!
//! Loaded once at process start and treated as a read-only, injected
//! dependency by everything else. A missing key is a configuration error
//! (the table and the caller's catalog are out of sync), never a runtime
//! user error.

pub mod table;

pub use table::{display_unit, EmissionFactorTable, ScopeFactors, RENEWABLE_FACTOR_KEY};
