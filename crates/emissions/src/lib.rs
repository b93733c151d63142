//! Emissions module (per-session line-item ledger and aggregations).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod ledger;
pub mod offset;

pub use ledger::{LineItem, LineItemLedger};
pub use offset::{trees_needed_per_year, ABSORPTION_PER_TREE_KG_PER_YEAR, TREE_LIFETIME_YEARS};
