use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carbonledger_core::{DomainError, DomainResult, Scope};

/// One recorded emission entry (immutable once inserted).
///
/// `emissions` is fixed at insertion time as `quantity * factor`, less any
/// renewable offset supplied with the submission; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub scope: Scope,
    /// Present for nested factor tables (Scope 1/3, individual); absent for
    /// flat ones (Scope 2).
    pub category: Option<String>,
    pub activity_type: String,
    pub quantity: f64,
    /// kg CO₂e.
    pub emissions: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered per-session ledger of emission line items.
///
/// Insertion order is display order. A ledger is owned by exactly one
/// session and is never mutated concurrently; a service front-end must
/// serialize access per session key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemLedger {
    items: Vec<LineItem>,
}

impl LineItemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and append a line item; returns a copy of the created entry.
    ///
    /// `renewable_offset` is a pre-computed kg CO₂e reduction (the Scope-2
    /// renewable-electricity subtraction); over-offsetting may drive
    /// `emissions` negative. A quantity of exactly zero is accepted and
    /// records a zero-emission entry.
    pub fn add(
        &mut self,
        scope: Scope,
        category: Option<String>,
        activity_type: impl Into<String>,
        quantity: f64,
        factor: f64,
        renewable_offset: f64,
    ) -> DomainResult<LineItem> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DomainError::validation(format!(
                "quantity must be a non-negative number, got {quantity}"
            )));
        }
        if !factor.is_finite() || factor < 0.0 {
            return Err(DomainError::validation(format!(
                "emission factor must be a non-negative number, got {factor}"
            )));
        }
        if !renewable_offset.is_finite() || renewable_offset < 0.0 {
            return Err(DomainError::validation(format!(
                "renewable offset must be a non-negative number, got {renewable_offset}"
            )));
        }

        let item = LineItem {
            scope,
            category,
            activity_type: activity_type.into(),
            quantity,
            emissions: quantity * factor - renewable_offset,
            recorded_at: Utc::now(),
        };
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove and return the item at `index`.
    ///
    /// Subsequent indices shift down by one; callers must not cache indices
    /// across deletes. On an out-of-range index the ledger is left
    /// unchanged.
    pub fn delete(&mut self, index: usize) -> DomainResult<LineItem> {
        if index >= self.items.len() {
            return Err(DomainError::index_out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of emissions over items in `scope`; 0.0 for an empty match set.
    pub fn total_by_scope(&self, scope: Scope) -> f64 {
        self.items
            .iter()
            .filter(|item| item.scope == scope)
            .map(|item| item.emissions)
            .sum()
    }

    /// Emissions grouped by category (falling back to `activity_type` when
    /// the category is absent), in insertion order of first occurrence.
    pub fn total_by_category(&self) -> Vec<(String, f64)> {
        let mut groups: Vec<(String, f64)> = Vec::new();
        for item in &self.items {
            let key = item.category.as_deref().unwrap_or(&item.activity_type);
            match groups.iter_mut().find(|(k, _)| k == key) {
                Some((_, total)) => *total += item.emissions,
                None => groups.push((key.to_string(), item.emissions)),
            }
        }
        groups
    }

    /// Sum of all emissions in the ledger.
    pub fn grand_total(&self) -> f64 {
        self.items.iter().map(|item| item.emissions).sum()
    }
}
