use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use carbonledger_core::{DomainError, DomainResult, Scope, SessionId};
use carbonledger_emissions::{trees_needed_per_year, LineItem, LineItemLedger};
use carbonledger_factors::EmissionFactorTable;

/// Aggregated view of one session's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    /// (scope, total) in `Scope::ALL` order.
    pub by_scope: Vec<(Scope, f64)>,
    /// (category, total) in insertion order of first occurrence.
    pub by_category: Vec<(String, f64)>,
    pub grand_total: f64,
    pub trees_needed_per_year: u64,
}

/// Per-session ledger registry.
///
/// One ledger per session key with serialized access: a mutex per session
/// inside a read-mostly map. Nothing shares a ledger across sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    ledgers: RwLock<HashMap<SessionId, Arc<Mutex<LineItemLedger>>>>,
}

impl SessionRegistry {
    /// Get or create the ledger owned by `session_id`.
    ///
    /// Only the add path registers a ledger; read and delete paths use
    /// [`SessionRegistry::get`] so that probing session IDs cannot grow
    /// the registry.
    pub fn ledger(&self, session_id: SessionId) -> Arc<Mutex<LineItemLedger>> {
        if let Some(ledger) = self.ledgers.read().unwrap().get(&session_id) {
            return Arc::clone(ledger);
        }
        let mut ledgers = self.ledgers.write().unwrap();
        Arc::clone(
            ledgers
                .entry(session_id)
                .or_insert_with(|| Arc::new(Mutex::new(LineItemLedger::new()))),
        )
    }

    /// The ledger owned by `session_id`, if one has recorded entries.
    pub fn get(&self, session_id: SessionId) -> Option<Arc<Mutex<LineItemLedger>>> {
        self.ledgers.read().unwrap().get(&session_id).map(Arc::clone)
    }
}

/// Application services shared by all routes.
pub struct AppServices {
    factors: EmissionFactorTable,
    sessions: SessionRegistry,
}

/// A validated add-entry submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AddEntry {
    pub scope: Scope,
    pub category: Option<String>,
    pub activity_type: String,
    pub quantity: f64,
    /// Renewable energy (kWh) to subtract from a Scope-2 submission.
    pub renewable_kwh: f64,
}

impl AppServices {
    pub fn new(factors: EmissionFactorTable) -> Self {
        Self {
            factors,
            sessions: SessionRegistry::default(),
        }
    }

    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    /// Resolve the factor, compute the renewable offset, and append a line
    /// item to the session's ledger. Returns the item's index and the item.
    pub fn add_entry(
        &self,
        session_id: SessionId,
        entry: AddEntry,
    ) -> DomainResult<(usize, LineItem)> {
        if !entry.renewable_kwh.is_finite() || entry.renewable_kwh < 0.0 {
            return Err(DomainError::validation(format!(
                "renewable_kwh must be a non-negative number, got {}",
                entry.renewable_kwh
            )));
        }
        if entry.renewable_kwh > 0.0 && entry.scope != Scope::Scope2 {
            return Err(DomainError::validation(
                "renewable_kwh only applies to scope_2 submissions",
            ));
        }

        let factor =
            self.factors
                .factor(entry.scope, entry.category.as_deref(), &entry.activity_type)?;
        let renewable_offset = entry.renewable_kwh * self.factors.renewable_factor();

        let ledger = self.sessions.ledger(session_id);
        let mut ledger = ledger.lock().unwrap();
        let index = ledger.len();
        let item = ledger.add(
            entry.scope,
            entry.category,
            entry.activity_type,
            entry.quantity,
            factor,
            renewable_offset,
        )?;

        tracing::info!(
            session_id = %session_id,
            scope = %item.scope,
            activity_type = %item.activity_type,
            emissions_kg = item.emissions,
            "line item added"
        );
        Ok((index, item))
    }

    /// Ordered line items for the session (empty for a fresh session).
    pub fn list_entries(&self, session_id: SessionId) -> Vec<LineItem> {
        match self.sessions.get(session_id) {
            Some(ledger) => {
                let ledger = ledger.lock().unwrap();
                ledger.items().to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Delete by index; stale indices surface as `IndexOutOfRange`.
    pub fn delete_entry(&self, session_id: SessionId, index: usize) -> DomainResult<LineItem> {
        let ledger = self
            .sessions
            .get(session_id)
            .ok_or(DomainError::IndexOutOfRange { index, len: 0 })?;
        let mut ledger = ledger.lock().unwrap();
        let removed = ledger.delete(index)?;
        tracing::info!(
            session_id = %session_id,
            index,
            emissions_kg = removed.emissions,
            "line item deleted"
        );
        Ok(removed)
    }

    /// All aggregation queries over the session's ledger, in one lock hold.
    pub fn summary(&self, session_id: SessionId) -> LedgerSummary {
        match self.sessions.get(session_id) {
            Some(ledger) => {
                let ledger = ledger.lock().unwrap();
                Self::summarize(&ledger)
            }
            None => Self::summarize(&LineItemLedger::new()),
        }
    }

    fn summarize(ledger: &LineItemLedger) -> LedgerSummary {
        let grand_total = ledger.grand_total();
        LedgerSummary {
            by_scope: Scope::ALL
                .iter()
                .map(|s| (*s, ledger.total_by_scope(*s)))
                .collect(),
            by_category: ledger.total_by_category(),
            grand_total,
            trees_needed_per_year: trees_needed_per_year(grand_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> AppServices {
        AppServices::new(EmissionFactorTable::embedded().unwrap())
    }

    fn diesel_entry(quantity: f64) -> AddEntry {
        AddEntry {
            scope: Scope::Scope1,
            category: Some("Stationary Combustion".to_string()),
            activity_type: "Diesel (litres)".to_string(),
            quantity,
            renewable_kwh: 0.0,
        }
    }

    #[test]
    fn sessions_are_isolated() {
        let services = services();
        let a = SessionId::new();
        let b = SessionId::new();

        services.add_entry(a, diesel_entry(10.0)).unwrap();

        assert_eq!(services.list_entries(a).len(), 1);
        assert!(services.list_entries(b).is_empty());
        assert_eq!(services.summary(b).grand_total, 0.0);
    }

    #[test]
    fn renewable_offset_is_computed_from_the_grid_factor() {
        let services = services();
        let session = SessionId::new();

        let (index, item) = services
            .add_entry(
                session,
                AddEntry {
                    scope: Scope::Scope2,
                    category: None,
                    activity_type: "Electricity (kWh)".to_string(),
                    quantity: 100.0,
                    // 10 kWh renewable at 0.82 → 8.2 kg offset.
                    renewable_kwh: 10.0,
                },
            )
            .unwrap();

        assert_eq!(index, 0);
        assert!((item.emissions - (100.0 * 0.82 - 10.0 * 0.82)).abs() < 1e-9);
    }

    #[test]
    fn renewable_kwh_outside_scope_2_is_rejected() {
        let services = services();
        let mut entry = diesel_entry(10.0);
        entry.renewable_kwh = 5.0;

        let err = services.add_entry(SessionId::new(), entry).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn unknown_activity_is_a_configuration_error() {
        let services = services();
        let mut entry = diesel_entry(10.0);
        entry.activity_type = "Coal (kg)".to_string();

        let err = services.add_entry(SessionId::new(), entry).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn summary_ties_out_with_the_worked_example() {
        let services = services();
        let session = SessionId::new();

        services.add_entry(session, diesel_entry(10.0)).unwrap();
        services
            .add_entry(
                session,
                AddEntry {
                    scope: Scope::Scope2,
                    category: None,
                    activity_type: "Electricity (kWh)".to_string(),
                    quantity: 100.0,
                    renewable_kwh: 0.0,
                },
            )
            .unwrap();

        let summary = services.summary(session);
        assert!((summary.grand_total - (26.8 + 82.0)).abs() < 1e-9);
        let scope_totals: f64 = summary.by_scope.iter().map(|(_, t)| t).sum();
        assert!((scope_totals - summary.grand_total).abs() < 1e-9);
        assert_eq!(summary.trees_needed_per_year, 5); // ceil(108.8 / 25)
    }

    #[test]
    fn reads_do_not_register_a_ledger() {
        let services = services();
        let probe = SessionId::new();

        assert!(services.list_entries(probe).is_empty());
        assert_eq!(services.summary(probe).grand_total, 0.0);
        assert_eq!(
            services.delete_entry(probe, 0).unwrap_err(),
            DomainError::IndexOutOfRange { index: 0, len: 0 }
        );
        assert!(services.sessions.ledgers.read().unwrap().is_empty());

        // Only a recorded entry registers the session.
        services.add_entry(probe, diesel_entry(1.0)).unwrap();
        assert_eq!(services.sessions.ledgers.read().unwrap().len(), 1);
    }

    #[test]
    fn delete_with_stale_index_leaves_the_ledger_unchanged() {
        let services = services();
        let session = SessionId::new();
        services.add_entry(session, diesel_entry(1.0)).unwrap();

        let err = services.delete_entry(session, 3).unwrap_err();
        assert_eq!(err, DomainError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(services.list_entries(session).len(), 1);
    }
}
