use serde::Deserialize;
use serde_json::json;

use carbonledger_core::Scope;
use carbonledger_emissions::LineItem;
use carbonledger_factors::display_unit;

use crate::app::services::{AddEntry, LedgerSummary};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub scope: Scope,
    pub category: Option<String>,
    pub activity_type: String,
    pub quantity: f64,
    /// Renewable energy (kWh) subtracted from Scope-2 emissions.
    #[serde(default)]
    pub renewable_kwh: f64,
}

impl From<AddEntryRequest> for AddEntry {
    fn from(req: AddEntryRequest) -> Self {
        AddEntry {
            scope: req.scope,
            category: req.category,
            activity_type: req.activity_type,
            quantity: req.quantity,
            renewable_kwh: req.renewable_kwh,
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn line_item_to_json(index: usize, item: &LineItem) -> serde_json::Value {
    json!({
        "index": index,
        "scope": item.scope,
        "category": item.category,
        "activity_type": item.activity_type,
        "unit": display_unit(&item.activity_type),
        "quantity": item.quantity,
        "emissions_kg": item.emissions,
        "recorded_at": item.recorded_at,
    })
}

pub fn summary_to_json(summary: &LedgerSummary) -> serde_json::Value {
    json!({
        "by_scope": summary
            .by_scope
            .iter()
            .map(|(scope, total)| json!({ "scope": scope, "emissions_kg": total }))
            .collect::<Vec<_>>(),
        "by_category": summary
            .by_category
            .iter()
            .map(|(category, total)| json!({ "category": category, "emissions_kg": total }))
            .collect::<Vec<_>>(),
        "grand_total_kg": summary.grand_total,
        "trees_needed_per_year": summary.trees_needed_per_year,
    })
}

pub fn catalog_to_json(factors: &carbonledger_factors::EmissionFactorTable) -> serde_json::Value {
    let mut scopes = serde_json::Map::new();
    for scope in Scope::ALL {
        scopes.insert(
            scope.as_str().to_string(),
            serde_json::to_value(factors.factors_for(scope)).unwrap_or_default(),
        );
    }
    serde_json::Value::Object(scopes)
}
