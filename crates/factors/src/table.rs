//! Emission-factor table: data model, loading, and keyed lookup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use carbonledger_core::{DomainError, DomainResult, Scope};

/// The Scope-2 key consulted by the renewable-offset lookup.
///
/// This is the single place where a missing factor silently defaults to
/// zero: the renewable-electricity subtraction then subtracts nothing.
/// Every other missing key fails with [`DomainError::Configuration`].
pub const RENEWABLE_FACTOR_KEY: &str = "Electricity (kWh)";

/// Factor data for one scope (kg CO₂e per unit quantity).
///
/// Structure varies by scope: Scope 1, Scope 3, and the individual table
/// nest category → activity → factor; Scope 2 is flat activity → factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeFactors {
    Nested(BTreeMap<String, BTreeMap<String, f64>>),
    Flat(BTreeMap<String, f64>),
}

impl ScopeFactors {
    fn lookup(&self, scope: Scope, category: Option<&str>, activity: &str) -> DomainResult<f64> {
        match self {
            ScopeFactors::Nested(categories) => {
                let category = category.ok_or_else(|| {
                    DomainError::configuration(format!("{scope}: category is required"))
                })?;
                let activities = categories.get(category).ok_or_else(|| {
                    DomainError::configuration(format!("{scope}: unknown category {category:?}"))
                })?;
                activities.get(activity).copied().ok_or_else(|| {
                    DomainError::configuration(format!(
                        "{scope}/{category}: unknown activity {activity:?}"
                    ))
                })
            }
            // Flat tables ignore a supplied category (Scope 2 submissions
            // may carry an empty one).
            ScopeFactors::Flat(activities) => {
                activities.get(activity).copied().ok_or_else(|| {
                    DomainError::configuration(format!("{scope}: unknown activity {activity:?}"))
                })
            }
        }
    }

    fn validate(&self, scope: Scope) -> DomainResult<()> {
        let check = |activity: &str, factor: f64| -> DomainResult<()> {
            if !factor.is_finite() || factor < 0.0 {
                return Err(DomainError::configuration(format!(
                    "{scope}: factor for {activity:?} must be a non-negative number, got {factor}"
                )));
            }
            Ok(())
        };
        match self {
            ScopeFactors::Nested(categories) => {
                for activities in categories.values() {
                    for (activity, factor) in activities {
                        check(activity, *factor)?;
                    }
                }
            }
            ScopeFactors::Flat(activities) => {
                for (activity, factor) in activities {
                    check(activity, *factor)?;
                }
            }
        }
        Ok(())
    }
}

/// Read-only mapping from (scope, category, activity) to an emission factor.
///
/// Constructed once at startup from three JSON documents (company
/// Scope 1&2, Scope 3, individual footprint); embedded defaults ship with
/// the crate and a directory override is available for deployments with
/// their own factor data.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorTable {
    scope_1: ScopeFactors,
    scope_2: ScopeFactors,
    scope_3: ScopeFactors,
    individual: ScopeFactors,
}

#[derive(Debug, Deserialize)]
struct CompanyFactorsFile {
    scope_1: ScopeFactors,
    scope_2: ScopeFactors,
}

const DEFAULT_COMPANY_JSON: &str = include_str!("../data/emission_factors.json");
const DEFAULT_SCOPE3_JSON: &str = include_str!("../data/scope3_emission_factors.json");
const DEFAULT_INDIVIDUAL_JSON: &str = include_str!("../data/individual_emission_factors.json");

/// File names expected in a `from_dir` override.
pub const COMPANY_FILE: &str = "emission_factors.json";
pub const SCOPE3_FILE: &str = "scope3_emission_factors.json";
pub const INDIVIDUAL_FILE: &str = "individual_emission_factors.json";

impl EmissionFactorTable {
    /// Parse the three factor documents and validate every factor.
    pub fn from_json(company: &str, scope3: &str, individual: &str) -> DomainResult<Self> {
        let company: CompanyFactorsFile = serde_json::from_str(company)
            .map_err(|e| DomainError::configuration(format!("{COMPANY_FILE}: {e}")))?;
        let scope_3: ScopeFactors = serde_json::from_str(scope3)
            .map_err(|e| DomainError::configuration(format!("{SCOPE3_FILE}: {e}")))?;
        let individual: ScopeFactors = serde_json::from_str(individual)
            .map_err(|e| DomainError::configuration(format!("{INDIVIDUAL_FILE}: {e}")))?;

        let table = Self {
            scope_1: company.scope_1,
            scope_2: company.scope_2,
            scope_3,
            individual,
        };
        for scope in Scope::ALL {
            table.factors_for(scope).validate(scope)?;
        }
        Ok(table)
    }

    /// The factor data compiled into the crate.
    pub fn embedded() -> DomainResult<Self> {
        Self::from_json(
            DEFAULT_COMPANY_JSON,
            DEFAULT_SCOPE3_JSON,
            DEFAULT_INDIVIDUAL_JSON,
        )
    }

    /// Load the three JSON files from `dir` (deployment override).
    pub fn from_dir(dir: impl AsRef<Path>) -> DomainResult<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| -> DomainResult<String> {
            std::fs::read_to_string(dir.join(name)).map_err(|e| {
                DomainError::configuration(format!("{}: {e}", dir.join(name).display()))
            })
        };
        Self::from_json(
            &read(COMPANY_FILE)?,
            &read(SCOPE3_FILE)?,
            &read(INDIVIDUAL_FILE)?,
        )
    }

    /// The factor for `(scope, category, activity)`.
    ///
    /// Unknown keys are a [`DomainError::Configuration`]; the table never
    /// silently substitutes a default here.
    pub fn factor(
        &self,
        scope: Scope,
        category: Option<&str>,
        activity: &str,
    ) -> DomainResult<f64> {
        self.factors_for(scope).lookup(scope, category, activity)
    }

    /// Factor applied per kWh of renewable energy subtracted from Scope 2.
    ///
    /// Defaults to 0.0 when the grid-electricity key is absent; the offset
    /// then subtracts nothing rather than failing the whole submission.
    pub fn renewable_factor(&self) -> f64 {
        match &self.scope_2 {
            ScopeFactors::Flat(activities) => {
                activities.get(RENEWABLE_FACTOR_KEY).copied().unwrap_or(0.0)
            }
            ScopeFactors::Nested(_) => 0.0,
        }
    }

    /// Catalog view for one scope (categories/activities for pickers).
    pub fn factors_for(&self, scope: Scope) -> &ScopeFactors {
        match scope {
            Scope::Scope1 => &self.scope_1,
            Scope::Scope2 => &self.scope_2,
            Scope::Scope3 => &self.scope_3,
            Scope::Individual => &self.individual,
        }
    }
}

/// Extract the trailing parenthesised unit from an activity name,
/// e.g. `"Diesel (litres)"` → `Some("litres")`.
pub fn display_unit(activity: &str) -> Option<&str> {
    let start = activity.rfind('(')?;
    let rest = &activity[start + 1..];
    let end = rest.find(')')?;
    let unit = rest[..end].trim();
    (!unit.is_empty()).then_some(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmissionFactorTable {
        EmissionFactorTable::embedded().unwrap()
    }

    #[test]
    fn embedded_table_parses_and_validates() {
        let t = table();
        assert_eq!(
            t.factor(Scope::Scope1, Some("Stationary Combustion"), "Diesel (litres)")
                .unwrap(),
            2.68
        );
        assert_eq!(t.factor(Scope::Scope2, None, "Electricity (kWh)").unwrap(), 0.82);
    }

    #[test]
    fn nested_scopes_require_a_category() {
        let err = table()
            .factor(Scope::Scope1, None, "Diesel (litres)")
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn unknown_keys_fail_loudly() {
        let t = table();
        assert!(matches!(
            t.factor(Scope::Scope1, Some("Stationary Combustion"), "Plutonium"),
            Err(DomainError::Configuration(_))
        ));
        assert!(matches!(
            t.factor(Scope::Scope3, Some("Space Travel"), "Rocket (km)"),
            Err(DomainError::Configuration(_))
        ));
        assert!(matches!(
            t.factor(Scope::Scope2, None, "Coal (kg)"),
            Err(DomainError::Configuration(_))
        ));
    }

    #[test]
    fn flat_scope_ignores_supplied_category() {
        let t = table();
        assert_eq!(
            t.factor(Scope::Scope2, Some(""), "Electricity (kWh)").unwrap(),
            0.82
        );
    }

    #[test]
    fn renewable_factor_defaults_to_zero_when_key_absent() {
        let company = r#"{"scope_1": {"Stationary Combustion": {"Diesel (litres)": 2.68}},
                          "scope_2": {"Steam (kg)": 0.27}}"#;
        let nested = "{\"C\": {\"A\": 1.0}}";
        let t = EmissionFactorTable::from_json(company, nested, nested).unwrap();
        assert_eq!(t.renewable_factor(), 0.0);
    }

    #[test]
    fn renewable_factor_uses_grid_electricity() {
        assert_eq!(table().renewable_factor(), 0.82);
    }

    #[test]
    fn negative_factor_is_a_configuration_error() {
        let company = r#"{"scope_1": {"Stationary Combustion": {"Diesel (litres)": -1.0}},
                          "scope_2": {"Electricity (kWh)": 0.82}}"#;
        let nested = "{\"C\": {\"A\": 1.0}}";
        let err = EmissionFactorTable::from_json(company, nested, nested).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = EmissionFactorTable::from_json("{not json", "{}", "{}").unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn display_unit_parses_trailing_parens() {
        assert_eq!(display_unit("Diesel (litres)"), Some("litres"));
        assert_eq!(display_unit("Electricity (kWh)"), Some("kWh"));
        assert_eq!(display_unit("Bike"), None);
        assert_eq!(display_unit("Oddball ()"), None);
    }
}
