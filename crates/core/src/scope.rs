//! GHG accounting scopes.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// GHG accounting scope a line item belongs to.
///
/// `Scope1` covers direct emissions from owned or controlled sources,
/// `Scope2` indirect emissions from purchased energy, `Scope3` all other
/// value-chain emissions. `Individual` is the personal-footprint table.
// serde's snake_case conversion yields "scope1" (no underscore before a
// trailing digit), so the wire keys are pinned per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "scope_1")]
    Scope1,
    #[serde(rename = "scope_2")]
    Scope2,
    #[serde(rename = "scope_3")]
    Scope3,
    #[serde(rename = "individual")]
    Individual,
}

impl Scope {
    pub const ALL: [Scope; 4] = [Scope::Scope1, Scope::Scope2, Scope::Scope3, Scope::Individual];

    /// Stable wire/lookup key, matching the factor-table JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Scope1 => "scope_1",
            Scope::Scope2 => "scope_2",
            Scope::Scope3 => "scope_3",
            Scope::Individual => "individual",
        }
    }
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scope_1" => Ok(Scope::Scope1),
            "scope_2" => Ok(Scope::Scope2),
            "scope_3" => Ok(Scope::Scope3),
            "individual" => Ok(Scope::Individual),
            other => Err(DomainError::invalid_id(format!("unknown scope: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_round_trips_through_wire_key() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
        }
    }

    #[test]
    fn unknown_scope_key_is_rejected() {
        assert!(matches!(
            "scope_4".parse::<Scope>(),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn serde_wire_keys_match_as_str() {
        for scope in Scope::ALL {
            let json = serde_json::to_string(&scope).unwrap();
            assert_eq!(json, format!("\"{}\"", scope.as_str()));
            let back: Scope = serde_json::from_str(&json).unwrap();
            assert_eq!(back, scope);
        }
    }

    #[test]
    fn serde_accepts_numbered_scope_keys() {
        let s: Scope = serde_json::from_str("\"scope_1\"").unwrap();
        assert_eq!(s, Scope::Scope1);
        let s: Scope = serde_json::from_str("\"individual\"").unwrap();
        assert_eq!(s, Scope::Individual);
        assert!(serde_json::from_str::<Scope>("\"scope1\"").is_err());
    }
}
