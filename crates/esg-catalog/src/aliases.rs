//! Versioned alias table from requirement vocabulary to metric keys.
//!
//! Frameworks describe data points in their own terms (`female_employees`).
//! The alias table maps each such term onto the metric key the data-entry
//! layer uses (`femaleEmployeesPercentage`). It is explicit and versioned so
//! a change in matching behavior is always a catalog change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Version of the built-in alias table.
pub const BUILTIN_ALIAS_VERSION: &str = "2024.1";

/// Term → metric key mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    /// Table version, recorded in reports.
    pub version: String,
    /// Requirement term → metric key.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        let aliases = [
            ("female_employees", "femaleEmployeesPercentage"),
            ("independent_directors", "independentDirectorsPercentage"),
            ("renewable_energy", "renewableEnergyPercentage"),
            ("waste_recycled", "wasteRecycledPercentage"),
        ]
        .into_iter()
        .map(|(t, k)| (t.to_string(), k.to_string()))
        .collect();
        Self {
            version: BUILTIN_ALIAS_VERSION.to_string(),
            aliases,
        }
    }

    /// Resolve a requirement term to its metric key. Terms without an alias
    /// are already metric keys.
    pub fn resolve<'a>(&'a self, term: &'a str) -> &'a str {
        self.aliases.get(term).map(String::as_str).unwrap_or(term)
    }

    /// Check that every alias is non-empty and not self-referential.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidAlias`].
    pub fn check(&self) -> CatalogResult<()> {
        for (term, key) in &self.aliases {
            let invalid = |detail: &str| CatalogError::InvalidAlias {
                term: term.clone(),
                detail: detail.to_string(),
            };
            if term.trim().is_empty() {
                return Err(invalid("term is empty"));
            }
            if key.trim().is_empty() {
                return Err(invalid("target metric key is empty"));
            }
            if term == key {
                return Err(invalid("alias maps to itself"));
            }
            if self.aliases.contains_key(key) {
                return Err(invalid("target is itself an alias"));
            }
        }
        Ok(())
    }
}
