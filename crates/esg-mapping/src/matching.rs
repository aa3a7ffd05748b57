//! # Key Matching
//!
//! Resolves a requirement term to the submitted metric key that satisfies
//! it. The default mode consults only exact keys and the catalog's
//! versioned alias table. The normalized mode adds the legacy fuzzy match:
//! both sides are lowercased with non-alphanumerics stripped, and a
//! submitted key matches when it starts with the term
//! (`femaleEmployeesPercentage` ≈ `female_employees`).

use esg_catalog::AliasTable;
use esg_core::MetricSet;
use serde::{Deserialize, Serialize};

/// How requirement terms are matched against submitted keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMatching {
    /// Term must equal a submitted key.
    Exact,
    /// Exact key, then the alias table.
    #[default]
    ExactOrAlias,
    /// Exact key, alias table, then normalized prefix match.
    Normalized,
}

/// Lowercase and strip every non-alphanumeric character.
pub fn normalize(term: &str) -> String {
    term.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Find the filled submitted key satisfying `term`, if any.
pub fn find_key<'s>(
    set: &'s MetricSet,
    term: &str,
    aliases: &AliasTable,
    mode: KeyMatching,
) -> Option<&'s str> {
    let filled = |key: &str| {
        set.iter()
            .find(|(k, r)| *k == key && r.value.is_filled())
            .map(|(k, _)| k)
    };

    if let Some(key) = filled(term) {
        return Some(key);
    }
    if mode == KeyMatching::Exact {
        return None;
    }
    if let Some(key) = aliases.aliases.get(term).and_then(|target| filled(target)) {
        return Some(key);
    }
    if mode == KeyMatching::Normalized {
        let wanted = normalize(term);
        if wanted.is_empty() {
            return None;
        }
        return set
            .iter()
            .find(|(k, r)| r.value.is_filled() && normalize(k).starts_with(&wanted))
            .map(|(k, _)| k);
    }
    None
}
