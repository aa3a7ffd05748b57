//! # Completeness Scoring
//!
//! For each disclosure standard, counts how many of its required and
//! recommended fields are filled. Missing and empty-string values are
//! unfilled; numeric zero is filled.
//!
//! - `score = round(100 × filled / (required + recommended))`
//! - `required_score = round(100 × required_filled / required)`
//!
//! The overall score pools filled and total counts across all standards.
//! A standard with no fields scores 100 and adds nothing to the pool.

use std::collections::BTreeMap;

use esg_catalog::DisclosureStandard;
use esg_core::MetricSet;
use serde::{Deserialize, Serialize};

/// Completeness of one disclosure standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardCompleteness {
    /// Standard name.
    pub name: String,
    /// Number of required fields.
    pub required: usize,
    /// Number of recommended fields.
    pub recommended: usize,
    /// Filled required fields.
    pub required_filled: usize,
    /// Filled recommended fields.
    pub recommended_filled: usize,
    /// Overall completeness, 0–100.
    pub score: u8,
    /// Required-field completeness, 0–100.
    pub required_score: u8,
    /// Unfilled required fields, in standard order.
    pub missing_required: Vec<String>,
}

/// Completeness across all standards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    /// Per-standard results keyed by standard id.
    pub standards: BTreeMap<String, StandardCompleteness>,
    /// Pooled completeness over every standard's fields.
    pub overall: u8,
}

impl CompletenessReport {
    /// Score of one standard.
    pub fn score(&self, standard_id: &str) -> Option<u8> {
        self.standards.get(standard_id).map(|s| s.score)
    }
}

/// Completeness of a single standard.
pub fn standard_completeness(
    set: &MetricSet,
    standard: &DisclosureStandard,
) -> StandardCompleteness {
    let missing_required: Vec<String> = standard
        .required
        .iter()
        .filter(|k| !set.is_filled(k))
        .cloned()
        .collect();
    let required_filled = standard.required.len() - missing_required.len();
    let recommended_filled = standard
        .recommended
        .iter()
        .filter(|k| set.is_filled(k))
        .count();
    let total = standard.field_count();
    StandardCompleteness {
        name: standard.name.clone(),
        required: standard.required.len(),
        recommended: standard.recommended.len(),
        required_filled,
        recommended_filled,
        score: esg_core::percentage(required_filled + recommended_filled, total).unwrap_or(100),
        required_score: esg_core::percentage(required_filled, standard.required.len())
            .unwrap_or(100),
        missing_required,
    }
}

/// Completeness of every standard plus the pooled overall figure.
pub fn completeness(set: &MetricSet, standards: &[DisclosureStandard]) -> CompletenessReport {
    let mut filled = 0usize;
    let mut total = 0usize;
    let mut per_standard = BTreeMap::new();
    for standard in standards {
        let result = standard_completeness(set, standard);
        filled += result.required_filled + result.recommended_filled;
        total += result.required + result.recommended;
        per_standard.insert(standard.id.clone(), result);
    }
    CompletenessReport {
        standards: per_standard,
        overall: esg_core::percentage(filled, total).unwrap_or(100),
    }
}
