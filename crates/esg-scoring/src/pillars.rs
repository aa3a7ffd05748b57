//! # Pillar Sub-Scores
//!
//! Each pillar is the mean of the indicator groups that have data. Every
//! input percentage is clamped into `[0, 100]` before averaging and every
//! pillar result is rounded and clamped.
//!
//! - **Environmental**: energy (`renewableEnergyPercentage`), waste
//!   (`wasteRecycledPercentage`), air (`emissionsReductionPercentage`,
//!   `airQualityComplianceRate`).
//! - **Social**: diversity (Shannon entropy of the workforce mix) and safety
//!   (`100 - 5 x safetyIncidents`).
//! - **Governance**: `independentDirectorsPercentage`,
//!   `femaleDirectorsPercentage`, `ethicsTrainingCompletion`,
//!   `auditCommitteeIndependence`.
//!
//! A pillar with no data scores 0.

use std::collections::BTreeMap;

use esg_core::{Category, MetricSet};
use serde::{Deserialize, Serialize};

/// Workforce count keys used for the diversity entropy.
pub const WORKFORCE_COUNT_KEYS: [&str; 3] =
    ["femaleEmployees", "maleEmployees", "otherGenderEmployees"];

/// Fallback key when only a female share is reported.
pub const FEMALE_SHARE_KEY: &str = "femaleEmployeesPercentage";

/// Safety incident count key.
pub const SAFETY_INCIDENTS_KEY: &str = "safetyIncidents";

/// Points deducted from the safety sub-score per incident.
pub const SAFETY_PENALTY_PER_INCIDENT: f64 = 5.0;

/// Entropy (in bits) is scaled by this factor before clamping to 100.
pub const ENTROPY_SCALE: f64 = 50.0;

const ENVIRONMENTAL_GROUPS: [(&str, &[&str]); 3] = [
    ("energy", &["renewableEnergyPercentage"]),
    ("waste", &["wasteRecycledPercentage"]),
    (
        "air",
        &["emissionsReductionPercentage", "airQualityComplianceRate"],
    ),
];

const GOVERNANCE_INDICATORS: [&str; 4] = [
    "independentDirectorsPercentage",
    "femaleDirectorsPercentage",
    "ethicsTrainingCompletion",
    "auditCommitteeIndependence",
];

/// Score and provenance of one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScore {
    /// Pillar.
    pub pillar: Category,
    /// Score, 0–100.
    pub score: u8,
    /// Number of submitted metrics that contributed.
    pub metrics_used: usize,
    /// Group sub-scores that contributed (`energy`, `safety`, …).
    pub components: BTreeMap<String, u8>,
}

impl PillarScore {
    /// Whether any data contributed.
    pub fn has_data(&self) -> bool {
        self.metrics_used > 0
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn percent(set: &MetricSet, key: &str) -> Option<f64> {
    set.number(key)
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 100.0))
}

struct Accumulator {
    pillar: Category,
    groups: Vec<f64>,
    metrics_used: usize,
    components: BTreeMap<String, u8>,
}

impl Accumulator {
    fn new(pillar: Category) -> Self {
        Self {
            pillar,
            groups: Vec::new(),
            metrics_used: 0,
            components: BTreeMap::new(),
        }
    }

    fn add(&mut self, name: &str, value: f64, metrics: usize) {
        self.groups.push(value);
        self.metrics_used += metrics;
        self.components
            .insert(name.to_string(), esg_core::clamp_score(value));
    }

    fn finish(self) -> PillarScore {
        let score = mean(&self.groups).map(esg_core::clamp_score).unwrap_or(0);
        PillarScore {
            pillar: self.pillar,
            score,
            metrics_used: self.metrics_used,
            components: self.components,
        }
    }
}

/// Environmental pillar: mean of the energy, waste and air group averages.
pub fn environmental(set: &MetricSet) -> PillarScore {
    let mut acc = Accumulator::new(Category::Environmental);
    for (group, keys) in ENVIRONMENTAL_GROUPS {
        let values: Vec<f64> = keys.iter().filter_map(|k| percent(set, k)).collect();
        if let Some(avg) = mean(&values) {
            acc.add(group, avg, values.len());
        }
    }
    acc.finish()
}

/// Shannon entropy `Σ −p·log2 p` of the given shares, scaled by
/// [`ENTROPY_SCALE`] and clamped to 100.
///
/// Zero shares contribute nothing. Two equal categories give 50.
pub fn diversity_entropy(shares: &[f64]) -> f64 {
    let entropy: f64 = shares
        .iter()
        .filter(|p| **p > 0.0)
        .map(|p| -p * p.log2())
        .sum();
    (entropy * ENTROPY_SCALE).clamp(0.0, 100.0)
}

/// Diversity sub-score and number of metrics used.
///
/// Uses workforce head counts when any are reported; otherwise a
/// two-way split from the female share.
pub fn diversity(set: &MetricSet) -> Option<(f64, usize)> {
    let counts: Vec<f64> = WORKFORCE_COUNT_KEYS
        .iter()
        .filter_map(|k| set.number(k))
        .filter(|c| c.is_finite() && *c >= 0.0)
        .collect();
    let total: f64 = counts.iter().sum();
    if total > 0.0 {
        let shares: Vec<f64> = counts.iter().map(|c| c / total).collect();
        return Some((diversity_entropy(&shares), counts.len()));
    }
    let female = percent(set, FEMALE_SHARE_KEY)? / 100.0;
    Some((diversity_entropy(&[female, 1.0 - female]), 1))
}

/// Safety sub-score: `max(100 − 5 × incidents, 0)`.
pub fn safety_score(incidents: f64) -> f64 {
    (100.0 - SAFETY_PENALTY_PER_INCIDENT * incidents.max(0.0)).max(0.0)
}

/// Social pillar: mean of the diversity and safety sub-scores present.
pub fn social(set: &MetricSet) -> PillarScore {
    let mut acc = Accumulator::new(Category::Social);
    if let Some((score, used)) = diversity(set) {
        acc.add("diversity", score, used);
    }
    if let Some(incidents) = set.number(SAFETY_INCIDENTS_KEY).filter(|v| v.is_finite()) {
        acc.add("safety", safety_score(incidents), 1);
    }
    acc.finish()
}

/// Governance pillar: mean of the ethics and audit indicators present.
pub fn governance(set: &MetricSet) -> PillarScore {
    let mut acc = Accumulator::new(Category::Governance);
    for key in GOVERNANCE_INDICATORS {
        if let Some(value) = percent(set, key) {
            acc.add(key, value, 1);
        }
    }
    acc.finish()
}
