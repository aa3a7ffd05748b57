//! # esg-scoring — Compliance Scorer
//!
//! Turns a company-period's resolved metrics into an [`EsgScoreSummary`]:
//!
//! 1. **Pillar sub-scores** ([`pillars`]): environmental, social and
//!    governance, each in `[0, 100]`.
//! 2. **Composite**: weighted sum of the pillar scores, rounded. With the
//!    default weights, `composite = round(0.4·E + 0.3·S + 0.3·G)`.
//! 3. **Rating**: first band whose minimum the composite reaches.
//! 4. **Momentum and outlook** ([`momentum`]) against the prior period's
//!    composite.
//! 5. **Recommendations** ([`recommendations`]) for weak pillars.
//! 6. **Coverage and notes**: how much data the score rests on.
//!
//! Sparse data never fails scoring. A pillar without data scores 0, the
//! summary says so in `notes`, and coverage confidence drops.

pub mod config;
pub mod momentum;
pub mod pillars;
pub mod recommendations;

use esg_core::{Category, CompanyId, MetricSet, ReportingYear};
use serde::{Deserialize, Serialize};

pub use config::{ConfigError, PillarWeights, RatingBand, ScoringConfig};
pub use momentum::{Momentum, Outlook};
pub use pillars::PillarScore;
pub use recommendations::{Priority, Recommendation};

/// Minimum number of contributing metrics for high confidence.
pub const HIGH_CONFIDENCE_METRICS: usize = 6;

/// How much data a score rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// At most one pillar has data.
    Low,
    /// Two pillars have data, or all three with few metrics.
    Medium,
    /// All three pillars have data and enough metrics contributed.
    High,
}

/// Per-pillar metric counts behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Metrics used for the environmental pillar.
    pub environmental: usize,
    /// Metrics used for the social pillar.
    pub social: usize,
    /// Metrics used for the governance pillar.
    pub governance: usize,
    /// Overall confidence.
    pub confidence: Confidence,
}

impl Coverage {
    fn from_pillars(pillars: &[PillarScore; 3]) -> Self {
        let [e, s, g] = pillars;
        let with_data = pillars.iter().filter(|p| p.has_data()).count();
        let total: usize = pillars.iter().map(|p| p.metrics_used).sum();
        let confidence = match with_data {
            3 if total >= HIGH_CONFIDENCE_METRICS => Confidence::High,
            2 | 3 => Confidence::Medium,
            _ => Confidence::Low,
        };
        Self {
            environmental: e.metrics_used,
            social: s.metrics_used,
            governance: g.metrics_used,
            confidence,
        }
    }

    /// Total contributing metrics.
    pub fn total(&self) -> usize {
        self.environmental + self.social + self.governance
    }
}

/// Composite ESG score for one company-period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgScoreSummary {
    /// Reporting company.
    pub company_id: CompanyId,
    /// Reporting period.
    pub reporting_year: ReportingYear,
    /// Environmental pillar, 0–100.
    pub environmental: u8,
    /// Social pillar, 0–100.
    pub social: u8,
    /// Governance pillar, 0–100.
    pub governance: u8,
    /// Weighted composite, 0–100.
    pub composite: u8,
    /// Letter grade.
    pub rating: String,
    /// Descriptive label of the grade.
    pub rating_label: String,
    /// Percentile within the sector peer group, when benchmarked.
    #[serde(default)]
    pub industry_percentile: Option<u8>,
    /// Prior period's composite, if known.
    #[serde(default)]
    pub previous_composite: Option<u8>,
    /// Direction against the prior period.
    pub momentum: Momentum,
    /// Outlook implied by momentum.
    pub outlook: Outlook,
    /// Data behind the score.
    pub coverage: Coverage,
    /// Sparsity statements.
    pub notes: Vec<String>,
    /// Suggested actions.
    pub recommendations: Vec<Recommendation>,
    /// Pillar detail.
    pub pillars: Vec<PillarScore>,
}

/// Score one company-period.
///
/// `previous_composite` is the prior period's composite, if the caller has
/// one. `config` must have passed [`ScoringConfig::validate`].
pub fn score(
    set: &MetricSet,
    previous_composite: Option<u8>,
    config: &ScoringConfig,
) -> EsgScoreSummary {
    let pillars = [
        pillars::environmental(set),
        pillars::social(set),
        pillars::governance(set),
    ];
    let [e, s, g] = &pillars;

    let composite = composite_score([e.score, s.score, g.score], &config.weights);

    let (rating, rating_label) = config
        .band_for(composite)
        .map(|b| (b.rating.clone(), b.label.clone()))
        .unwrap_or_default();

    let momentum = Momentum::assess(composite, previous_composite, config.momentum_tolerance);
    let coverage = Coverage::from_pillars(&pillars);

    let notes: Vec<String> = pillars
        .iter()
        .filter(|p| !p.has_data())
        .map(|p| format!("no {} indicators reported; pillar scored 0", p.pillar))
        .collect();
    if !notes.is_empty() {
        tracing::info!(
            company_id = %set.company_id(),
            reporting_year = %set.reporting_year(),
            empty_pillars = notes.len(),
            confidence = ?coverage.confidence,
            "scoring with sparse data"
        );
    }

    let recommendations = recommendations::recommend(&pillars, config);

    tracing::debug!(
        company_id = %set.company_id(),
        environmental = e.score,
        social = s.score,
        governance = g.score,
        composite,
        rating = %rating,
        "scored company"
    );

    EsgScoreSummary {
        company_id: set.company_id().clone(),
        reporting_year: set.reporting_year(),
        environmental: e.score,
        social: s.score,
        governance: g.score,
        composite,
        rating,
        rating_label,
        industry_percentile: None,
        previous_composite,
        momentum,
        outlook: momentum.outlook(),
        coverage,
        notes,
        recommendations,
        pillars: pillars.to_vec(),
    }
}

/// Weighted composite of `[environmental, social, governance]`, rounded
/// half up and clamped.
///
/// The weighted sum is snapped to nine decimals before rounding. Exact
/// halves such as `0.3·1 + 0.3·24 = 7.5` otherwise land a hair below the
/// midpoint in binary floating point and round down.
pub fn composite_score(scores: [u8; 3], weights: &PillarWeights) -> u8 {
    let weighted: f64 = Category::all()
        .iter()
        .zip(scores)
        .map(|(pillar, score)| weights.get(*pillar) * f64::from(score))
        .sum();
    esg_core::clamp_score((weighted * 1e9).round() / 1e9)
}
