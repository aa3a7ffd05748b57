//! # esg-benchmark — Dashboard/Benchmark Aggregator
//!
//! Positions a company's composite score within its sector peer group.
//!
//! - `percentile = round(100 × (below + 0.5 × equal) / n)` where `n` is the
//!   number of peers and `below`/`equal` count peers strictly below and
//!   equal to the company's composite.
//! - `rank = 1 + peers strictly above`.
//!
//! Every result states where the peer figures come from; illustrative
//! figures carry `illustrative = true`. When the sector is unknown or has
//! fewer peers than [`BenchmarkConfig::min_peers`], the outcome is
//! [`BenchmarkOutcome::InsufficientPeerData`]. A rank is never invented.

pub mod peers;

use serde::{Deserialize, Serialize};

use esg_scoring::EsgScoreSummary;

pub use peers::{sector_key, PeerDataSource, PeerGroup, PeerTable, PeerTableError};

/// Benchmark tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Minimum peer count for a ranking.
    pub min_peers: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self { min_peers: 5 }
    }
}

/// Where a composite sits relative to its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// At or above the top-quartile threshold.
    Leader,
    /// At or above the sector mean.
    AboveAverage,
    /// Below the mean, at or above the bottom-quartile threshold.
    BelowAverage,
    /// Below the bottom-quartile threshold.
    Laggard,
}

/// Sector statistics and the company's gaps to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeAnalysis {
    /// Mean peer composite, one decimal.
    pub sector_mean: f64,
    /// Median peer composite.
    pub sector_median: f64,
    /// 75th-percentile peer composite.
    pub top_quartile_threshold: f64,
    /// 25th-percentile peer composite.
    pub bottom_quartile_threshold: f64,
    /// Company composite minus the sector mean.
    pub gap_to_mean: f64,
    /// Company composite minus the top-quartile threshold.
    pub gap_to_top_quartile: f64,
    /// Position label.
    pub position: Position,
}

/// A ranking against a sufficient peer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Sector as named in the peer table.
    pub sector: String,
    /// Company composite that was ranked.
    pub composite: u8,
    /// Percentile, 0–100.
    pub percentile: u8,
    /// 1-based rank among peers plus the company.
    pub rank: usize,
    /// Number of peers.
    pub peer_count: usize,
    /// Provenance of the peer figures.
    pub data_source: PeerDataSource,
    /// `true` when the peer figures are illustrative.
    pub illustrative: bool,
    /// Sector statistics.
    pub comparative_analysis: ComparativeAnalysis,
}

/// Outcome of a benchmark request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BenchmarkOutcome {
    /// Enough peers; the company was ranked.
    Ranked(BenchmarkResult),
    /// The sector is unknown or has too few peers.
    InsufficientPeerData {
        /// Requested sector.
        sector: String,
        /// Peers available (0 for an unknown sector).
        peers_available: usize,
        /// Peers required.
        min_required: usize,
        /// Explanation.
        reason: String,
    },
}

impl BenchmarkOutcome {
    /// The ranking, if one was produced.
    pub fn ranked(&self) -> Option<&BenchmarkResult> {
        match self {
            Self::Ranked(result) => Some(result),
            Self::InsufficientPeerData { .. } => None,
        }
    }

    /// The percentile, if ranked.
    pub fn percentile(&self) -> Option<u8> {
        self.ranked().map(|r| r.percentile)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Linearly interpolated quantile of sorted values. `q` in `[0, 1]`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

/// Percentile and rank of `composite` among `peers`.
///
/// Returns `None` for an empty peer list.
pub fn percentile_rank(composite: u8, peers: &[u8]) -> Option<(u8, usize)> {
    if peers.is_empty() {
        return None;
    }
    let below = peers.iter().filter(|p| **p < composite).count();
    let equal = peers.iter().filter(|p| **p == composite).count();
    let above = peers.len() - below - equal;
    let percentile = esg_core::clamp_score(
        100.0 * (below as f64 + 0.5 * equal as f64) / peers.len() as f64,
    );
    Some((percentile, above + 1))
}

/// Sector statistics for `composite` against `peers`.
pub fn comparative_analysis(composite: u8, peers: &[u8]) -> ComparativeAnalysis {
    let mut sorted: Vec<f64> = peers.iter().map(|p| f64::from(*p)).collect();
    sorted.sort_by(f64::total_cmp);
    let mean = if sorted.is_empty() {
        0.0
    } else {
        sorted.iter().sum::<f64>() / sorted.len() as f64
    };
    let median = quantile(&sorted, 0.5);
    let top = quantile(&sorted, 0.75);
    let bottom = quantile(&sorted, 0.25);
    let value = f64::from(composite);
    let position = if value >= top {
        Position::Leader
    } else if value >= mean {
        Position::AboveAverage
    } else if value >= bottom {
        Position::BelowAverage
    } else {
        Position::Laggard
    };
    ComparativeAnalysis {
        sector_mean: round1(mean),
        sector_median: round1(median),
        top_quartile_threshold: round1(top),
        bottom_quartile_threshold: round1(bottom),
        gap_to_mean: round1(value - mean),
        gap_to_top_quartile: round1(value - top),
        position,
    }
}

/// Benchmark a score summary against a sector's peer group.
pub fn benchmark(
    summary: &EsgScoreSummary,
    sector: &str,
    table: &PeerTable,
    config: &BenchmarkConfig,
) -> BenchmarkOutcome {
    let Some(group) = table.group(sector) else {
        tracing::info!(sector, "no peer group for sector");
        return BenchmarkOutcome::InsufficientPeerData {
            sector: sector.to_string(),
            peers_available: 0,
            min_required: config.min_peers,
            reason: format!("no peer group is available for sector {sector:?}"),
        };
    };

    let peers = &group.composites;
    let ranked = percentile_rank(summary.composite, peers)
        .filter(|_| peers.len() >= config.min_peers);
    let Some((percentile, rank)) = ranked else {
        tracing::info!(
            sector = %group.sector,
            peers = peers.len(),
            min_peers = config.min_peers,
            "peer group too small to rank"
        );
        return BenchmarkOutcome::InsufficientPeerData {
            sector: group.sector.clone(),
            peers_available: peers.len(),
            min_required: config.min_peers,
            reason: format!(
                "{} peers available, at least {} required for a ranking",
                peers.len(),
                config.min_peers
            ),
        };
    };

    BenchmarkOutcome::Ranked(BenchmarkResult {
        sector: group.sector.clone(),
        composite: summary.composite,
        percentile,
        rank,
        peer_count: peers.len(),
        data_source: group.source,
        illustrative: group.source == PeerDataSource::Illustrative,
        comparative_analysis: comparative_analysis(summary.composite, peers),
    })
}
