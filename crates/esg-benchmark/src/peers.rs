//! # Peer Groups
//!
//! A [`PeerTable`] holds, per sector, the composite scores of comparable
//! companies and where those figures come from. Tables are loaded once at
//! startup (YAML or JSON) or taken from the built-in illustrative set,
//! which is always labelled as such.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use esg_catalog::CatalogError;

/// Peer table errors. All are startup errors.
#[derive(Debug, Error)]
pub enum PeerTableError {
    /// The file could not be read or parsed.
    #[error("failed to load peer table: {0}")]
    Load(#[from] CatalogError),

    /// Sector name is blank.
    #[error("peer group has an empty sector name")]
    EmptySector,

    /// Two groups normalize to the same sector key.
    #[error("duplicate peer group for sector {0:?}")]
    DuplicateSector(String),

    /// A peer composite is above 100.
    #[error("peer composite {score} in sector {sector:?} is outside 0..=100")]
    ScoreOutOfRange { sector: String, score: u8 },
}

/// Provenance of peer figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerDataSource {
    /// Figures from a published ratings dataset.
    Published,
    /// Placeholder figures for demonstration. Never to be presented as a
    /// real ranking.
    Illustrative,
}

/// Composite scores of one sector's peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerGroup {
    /// Sector name as displayed.
    pub sector: String,
    /// Where the figures come from.
    pub source: PeerDataSource,
    /// Free-form dataset reference (publisher, vintage).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Peer composites.
    pub composites: Vec<u8>,
}

/// Normalize a sector name into a lookup key: trimmed, lowercase, with
/// spaces and hyphens as underscores.
pub fn sector_key(sector: &str) -> String {
    sector
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PeerTableDocument {
    #[serde(default)]
    groups: Vec<PeerGroup>,
}

/// Peer groups by sector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerTable {
    groups: BTreeMap<String, PeerGroup>,
}

impl PeerTable {
    /// Build a table from groups.
    ///
    /// # Errors
    ///
    /// [`PeerTableError`] for blank or duplicate sectors and out-of-range
    /// scores.
    pub fn new(groups: Vec<PeerGroup>) -> Result<Self, PeerTableError> {
        let mut by_sector = BTreeMap::new();
        for group in groups {
            let key = sector_key(&group.sector);
            if key.is_empty() {
                return Err(PeerTableError::EmptySector);
            }
            if let Some(&score) = group.composites.iter().find(|s| **s > 100) {
                return Err(PeerTableError::ScoreOutOfRange {
                    sector: group.sector,
                    score,
                });
            }
            if by_sector.contains_key(&key) {
                return Err(PeerTableError::DuplicateSector(group.sector));
            }
            by_sector.insert(key, group);
        }
        Ok(Self { groups: by_sector })
    }

    /// Load a table from YAML or JSON.
    ///
    /// # Errors
    ///
    /// File, parse, or consistency errors.
    pub fn from_file(path: &Path) -> Result<Self, PeerTableError> {
        let doc: PeerTableDocument = esg_catalog::parser::load_typed(path)?;
        let table = Self::new(doc.groups)?;
        tracing::info!(
            path = %path.display(),
            sectors = table.groups.len(),
            "loaded peer table"
        );
        Ok(table)
    }

    /// The built-in illustrative table. Every group is marked
    /// [`PeerDataSource::Illustrative`].
    pub fn illustrative() -> Self {
        let group = |sector: &str, composites: &[u8]| PeerGroup {
            sector: sector.to_string(),
            source: PeerDataSource::Illustrative,
            reference: Some("built-in illustrative distribution".to_string()),
            composites: composites.to_vec(),
        };
        let groups = [
            group("Mining", &[42, 48, 51, 55, 58, 61, 64, 67, 72, 78]),
            group("Energy", &[38, 45, 50, 53, 57, 60, 66, 71]),
            group("Manufacturing", &[44, 49, 52, 56, 59, 63, 68, 74]),
            group("Financial Services", &[50, 55, 58, 62, 65, 69, 73, 80]),
            group("Technology", &[52, 57, 61, 64, 68, 72, 77, 83]),
        ];
        Self {
            groups: groups
                .into_iter()
                .map(|g| (sector_key(&g.sector), g))
                .collect(),
        }
    }

    /// Peer group for a sector, matched case-insensitively.
    pub fn group(&self, sector: &str) -> Option<&PeerGroup> {
        self.groups.get(&sector_key(sector))
    }

    /// Sector names, in key order.
    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.groups.values().map(|g| g.sector.as_str())
    }

    /// Number of sectors.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the table has no sectors.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
