//! Period-over-period momentum.

use serde::{Deserialize, Serialize};

/// Direction of the composite against the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Momentum {
    /// Composite rose by more than the tolerance.
    Improving,
    /// Composite moved within the tolerance.
    Stable,
    /// Composite fell by more than the tolerance.
    Declining,
    /// No prior period to compare against.
    Unknown,
}

/// Outlook derived from momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    /// Improving.
    Positive,
    /// Stable, or no history.
    Neutral,
    /// Declining.
    Negative,
}

impl Momentum {
    /// Compare a composite with the prior period's.
    pub fn assess(current: u8, previous: Option<u8>, tolerance: u8) -> Self {
        let Some(previous) = previous else {
            return Self::Unknown;
        };
        let change = i16::from(current) - i16::from(previous);
        let tolerance = i16::from(tolerance);
        if change > tolerance {
            Self::Improving
        } else if change < -tolerance {
            Self::Declining
        } else {
            Self::Stable
        }
    }

    /// The outlook this momentum implies. Missing history is neutral, never
    /// negative.
    pub fn outlook(&self) -> Outlook {
        match self {
            Self::Improving => Outlook::Positive,
            Self::Declining => Outlook::Negative,
            Self::Stable | Self::Unknown => Outlook::Neutral,
        }
    }
}
