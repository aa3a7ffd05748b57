//! # Scoring Configuration
//!
//! Pillar weights, rating bands, and the recommendation and momentum
//! tunables. Defaults reproduce the published methodology: weights
//! 0.4/0.3/0.3 and bands ≥80 AAA, ≥60 AA, ≥40 A, otherwise B.
//!
//! A configuration is validated once, when the engine starts. Scoring
//! functions assume a valid configuration.

use esg_core::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance when checking that weights sum to one.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Configuration errors. All are startup errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A weight is negative or not finite.
    #[error("weight for {pillar} must be a finite non-negative number, got {value}")]
    InvalidWeight { pillar: Category, value: f64 },

    /// Weights do not sum to one.
    #[error("pillar weights must sum to 1.0, got {sum}")]
    WeightsDoNotSumToOne { sum: f64 },

    /// No rating bands configured.
    #[error("at least one rating band is required")]
    NoRatingBands,

    /// Band minimums are not strictly descending.
    #[error("rating band {index} ({rating}) must have a lower minimum than the band before it")]
    BandsNotDescending { index: usize, rating: String },

    /// The last band does not start at zero, so some scores would be unrated.
    #[error("lowest rating band must start at 0, got {min_score}")]
    LowestBandNotZero { min_score: u8 },

    /// A band minimum or threshold is above 100.
    #[error("{name} must be within 0..=100, got {value}")]
    OutOfRange { name: String, value: u8 },

    /// High-priority threshold above the recommendation threshold.
    #[error("high-priority threshold {high} exceeds recommendation threshold {recommend}")]
    PriorityAboveRecommendation { high: u8, recommend: u8 },
}

/// Pillar weights for the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    /// Environmental weight.
    pub environmental: f64,
    /// Social weight.
    pub social: f64,
    /// Governance weight.
    pub governance: f64,
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            environmental: 0.4,
            social: 0.3,
            governance: 0.3,
        }
    }
}

impl PillarWeights {
    /// Weight of one pillar.
    pub fn get(&self, pillar: Category) -> f64 {
        match pillar {
            Category::Environmental => self.environmental,
            Category::Social => self.social,
            Category::Governance => self.governance,
        }
    }

    /// Check that each weight is finite and non-negative and that the
    /// weights sum to one.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidWeight`] or [`ConfigError::WeightsDoNotSumToOne`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &pillar in Category::all() {
            let value = self.get(pillar);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { pillar, value });
            }
        }
        let sum = self.environmental + self.social + self.governance;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightsDoNotSumToOne { sum });
        }
        Ok(())
    }
}

/// One rating band: composites at or above `min_score` receive `rating`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBand {
    /// Inclusive lower bound.
    pub min_score: u8,
    /// Letter grade (`AAA`).
    pub rating: String,
    /// Descriptive label (`Excellent`).
    pub label: String,
}

impl RatingBand {
    fn new(min_score: u8, rating: &str, label: &str) -> Self {
        Self {
            min_score,
            rating: rating.to_string(),
            label: label.to_string(),
        }
    }
}

/// The default band table.
pub fn default_bands() -> Vec<RatingBand> {
    vec![
        RatingBand::new(80, "AAA", "Excellent"),
        RatingBand::new(60, "AA", "Good"),
        RatingBand::new(40, "A", "Fair"),
        RatingBand::new(0, "B", "Needs Improvement"),
    ]
}

/// All scoring tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Composite weights.
    pub weights: PillarWeights,
    /// Rating bands, highest first.
    pub bands: Vec<RatingBand>,
    /// Pillars scoring below this receive a recommendation.
    pub recommendation_threshold: u8,
    /// Recommendations for pillars below this are high priority.
    pub high_priority_threshold: u8,
    /// Composite changes within ± this many points count as stable.
    pub momentum_tolerance: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: PillarWeights::default(),
            bands: default_bands(),
            recommendation_threshold: 70,
            high_priority_threshold: 40,
            momentum_tolerance: 2,
        }
    }
}

impl ScoringConfig {
    /// Validate the whole configuration.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;

        let Some(last) = self.bands.last() else {
            return Err(ConfigError::NoRatingBands);
        };
        for (index, band) in self.bands.iter().enumerate() {
            if band.min_score > 100 {
                return Err(ConfigError::OutOfRange {
                    name: format!("rating band {}", band.rating),
                    value: band.min_score,
                });
            }
            if index > 0 && band.min_score >= self.bands[index - 1].min_score {
                return Err(ConfigError::BandsNotDescending {
                    index,
                    rating: band.rating.clone(),
                });
            }
        }
        if last.min_score != 0 {
            return Err(ConfigError::LowestBandNotZero {
                min_score: last.min_score,
            });
        }

        for (name, value) in [
            ("recommendation_threshold", self.recommendation_threshold),
            ("high_priority_threshold", self.high_priority_threshold),
            ("momentum_tolerance", self.momentum_tolerance),
        ] {
            if value > 100 {
                return Err(ConfigError::OutOfRange {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if self.high_priority_threshold > self.recommendation_threshold {
            return Err(ConfigError::PriorityAboveRecommendation {
                high: self.high_priority_threshold,
                recommend: self.recommendation_threshold,
            });
        }
        Ok(())
    }

    /// The band a composite falls into.
    ///
    /// Returns `None` only for an unvalidated configuration whose lowest
    /// band starts above the score.
    pub fn band_for(&self, composite: u8) -> Option<&RatingBand> {
        self.bands.iter().find(|b| composite >= b.min_score)
    }
}
