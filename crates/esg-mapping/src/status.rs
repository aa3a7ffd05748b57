//! # Requirement Status
//!
//! [`ComplianceStatus`] is the per-requirement outcome of the mapper.
//! [`VerificationStatus`] summarizes the external assurance behind the
//! metrics that satisfied a requirement.

use std::fmt;

use esg_core::Assurance;
use serde::{Deserialize, Serialize};

/// Outcome of mapping submitted metrics onto one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// Every required key is present with a non-empty value.
    Compliant,
    /// Some, but not all, required keys are present.
    Partial,
    /// No required key is present although the company reported in a
    /// prior period.
    NonCompliant,
    /// Every required key is present but at least one value failed
    /// validation.
    InProgress,
    /// No required key is present and there is no prior-period data.
    NotStarted,
}

impl ComplianceStatus {
    /// The wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::Partial => "PARTIAL",
            Self::NonCompliant => "NON_COMPLIANT",
            Self::InProgress => "IN_PROGRESS",
            Self::NotStarted => "NOT_STARTED",
        }
    }

    /// Whether the requirement counts as met.
    pub fn is_met(&self) -> bool {
        matches!(self, Self::Compliant)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assurance behind a requirement's contributing metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No contributing metric, or at least one is self-reported.
    Unverified,
    /// Weakest contributing metric has limited assurance.
    LimitedAssurance,
    /// Every contributing metric has reasonable assurance.
    ReasonableAssurance,
}

impl VerificationStatus {
    /// Verification status from the weakest assurance level among the
    /// contributing metrics. No contributors means unverified.
    pub fn from_weakest(levels: impl IntoIterator<Item = Assurance>) -> Self {
        match levels.into_iter().min() {
            None | Some(Assurance::None) => Self::Unverified,
            Some(Assurance::Limited) => Self::LimitedAssurance,
            Some(Assurance::Reasonable) => Self::ReasonableAssurance,
        }
    }
}
