//! # Disclosure Frameworks
//!
//! The external ESG disclosure standards the engine maps onto. One enum,
//! exhaustive matching: the catalog must supply requirements for every
//! variant, and load fails if it does not.
//!
//! | Framework | Publisher | Scope |
//! |-----------|-----------|-------|
//! | GRI | Global Reporting Initiative | Universal and topic standards |
//! | SASB | IFRS Foundation | Industry-specific disclosure topics |
//! | TCFD | FSB Task Force | Climate governance, strategy, risk, metrics |
//! | BRSR | SEBI (India) | Business Responsibility and Sustainability Report |
//! | ICMM | International Council on Mining and Metals | Mining Principles |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// An external ESG disclosure framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Framework {
    /// GRI Standards (2021 universal standards, topic standards 300/400).
    Gri,
    /// SASB Standards.
    Sasb,
    /// TCFD Recommendations.
    Tcfd,
    /// Business Responsibility and Sustainability Report (SEBI).
    Brsr,
    /// ICMM Mining Principles performance expectations.
    Icmm,
}

/// Total number of supported frameworks.
pub const FRAMEWORK_COUNT: usize = 5;

impl Framework {
    /// All frameworks in canonical order.
    pub fn all() -> &'static [Framework] {
        &[Self::Gri, Self::Sasb, Self::Tcfd, Self::Brsr, Self::Icmm]
    }

    /// The short identifier used in requirement codes (`GRI-305-1`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gri => "GRI",
            Self::Sasb => "SASB",
            Self::Tcfd => "TCFD",
            Self::Brsr => "BRSR",
            Self::Icmm => "ICMM",
        }
    }

    /// Human-readable framework name for report headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gri => "Global Reporting Initiative Standards",
            Self::Sasb => "SASB Standards",
            Self::Tcfd => "Task Force on Climate-related Financial Disclosures",
            Self::Brsr => "Business Responsibility and Sustainability Report",
            Self::Icmm => "ICMM Mining Principles",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GRI" => Ok(Self::Gri),
            "SASB" => Ok(Self::Sasb),
            "TCFD" => Ok(Self::Tcfd),
            "BRSR" => Ok(Self::Brsr),
            "ICMM" => Ok(Self::Icmm),
            _ => Err(InputError::UnknownFramework(s.to_string())),
        }
    }
}
