//! # ESG Category — Single Source of Truth
//!
//! The three ESG pillars. Every metric, requirement, and sub-score belongs
//! to exactly one of them. Every `match` on [`Category`] is exhaustive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// An ESG pillar.
///
/// Ordering follows the canonical reporting order (E, S, G) so that
/// `BTreeMap<Category, _>` iterates the way reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Emissions, energy, water, waste, biodiversity.
    Environmental,
    /// Workforce, diversity, health and safety, community.
    Social,
    /// Board structure, ethics, audit, anti-corruption.
    Governance,
}

/// Total number of ESG categories.
pub const CATEGORY_COUNT: usize = 3;

impl Category {
    /// All categories in canonical order.
    pub fn all() -> &'static [Category] {
        &[Self::Environmental, Self::Social, Self::Governance]
    }

    /// The snake_case identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Social => "social",
            Self::Governance => "governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "environmental" | "environment" | "e" => Ok(Self::Environmental),
            "social" | "s" => Ok(Self::Social),
            "governance" | "g" => Ok(Self::Governance),
            _ => Err(InputError::UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_category_count_entries() {
        assert_eq!(Category::all().len(), CATEGORY_COUNT);
    }

    #[test]
    fn as_str_matches_serde() {
        for cat in Category::all() {
            let json = serde_json::to_string(cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
        }
    }

    #[test]
    fn from_str_accepts_aliases_and_rejects_unknown() {
        assert_eq!("Environment".parse::<Category>().unwrap(), Category::Environmental);
        assert_eq!(" SOCIAL ".parse::<Category>().unwrap(), Category::Social);
        assert_eq!("g".parse::<Category>().unwrap(), Category::Governance);
        assert!("economic".parse::<Category>().is_err());
    }

    #[test]
    fn ordering_is_reporting_order() {
        let mut cats = vec![Category::Governance, Category::Environmental, Category::Social];
        cats.sort();
        assert_eq!(cats, Category::all());
    }
}
