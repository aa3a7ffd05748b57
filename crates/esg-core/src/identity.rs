//! # Identity Newtypes
//!
//! A [`CompanyId`] and a [`ReportingYear`] together identify every derived
//! record the engine produces. Both validate at construction, so a value of
//! either type is always well formed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Earliest supported reporting year.
pub const MIN_REPORTING_YEAR: u16 = 1990;
/// Latest supported reporting year.
pub const MAX_REPORTING_YEAR: u16 = 2100;

/// Identifier of the reporting company, as assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyId(String);

impl CompanyId {
    /// Create a company identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingCompanyId`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, InputError> {
        let s = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InputError::MissingCompanyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CompanyId {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanyId> for String {
    fn from(id: CompanyId) -> Self {
        id.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fiscal reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct ReportingYear(u16);

impl ReportingYear {
    /// Create a reporting year.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidReportingYear`] outside
    /// `MIN_REPORTING_YEAR..=MAX_REPORTING_YEAR`.
    pub fn new(year: i64) -> Result<Self, InputError> {
        if year < i64::from(MIN_REPORTING_YEAR) || year > i64::from(MAX_REPORTING_YEAR) {
            return Err(InputError::InvalidReportingYear(year));
        }
        Ok(Self(year as u16))
    }

    /// The year as an integer.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// The preceding reporting year, if it is still in range.
    pub fn previous(&self) -> Option<Self> {
        Self::new(i64::from(self.0) - 1).ok()
    }
}

impl TryFrom<i64> for ReportingYear {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReportingYear> for u16 {
    fn from(year: ReportingYear) -> Self {
        year.0
    }
}

impl fmt::Display for ReportingYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_id_trims_and_rejects_blank() {
        assert_eq!(CompanyId::new("  acme ").unwrap().as_str(), "acme");
        assert_eq!(CompanyId::new("").unwrap_err(), InputError::MissingCompanyId);
        assert_eq!(CompanyId::new("   ").unwrap_err(), InputError::MissingCompanyId);
    }

    #[test]
    fn company_id_serde_validates() {
        let ok: CompanyId = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(ok.as_str(), "acme");
        assert!(serde_json::from_str::<CompanyId>("\"\"").is_err());
    }

    #[test]
    fn reporting_year_range() {
        assert!(ReportingYear::new(1989).is_err());
        assert_eq!(ReportingYear::new(1990).unwrap().value(), 1990);
        assert_eq!(ReportingYear::new(2100).unwrap().value(), 2100);
        assert!(ReportingYear::new(2101).is_err());
        assert!(ReportingYear::new(-5).is_err());
    }

    #[test]
    fn reporting_year_previous() {
        let y = ReportingYear::new(2024).unwrap();
        assert_eq!(y.previous().unwrap().value(), 2023);
        assert!(ReportingYear::new(1990).unwrap().previous().is_none());
    }

    #[test]
    fn reporting_year_serde_roundtrip() {
        let y: ReportingYear = serde_json::from_str("2024").unwrap();
        assert_eq!(serde_json::to_string(&y).unwrap(), "2024");
        assert!(serde_json::from_str::<ReportingYear>("3000").is_err());
    }
}
