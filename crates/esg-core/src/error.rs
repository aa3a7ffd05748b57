//! # Error Hierarchy
//!
//! Structured error types for the foundational layer, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Only input-shape problems are errors at this layer. Out-of-range or
//! inconsistent metric values are data-quality findings and travel as
//! validation alerts, never as `Err`.

use thiserror::Error;

/// Top-level error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A primitive failed validation at construction.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// A metric entry belongs to a different company or reporting period
    /// than the set it is being added to.
    #[error(
        "metric entry {metric_key} is scoped to {found_company}/{found_year}, \
         expected {expected_company}/{expected_year}"
    )]
    ScopeMismatch {
        /// The metric key of the offending entry.
        metric_key: String,
        /// Company the set was built for.
        expected_company: String,
        /// Period the set was built for.
        expected_year: u16,
        /// Company on the entry.
        found_company: String,
        /// Period on the entry.
        found_year: u16,
    },
}

/// Input-shape violations. Fatal to the specific call; no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Company identifier is absent, empty, or whitespace-only.
    #[error("company identifier is required")]
    MissingCompanyId,

    /// Reporting year is absent.
    #[error("reporting year is required")]
    MissingReportingYear,

    /// Reporting year is outside the supported range.
    #[error(
        "reporting year {0} is outside the supported range {min}..={max}",
        min = crate::identity::MIN_REPORTING_YEAR,
        max = crate::identity::MAX_REPORTING_YEAR
    )]
    InvalidReportingYear(i64),

    /// Metric key is empty.
    #[error("metric key must not be empty")]
    EmptyMetricKey,

    /// Category string is not one of environmental/social/governance.
    #[error("unknown ESG category: {0:?}")]
    UnknownCategory(String),

    /// Framework string does not name a supported framework.
    #[error("unknown framework: {0:?} (expected one of GRI, SASB, TCFD, BRSR, ICMM)")]
    UnknownFramework(String),
}
