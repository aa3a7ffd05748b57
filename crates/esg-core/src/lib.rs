#![deny(missing_docs)]

//! # esg-core — Foundational Types for the ESG Compliance Engine
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`CompanyId`] and
//!    [`ReportingYear`] validate at construction. A submission without a
//!    company or period never reaches the validation, mapping, or scoring
//!    stages.
//!
//! 2. **Single [`Category`] and [`Framework`] enums.** One definition each,
//!    exhaustive `match` everywhere. Adding a framework is a compile error
//!    until the catalog, mapper, and CLI handle it.
//!
//! 3. **[`MetricSet`] is the resolved view of a period.** Raw
//!    [`MetricEntry`] rows are append-only; the set applies latest-wins
//!    supersession once, so downstream stages never see stale values.
//!
//! 4. **[`CoreError`] hierarchy.** Structured errors with `thiserror`. Input
//!    shape problems are the only thing that makes an engine call fail.

pub mod category;
pub mod error;
pub mod framework;
pub mod identity;
pub mod metric;

// Re-export primary types at crate root for ergonomic imports.
pub use category::{Category, CATEGORY_COUNT};
pub use error::{CoreError, InputError};
pub use framework::{Framework, FRAMEWORK_COUNT};
pub use identity::{CompanyId, ReportingYear};
pub use metric::{Assurance, EsgSubmission, MetricEntry, MetricRecord, MetricSet, MetricValue};

/// Round a score to the nearest integer and clamp it into `[0, 100]`.
///
/// Every percentage the engine publishes goes through this function.
/// Non-finite input maps to 0.
pub fn clamp_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Percentage `part / whole × 100`, rounded and clamped.
///
/// Returns `None` when `whole` is zero so callers decide how an empty
/// denominator is reported.
pub fn percentage(part: usize, whole: usize) -> Option<u8> {
    if whole == 0 {
        return None;
    }
    Some(clamp_score(part as f64 * 100.0 / whole as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_rounds_half_away_from_zero() {
        assert_eq!(clamp_score(79.5), 80);
        assert_eq!(clamp_score(79.49), 79);
    }

    #[test]
    fn clamp_score_bounds() {
        assert_eq!(clamp_score(-3.0), 0);
        assert_eq!(clamp_score(250.0), 100);
        assert_eq!(clamp_score(f64::NAN), 0);
        assert_eq!(clamp_score(f64::INFINITY), 0);
    }

    #[test]
    fn percentage_of_empty_denominator_is_none() {
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(3, 3), Some(100));
    }
}
