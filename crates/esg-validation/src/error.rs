//! Validation error types.
//!
//! Only input-shape problems are errors. Everything the engine finds wrong
//! with metric values is reported as a [`crate::ValidationAlert`].

use esg_core::{CoreError, InputError};
use thiserror::Error;

/// Errors that prevent a submission from being validated at all.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing or malformed company/period identifiers or metric keys.
    #[error("invalid submission: {0}")]
    Input(#[from] InputError),

    /// The submission could not be resolved into a metric set.
    #[error(transparent)]
    Core(#[from] CoreError),
}
