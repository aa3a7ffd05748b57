//! Validation alerts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Alert severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; never affects validity.
    Info,
    /// Plausible but unusual value.
    Warning,
    /// Out-of-domain or inconsistent value. Makes the submission invalid.
    Error,
    /// Compliance-critical reading (zero-tolerance metric or critical
    /// threshold). Reported on its own channel; does not affect validity.
    Critical,
}

impl Severity {
    /// The wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule family raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Consistency rule over several fields.
    CrossField,
    /// Per-field threshold rule.
    Threshold,
}

/// A single data-quality or compliance finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationAlert {
    /// Metric key the alert is attached to.
    pub field: String,
    /// Human-readable message.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// Rule family.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Identifier of the rule that fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ValidationAlert {
    pub(crate) fn new(
        field: &str,
        severity: Severity,
        alert_type: AlertType,
        rule: &str,
        message: String,
    ) -> Self {
        Self {
            field: field.to_string(),
            message,
            severity,
            alert_type,
            rule: Some(rule.to_string()),
        }
    }
}
