//! # Threshold Evaluation
//!
//! Evaluates one metric value against its [`ThresholdRule`]. Checks run in
//! a fixed order and each can fire independently:
//!
//! 1. `error` when the value is strictly below `min` or strictly above `max`;
//! 2. `warning` when the value is strictly below the low warning level or
//!    strictly above the high (or scalar) warning level;
//! 3. `critical` when the value is at or above the critical level.
//!
//! A value that is filled but not numeric is an `error`. Unfilled values
//! (empty strings) are not evaluated.

use esg_catalog::ThresholdRule;
use esg_core::MetricValue;

use crate::alert::{AlertType, Severity, ValidationAlert};

/// Rule id for a filled value that does not parse as a number.
pub const RULE_NUMERIC: &str = "threshold.numeric";
/// Rule id for an out-of-domain value.
pub const RULE_RANGE: &str = "threshold.range";
/// Rule id for a crossed warning level.
pub const RULE_WARNING: &str = "threshold.warning";
/// Rule id for a reached critical level.
pub const RULE_CRITICAL: &str = "threshold.critical";
/// Rule id for a metric with no threshold rule.
pub const RULE_UNKNOWN: &str = "threshold.unknown_metric";

fn alert(field: &str, severity: Severity, rule: &str, message: String) -> ValidationAlert {
    ValidationAlert::new(field, severity, AlertType::Threshold, rule, message)
}

/// Evaluate `value` for `field` against `rule`.
pub fn evaluate(field: &str, value: &MetricValue, rule: &ThresholdRule) -> Vec<ValidationAlert> {
    let mut alerts = Vec::new();
    if !value.is_filled() {
        return alerts;
    }
    let Some(v) = value.as_number() else {
        alerts.push(alert(
            field,
            Severity::Error,
            RULE_NUMERIC,
            format!("{field} must be numeric, got {value:?}", value = value.to_string()),
        ));
        return alerts;
    };

    if v < rule.min {
        alerts.push(alert(
            field,
            Severity::Error,
            RULE_RANGE,
            format!("{field} = {v} is below the minimum of {}", rule.min),
        ));
    } else if v > rule.max {
        alerts.push(alert(
            field,
            Severity::Error,
            RULE_RANGE,
            format!("{field} = {v} exceeds the maximum of {}", rule.max),
        ));
    }

    if let Some(bound) = &rule.warning {
        if let Some(low) = bound.low().filter(|low| v < *low) {
            alerts.push(alert(
                field,
                Severity::Warning,
                RULE_WARNING,
                format!("{field} = {v} is below the expected level of {low}"),
            ));
        } else if let Some(high) = bound.high().filter(|high| v > *high) {
            alerts.push(alert(
                field,
                Severity::Warning,
                RULE_WARNING,
                format!("{field} = {v} is above the expected level of {high}"),
            ));
        }
    }

    if let Some(critical) = rule.critical.filter(|c| v >= *c) {
        alerts.push(alert(
            field,
            Severity::Critical,
            RULE_CRITICAL,
            format!("{field} = {v} reached the critical level of {critical}"),
        ));
    }

    alerts
}

/// Informational alert for a metric the catalog has no rule for.
pub fn unknown_metric(field: &str) -> ValidationAlert {
    alert(
        field,
        Severity::Info,
        RULE_UNKNOWN,
        format!("{field} has no threshold rule; value was not range-checked"),
    )
}
