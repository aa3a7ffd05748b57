//! # Cross-Field Consistency Rules
//!
//! Rules that relate several metrics to each other, plus the zero-tolerance
//! escalations. Each rule reads resolved numeric values from a
//! [`MetricSet`] and skips silently when an input it needs is absent or not
//! numeric; the threshold layer reports malformed values.

use esg_core::MetricSet;

use crate::alert::{AlertType, Severity, ValidationAlert};
use crate::threshold;

/// Metrics where any positive reading is escalated to `critical`.
pub const ZERO_TOLERANCE_METRICS: [&str; 3] =
    ["fatalityRate", "corruptionIncidents", "regulatoryBreaches"];

/// Rule id for a renewable share above 100%.
pub const RULE_RENEWABLE_PERCENTAGE: &str = "cross_field.renewable_percentage";
/// Rule id for a non-zero zero-tolerance metric.
pub const RULE_ZERO_TOLERANCE: &str = "cross_field.zero_tolerance";

/// Cross-field rules that restate a per-field threshold check, paired with
/// the threshold rule they stand in for on the same field.
pub const RESTATED_THRESHOLD_RULES: [(&str, &str); 2] = [
    (RULE_RENEWABLE_PERCENTAGE, threshold::RULE_RANGE),
    (RULE_ZERO_TOLERANCE, threshold::RULE_CRITICAL),
];

fn alert(field: &str, severity: Severity, rule: &str, message: String) -> ValidationAlert {
    ValidationAlert::new(field, severity, AlertType::CrossField, rule, message)
}

fn scope3_ratio(set: &MetricSet, ratio: f64, out: &mut Vec<ValidationAlert>) {
    let Some(scope3) = set.number("scope3Emissions") else {
        return;
    };
    let scope1 = set.number("scope1Emissions");
    let scope2 = set.number("scope2Emissions");
    if scope1.is_none() && scope2.is_none() {
        return;
    }
    let direct = scope1.unwrap_or(0.0) + scope2.unwrap_or(0.0);
    if scope3 > ratio * direct {
        out.push(alert(
            "scope3Emissions",
            Severity::Warning,
            "cross_field.scope3_ratio",
            format!(
                "Scope 3 emissions ({scope3}) exceed {ratio}x combined Scope 1 and 2 \
                 emissions ({direct}); verify the boundary and methodology"
            ),
        ));
    }
}

fn renewable_percentage(set: &MetricSet, out: &mut Vec<ValidationAlert>) {
    if let Some(pct) = set
        .number("renewableEnergyPercentage")
        .filter(|p| *p > 100.0)
    {
        out.push(alert(
            "renewableEnergyPercentage",
            Severity::Error,
            RULE_RENEWABLE_PERCENTAGE,
            format!("renewable energy share cannot exceed 100% (got {pct}%)"),
        ));
    }
}

/// `part` must not exceed `whole` when both are reported.
fn part_within_whole(
    set: &MetricSet,
    part: &str,
    whole: &str,
    rule: &str,
    out: &mut Vec<ValidationAlert>,
) {
    if let (Some(p), Some(w)) = (set.number(part), set.number(whole)) {
        if p > w {
            out.push(alert(
                part,
                Severity::Error,
                rule,
                format!("{part} ({p}) cannot exceed {whole} ({w})"),
            ));
        }
    }
}

fn zero_tolerance(set: &MetricSet, out: &mut Vec<ValidationAlert>) {
    for metric in ZERO_TOLERANCE_METRICS {
        if let Some(v) = set.number(metric).filter(|v| *v > 0.0) {
            out.push(alert(
                metric,
                Severity::Critical,
                RULE_ZERO_TOLERANCE,
                format!(
                    "{metric} = {v}: zero-tolerance metric reported a non-zero value \
                     and requires immediate review"
                ),
            ));
        }
    }
}

/// Run every cross-field rule, in a fixed order.
pub fn evaluate(set: &MetricSet, scope3_ratio_limit: f64) -> Vec<ValidationAlert> {
    let mut out = Vec::new();
    scope3_ratio(set, scope3_ratio_limit, &mut out);
    renewable_percentage(set, &mut out);
    part_within_whole(
        set,
        "renewableEnergyConsumption",
        "energyConsumption",
        "cross_field.renewable_energy_total",
        &mut out,
    );
    part_within_whole(
        set,
        "wasteRecycled",
        "wasteGenerated",
        "cross_field.waste_recycled_total",
        &mut out,
    );
    part_within_whole(
        set,
        "independentDirectors",
        "boardSize",
        "cross_field.independent_directors_board",
        &mut out,
    );
    zero_tolerance(set, &mut out);
    out
}
