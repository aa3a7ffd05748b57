//! # esg-validation — Validation Engine
//!
//! Validates an ESG submission against the reference catalog and produces
//! a [`ValidationReport`]:
//!
//! - **Cross-field rules** ([`cross_field`]): consistency between metrics
//!   and zero-tolerance escalation.
//! - **Threshold rules** ([`threshold`]): per-metric domain, warning and
//!   critical levels.
//! - **Completeness** ([`completeness`]): filled/required counts per
//!   disclosure standard.
//!
//! Validation is a pure function of the submission, the catalog and the
//! [`ValidationConfig`]. Data-quality findings never fail the call; only a
//! submission without a company or reporting year is rejected.
//!
//! ## Alert de-duplication
//!
//! Distinct rules firing on one field are all reported. Some cross-field
//! rules restate a threshold check (a renewable share above 100% is also
//! out of range; a non-zero fatality rate may also reach a critical level).
//! Those pairs count as one finding. Cross-field rules run before threshold
//! rules, so the cross-field message is the one reported.

pub mod alert;
pub mod completeness;
pub mod cross_field;
pub mod error;
pub mod threshold;

use std::collections::{BTreeSet, HashSet};

use esg_catalog::Catalog;
use esg_core::{CoreError, EsgSubmission, MetricSet};
use serde::{Deserialize, Serialize};

pub use alert::{AlertType, Severity, ValidationAlert};
pub use completeness::{CompletenessReport, StandardCompleteness};
pub use error::ValidationError;

/// Standard whose completeness is surfaced in the summary.
pub const HEADLINE_STANDARD: &str = "GRI";

/// Tunables for the validation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Emit an `info` alert for filled metrics without a threshold rule.
    pub report_unknown_metrics: bool,
    /// Scope 3 is flagged when it exceeds this multiple of Scope 1 + 2.
    pub scope3_ratio: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            report_unknown_metrics: false,
            scope3_ratio: 10.0,
        }
    }
}

/// Headline counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Number of error alerts.
    pub total_errors: usize,
    /// Number of warning alerts.
    pub total_warnings: usize,
    /// Number of critical alerts.
    pub total_critical: usize,
    /// Completeness of the GRI standard, or the pooled figure if the
    /// catalog has no GRI standard.
    pub gri_completeness_score: u8,
    /// `true` when there are no errors. Critical alerts do not count.
    pub is_valid: bool,
}

/// Result of validating one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Error alerts.
    pub errors: Vec<ValidationAlert>,
    /// Warning alerts.
    pub warnings: Vec<ValidationAlert>,
    /// Compliance-critical alerts.
    pub critical: Vec<ValidationAlert>,
    /// Every alert, including info, in evaluation order.
    pub alerts: Vec<ValidationAlert>,
    /// Completeness per standard.
    pub completeness: CompletenessReport,
    /// Headline counters.
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Whether the submission has no error alerts.
    pub fn is_valid(&self) -> bool {
        self.summary.is_valid
    }

    /// Whether any critical alert was raised.
    pub fn has_critical(&self) -> bool {
        !self.critical.is_empty()
    }

    /// Metric keys that carry at least one error alert.
    pub fn fields_with_errors(&self) -> BTreeSet<&str> {
        self.errors.iter().map(|a| a.field.as_str()).collect()
    }
}

/// Validate a boundary submission.
///
/// # Errors
///
/// [`ValidationError`] when the submission has no company, no reporting
/// year, an out-of-range year, or an empty metric key.
pub fn validate(
    submission: &EsgSubmission,
    catalog: &Catalog,
    config: &ValidationConfig,
) -> Result<ValidationReport, ValidationError> {
    let set = submission.to_metric_set().map_err(|e| match e {
        CoreError::Input(input) => ValidationError::Input(input),
        other => ValidationError::Core(other),
    })?;
    Ok(validate_set(&set, catalog, config))
}

/// The rule an alert counts as for de-duplication.
fn finding_rule(alert: &ValidationAlert) -> String {
    let rule = alert.rule.as_deref().unwrap_or_default();
    cross_field::RESTATED_THRESHOLD_RULES
        .iter()
        .find(|(restating, _)| *restating == rule)
        .map_or(rule, |(_, restated)| *restated)
        .to_string()
}

/// Validate an already-resolved metric set.
pub fn validate_set(
    set: &MetricSet,
    catalog: &Catalog,
    config: &ValidationConfig,
) -> ValidationReport {
    let mut candidates = cross_field::evaluate(set, config.scope3_ratio);
    for (key, record) in set.iter() {
        match catalog.threshold(key) {
            Some(rule) => candidates.extend(threshold::evaluate(key, &record.value, rule)),
            None if config.report_unknown_metrics && record.value.is_filled() => {
                candidates.push(threshold::unknown_metric(key));
            }
            None => {}
        }
    }

    let mut seen: HashSet<(String, Severity, String)> = HashSet::new();
    let alerts: Vec<ValidationAlert> = candidates
        .into_iter()
        .filter(|a| seen.insert((a.field.clone(), a.severity, finding_rule(a))))
        .collect();

    let by_severity = |severity: Severity| -> Vec<ValidationAlert> {
        alerts
            .iter()
            .filter(|a| a.severity == severity)
            .cloned()
            .collect()
    };
    let errors = by_severity(Severity::Error);
    let warnings = by_severity(Severity::Warning);
    let critical = by_severity(Severity::Critical);

    for alert in &alerts {
        match alert.severity {
            Severity::Critical => tracing::warn!(
                company_id = %set.company_id(),
                reporting_year = %set.reporting_year(),
                field = %alert.field,
                rule = alert.rule.as_deref().unwrap_or_default(),
                "critical compliance alert"
            ),
            Severity::Error | Severity::Warning => tracing::debug!(
                field = %alert.field,
                severity = %alert.severity,
                rule = alert.rule.as_deref().unwrap_or_default(),
                "validation rule fired"
            ),
            Severity::Info => {}
        }
    }

    let completeness = completeness::completeness(set, catalog.standards());
    let summary = ValidationSummary {
        total_errors: errors.len(),
        total_warnings: warnings.len(),
        total_critical: critical.len(),
        gri_completeness_score: completeness
            .score(HEADLINE_STANDARD)
            .unwrap_or(completeness.overall),
        is_valid: errors.is_empty(),
    };

    ValidationReport {
        errors,
        warnings,
        critical,
        alerts,
        completeness,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::{Category, InputError};
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn base() -> EsgSubmission {
        EsgSubmission::new("acme", 2024)
    }

    fn run(submission: &EsgSubmission) -> ValidationReport {
        validate(submission, &catalog(), &ValidationConfig::default()).unwrap()
    }

    #[test]
    fn clean_submission_is_valid() {
        let report = run(&base()
            .with_metric(Category::Environmental, "scope1Emissions", 1200.0)
            .with_metric(Category::Social, "employeeTurnoverRate", 12.0));
        assert!(report.is_valid());
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn renewable_string_120_yields_exactly_one_error() {
        let report = run(&base().with_metric(
            Category::Environmental,
            "renewableEnergyPercentage",
            "120",
        ));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].alert_type, AlertType::CrossField);
        assert!(!report.is_valid());
    }

    #[test]
    fn small_fatality_rate_yields_exactly_one_critical() {
        let report = run(&base().with_metric(Category::Social, "fatalityRate", 0.01));
        assert_eq!(report.critical.len(), 1);
        assert_eq!(report.critical[0].field, "fatalityRate");
        assert!(report.errors.is_empty());
        assert!(report.is_valid(), "critical alerts do not invalidate");
        assert_eq!(report.summary.total_critical, 1);
    }

    #[test]
    fn turnover_boundary() {
        let at = run(&base().with_metric(Category::Social, "employeeTurnoverRate", 25.0));
        assert!(at.warnings.is_empty());
        let above = run(&base().with_metric(Category::Social, "employeeTurnoverRate", 25.01));
        assert_eq!(above.warnings.len(), 1);
    }

    #[test]
    fn lost_time_injury_rate_goes_critical_at_threshold() {
        let report = run(&base().with_metric(Category::Social, "lostTimeInjuryRate", 12.0));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.critical.len(), 1);
        assert_eq!(report.critical[0].alert_type, AlertType::Threshold);
    }

    #[test]
    fn data_breach_goes_critical() {
        let report = run(&base().with_metric(Category::Governance, "dataBreaches", 1.0));
        assert_eq!(report.critical.len(), 1);
    }

    #[test]
    fn unknown_metrics_are_reported_only_on_request() {
        let submission = base().with_metric(Category::Governance, "boardMeetings", 12.0);
        assert!(run(&submission).alerts.is_empty());

        let config = ValidationConfig {
            report_unknown_metrics: true,
            ..ValidationConfig::default()
        };
        let report = validate(&submission, &catalog(), &config).unwrap();
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].severity, Severity::Info);
        assert!(report.errors.is_empty() && report.warnings.is_empty());
    }

    #[test]
    fn fields_with_errors_collects_error_fields() {
        let report = run(&base()
            .with_metric(Category::Environmental, "wasteRecycledPercentage", 140.0)
            .with_metric(Category::Governance, "boardSize", 0.0));
        let fields = report.fields_with_errors();
        assert!(fields.contains("wasteRecycledPercentage"));
        assert!(fields.contains("boardSize"));
    }

    #[test]
    fn gri_completeness_in_summary() {
        let report = run(&base()
            .with_metric(Category::Environmental, "scope1Emissions", 10.0)
            .with_metric(Category::Environmental, "scope2Emissions", 0.0));
        // 2 of 17 GRI fields.
        assert_eq!(report.summary.gri_completeness_score, 12);
        assert_eq!(report.completeness.standards["GRI"].required_filled, 2);
    }

    #[test]
    fn missing_identity_is_an_input_error() {
        let mut submission = base();
        submission.company_id = None;
        let err = validate(&submission, &catalog(), &ValidationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Input(InputError::MissingCompanyId)
        ));

        let mut submission = base();
        submission.reporting_year = None;
        assert!(validate(&submission, &catalog(), &ValidationConfig::default()).is_err());
    }

    #[test]
    fn report_serializes_with_wire_names() {
        let report = run(&base().with_metric(Category::Social, "fatalityRate", 1.0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["totalCritical"], 1);
        assert_eq!(json["summary"]["isValid"], true);
        assert!(json["summary"]["griCompletenessScore"].is_u64());
    }

    #[test]
    fn distinct_rules_on_one_field_are_all_reported() {
        let mut doc = esg_catalog::CatalogDocument::builtin();
        doc.thresholds.insert(
            "wasteRecycled".to_string(),
            esg_catalog::ThresholdRule::new(0.0, 1000.0).unit("t"),
        );
        let catalog = Catalog::from_document(doc).unwrap();
        let submission = base()
            .with_metric(Category::Environmental, "wasteRecycled", 1500.0)
            .with_metric(Category::Environmental, "wasteGenerated", 1200.0);
        let report = validate(&submission, &catalog, &ValidationConfig::default()).unwrap();

        let rules: Vec<_> = report
            .errors
            .iter()
            .filter(|a| a.field == "wasteRecycled")
            .map(|a| a.rule.as_deref().unwrap())
            .collect();
        assert_eq!(rules, vec!["cross_field.waste_recycled_total", threshold::RULE_RANGE]);
        assert_eq!(report.summary.total_errors, 2);
    }

    #[test]
    fn restated_threshold_check_is_reported_once() {
        let report = run(&base().with_metric(
            Category::Environmental,
            "renewableEnergyPercentage",
            130.0,
        ));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].rule.as_deref(), Some(cross_field::RULE_RENEWABLE_PERCENTAGE));
    }

    proptest! {
        #[test]
        fn validation_is_deterministic(
            renewable in -50.0f64..200.0,
            turnover in 0.0f64..120.0,
            fatality in 0.0f64..2.0,
        ) {
            let submission = base()
                .with_metric(Category::Environmental, "renewableEnergyPercentage", renewable)
                .with_metric(Category::Social, "employeeTurnoverRate", turnover)
                .with_metric(Category::Social, "fatalityRate", fatality);
            prop_assert_eq!(run(&submission), run(&submission));
        }

        #[test]
        fn at_most_one_alert_per_field_and_severity(
            renewable in -50.0f64..200.0,
            ltir in 0.0f64..300.0,
        ) {
            let report = run(&base()
                .with_metric(Category::Environmental, "renewableEnergyPercentage", renewable)
                .with_metric(Category::Social, "lostTimeInjuryRate", ltir));
            let mut seen = std::collections::HashSet::new();
            for alert in &report.alerts {
                prop_assert!(seen.insert((alert.field.clone(), alert.severity)));
            }
        }

        #[test]
        fn completeness_scores_are_bounded(n in 0usize..20) {
            let mut submission = base();
            for i in 0..n {
                submission =
                    submission.with_metric(Category::Environmental, format!("m{i}"), i as f64);
            }
            let report = run(&submission);
            prop_assert!(report.completeness.overall <= 100);
            for s in report.completeness.standards.values() {
                prop_assert!(s.score <= 100 && s.required_score <= 100);
            }
        }
    }
}
