//! # Engine Properties
//!
//! The behavioural guarantees of the engine, checked end to end through
//! the public crate APIs: determinism, score bounds, threshold boundaries,
//! critical escalation, completeness idempotence, and the worked scenarios
//! for the composite, vacuous categories, renewable-energy validation and
//! diversity entropy.

use esg_catalog::Catalog;
use esg_core::{
    Category, CompanyId, EsgSubmission, Framework, MetricEntry, MetricSet, ReportingYear,
};
use esg_mapping::{FrameworkMapper, MappingOptions};
use esg_scoring::ScoringConfig;
use esg_validation::{Severity, ValidationConfig};
use proptest::prelude::*;

fn catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

fn validate(submission: &EsgSubmission) -> esg_validation::ValidationReport {
    esg_validation::validate(submission, &catalog(), &ValidationConfig::default()).unwrap()
}

fn acme() -> EsgSubmission {
    EsgSubmission::new("acme", 2024)
}

// =========================================================================
// Determinism and bounds
// =========================================================================

#[test]
fn scoring_is_bit_identical_across_calls() {
    let set = acme()
        .with_metric(Category::Environmental, "renewableEnergyPercentage", 37.5)
        .with_metric(Category::Social, "femaleEmployees", 312.0)
        .with_metric(Category::Social, "maleEmployees", 688.0)
        .with_metric(Category::Governance, "auditCommitteeIndependence", 75.0)
        .to_metric_set()
        .unwrap();
    let config = ScoringConfig::default();
    let a = serde_json::to_vec(&esg_scoring::score(&set, Some(41), &config)).unwrap();
    let b = serde_json::to_vec(&esg_scoring::score(&set, Some(41), &config)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_input_scores_zero_everywhere() {
    let set = acme().to_metric_set().unwrap();
    let summary = esg_scoring::score(&set, None, &ScoringConfig::default());
    assert_eq!(
        (summary.environmental, summary.social, summary.governance, summary.composite),
        (0, 0, 0, 0)
    );
    let report = esg_validation::validate_set(&set, &catalog(), &ValidationConfig::default());
    assert_eq!(report.completeness.overall, 0);
    let catalog = catalog();
    let mapper = FrameworkMapper::new(&catalog, MappingOptions::default());
    for report in mapper.map_all_frameworks(&set).values() {
        assert_eq!(report.compliance_score, 0, "{}", report.framework);
    }
}

proptest! {
    #[test]
    fn every_score_is_bounded(
        renewable in -1000.0f64..1000.0,
        turnover in -50.0f64..500.0,
        incidents in 0.0f64..1000.0,
        ethics in -100.0f64..300.0,
        scope1 in 0.0f64..1e9,
    ) {
        let set = acme()
            .with_metric(Category::Environmental, "renewableEnergyPercentage", renewable)
            .with_metric(Category::Environmental, "scope1Emissions", scope1)
            .with_metric(Category::Social, "employeeTurnoverRate", turnover)
            .with_metric(Category::Social, "safetyIncidents", incidents)
            .with_metric(Category::Governance, "ethicsTrainingCompletion", ethics)
            .to_metric_set()
            .unwrap();
        let summary = esg_scoring::score(&set, None, &ScoringConfig::default());
        for v in [summary.environmental, summary.social, summary.governance, summary.composite] {
            prop_assert!(v <= 100);
        }
        let catalog = catalog();
        let report = esg_validation::validate_set(&set, &catalog, &ValidationConfig::default());
        prop_assert!(report.completeness.overall <= 100);
        let mapper = FrameworkMapper::new(&catalog, MappingOptions::default());
        for fw in mapper.map_all_frameworks(&set).values() {
            prop_assert!(fw.compliance_score <= 100);
            for cat in fw.category_scores.values() {
                prop_assert!(cat.percentage <= 100);
            }
        }
    }
}

// =========================================================================
// Validation boundaries
// =========================================================================

#[test]
fn value_at_max_is_not_an_error_one_above_is() {
    let at_max = validate(&acme().with_metric(
        Category::Environmental,
        "renewableEnergyPercentage",
        100.0,
    ));
    assert!(at_max.errors.is_empty());
    assert!(at_max.is_valid());

    let above = validate(&acme().with_metric(
        Category::Environmental,
        "renewableEnergyPercentage",
        101.0,
    ));
    assert_eq!(above.errors.len(), 1);
    assert!(!above.is_valid());
}

#[test]
fn scalar_warning_is_strictly_above() {
    let at = validate(&acme().with_metric(Category::Social, "employeeTurnoverRate", 25.0));
    assert!(at.warnings.is_empty());
    let above = validate(&acme().with_metric(Category::Social, "employeeTurnoverRate", 25.5));
    assert_eq!(above.warnings.len(), 1);
    assert_eq!(above.warnings[0].field, "employeeTurnoverRate");
}

#[test]
fn zero_fatality_rate_raises_nothing() {
    let report = validate(&acme().with_metric(Category::Social, "fatalityRate", 0.0));
    assert!(report.alerts.is_empty());
}

#[test]
fn any_fatality_escalates_to_exactly_one_critical() {
    let report = validate(&acme().with_metric(Category::Social, "fatalityRate", 0.01));
    assert_eq!(report.critical.len(), 1);
    assert_eq!(report.critical[0].field, "fatalityRate");
    assert_eq!(report.critical[0].severity, Severity::Critical);
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.summary.total_critical, 1);
    // Critical findings do not count as errors.
    assert_eq!(report.summary.total_errors, 0);
}

#[test]
fn renewable_string_120_is_exactly_one_error() {
    let report = validate(&acme().with_metric(
        Category::Environmental,
        "renewableEnergyPercentage",
        "120",
    ));
    let errors: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "renewableEnergyPercentage");
    assert!(!report.summary.is_valid);
}

// =========================================================================
// Completeness
// =========================================================================

#[test]
fn resubmitting_identical_values_keeps_completeness() {
    let catalog = catalog();
    let gri = catalog.standard("GRI").unwrap();
    let company = CompanyId::new("acme").unwrap();
    let year = ReportingYear::new(2024).unwrap();
    let once: Vec<MetricEntry> = gri
        .required
        .iter()
        .take(5)
        .map(|key| {
            MetricEntry::new(company.clone(), year, Category::Environmental, key.as_str(), 10.0)
                .unwrap()
        })
        .collect();
    let twice: Vec<MetricEntry> = once.iter().chain(once.iter()).cloned().collect();

    let a = MetricSet::from_entries(company.clone(), year, &once).unwrap();
    let b = MetricSet::from_entries(company, year, &twice).unwrap();
    let config = ValidationConfig::default();
    let ra = esg_validation::validate_set(&a, &catalog, &config);
    let rb = esg_validation::validate_set(&b, &catalog, &config);
    assert_eq!(ra.completeness, rb.completeness);
    assert_eq!(ra.summary.gri_completeness_score, rb.summary.gri_completeness_score);
    assert!(ra.summary.gri_completeness_score > 0);
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn composite_of_80_70_90_is_80() {
    let set = acme()
        .with_metric(Category::Environmental, "renewableEnergyPercentage", 80.0)
        .with_metric(Category::Social, "safetyIncidents", 6.0)
        .with_metric(Category::Governance, "ethicsTrainingCompletion", 90.0)
        .to_metric_set()
        .unwrap();
    let summary = esg_scoring::score(&set, None, &ScoringConfig::default());
    assert_eq!(
        (summary.environmental, summary.social, summary.governance),
        (80, 70, 90)
    );
    assert_eq!(summary.composite, 80);
}

#[test]
fn vacuous_category_is_100_and_excluded() {
    let catalog = catalog();
    assert!(catalog
        .requirements(Framework::Tcfd)
        .iter()
        .all(|r| r.category != Category::Social));

    let set = acme().to_metric_set().unwrap();
    let report =
        FrameworkMapper::new(&catalog, MappingOptions::default()).report(&set, Framework::Tcfd);
    let social = report.category_scores[&Category::Social];
    assert_eq!(social.percentage, 100);
    assert!(social.vacuous);
    assert_eq!(social.total, 0);
    // Nothing is reported, so the non-vacuous categories pull the overall
    // score to zero; the vacuous 100 is not averaged in.
    assert_eq!(report.compliance_score, 0);
}

#[test]
fn two_equal_workforce_groups_give_diversity_50() {
    let set = acme()
        .with_metric(Category::Social, "femaleEmployees", 250.0)
        .with_metric(Category::Social, "maleEmployees", 250.0)
        .to_metric_set()
        .unwrap();
    let summary = esg_scoring::score(&set, None, &ScoringConfig::default());
    let social = summary
        .pillars
        .iter()
        .find(|p| p.pillar == Category::Social)
        .unwrap();
    assert_eq!(social.components["diversity"], 50);
    assert_eq!(summary.social, 50);
}
