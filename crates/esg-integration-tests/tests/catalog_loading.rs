//! # Catalog and Configuration Loading
//!
//! Reference data and engine configuration read from files at startup:
//! custom catalogs change the rules applied, broken catalogs fail before
//! any request is served, and the key-matching mode is honoured.

use std::path::Path;

use esg_catalog::{CatalogDocument, CatalogError, ThresholdRule};
use esg_core::{Category, EsgSubmission, Framework};
use esg_engine::{AssessRequest, EngineConfig, EngineContext, EngineError};
use esg_mapping::{ComplianceStatus, KeyMatching};
use esg_validation::Severity;

fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) {
    std::fs::write(path, serde_yaml::to_string(value).unwrap()).unwrap();
}

fn submission() -> EsgSubmission {
    EsgSubmission::new("acme", 2024)
        .with_metric(Category::Environmental, "scope1Emissions", 1200.0)
        .with_metric(Category::Environmental, "energyConsumption", 5000.0)
        .with_metric(Category::Environmental, "renewableEnergyPercentage", 45.0)
}

#[test]
fn custom_catalog_changes_rules_and_digest() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = CatalogDocument::builtin();
    doc.version = "2025.1-custom".to_string();
    doc.thresholds.insert(
        "scope1Emissions".to_string(),
        ThresholdRule::new(0.0, 1e8).warn_above(1000.0).unit("tCO2e"),
    );
    let catalog_path = dir.path().join("catalog.yaml");
    write_yaml(&catalog_path, &doc);

    let config = EngineConfig {
        catalog_path: Some(catalog_path),
        ..EngineConfig::default()
    };
    let custom = EngineContext::from_config(config).unwrap();
    let builtin = EngineContext::builtin().unwrap();
    assert_ne!(custom.catalog().digest(), builtin.catalog().digest());

    let assessment = custom.assess(&submission(), &AssessRequest::default()).unwrap();
    assert!(assessment
        .validation
        .warnings
        .iter()
        .any(|a| a.field == "scope1Emissions" && a.severity == Severity::Warning));
    let baseline = builtin.assess(&submission(), &AssessRequest::default()).unwrap();
    assert!(baseline.validation.warnings.iter().all(|a| a.field != "scope1Emissions"));

    let at = chrono::DateTime::parse_from_rfc3339("2025-05-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let view = assessment.dashboard(custom.catalog(), at);
    assert_eq!(view.catalog_version, "2025.1-custom");
}

#[test]
fn catalog_missing_a_framework_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = CatalogDocument::builtin();
    doc.requirements.retain(|r| r.framework != Framework::Icmm);
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(&catalog_path, serde_json::to_vec(&doc).unwrap()).unwrap();

    let err = EngineContext::from_config(EngineConfig {
        catalog_path: Some(catalog_path),
        ..EngineConfig::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Catalog(CatalogError::MissingFramework {
            framework: Framework::Icmm
        })
    ));
}

#[test]
fn missing_peer_file_fails_at_startup() {
    let err = EngineContext::from_config(EngineConfig {
        peer_data_path: Some("/nonexistent/peers.yaml".into()),
        ..EngineConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, EngineError::PeerTable(_)));
}

#[test]
fn exact_matching_ignores_aliases() {
    let record_for = |key_matching: KeyMatching| {
        let ctx = EngineContext::from_config(EngineConfig {
            key_matching,
            ..EngineConfig::default()
        })
        .unwrap();
        let set = submission().to_metric_set().unwrap();
        ctx.map(&set, Framework::Gri, false)
            .records
            .into_iter()
            .find(|r| r.requirement_id == "GRI-302-1")
            .unwrap()
    };

    let aliased = record_for(KeyMatching::ExactOrAlias);
    assert_eq!(aliased.compliance_status, ComplianceStatus::Compliant);

    let exact = record_for(KeyMatching::Exact);
    assert_eq!(exact.compliance_status, ComplianceStatus::Partial);
    assert_eq!(exact.missing_metric_keys, vec!["renewableEnergyPercentage".to_string()]);
}

#[test]
fn cli_context_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("engine.yaml");
    std::fs::write(
        &config_path,
        "benchmark:\n  min_peers: 12\nscoring:\n  recommendation_threshold: 60\n",
    )
    .unwrap();
    let ctx = esg_cli::build_context(Some(&config_path)).unwrap();
    assert_eq!(ctx.config().benchmark.min_peers, 12);

    // Mining has ten illustrative peers, fewer than the configured twelve.
    let set = submission().to_metric_set().unwrap();
    let summary = ctx.score(&set, None);
    assert!(ctx.benchmark(&summary, "Mining").ranked().is_none());
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("engine.yaml");
    std::fs::write(
        &config_path,
        concat!(
            "scoring:\n",
            "  bands:\n",
            "    - { min_score: 50, rating: A, label: Good }\n",
            "    - { min_score: 60, rating: AA, label: Better }\n",
        ),
    )
    .unwrap();
    assert!(esg_cli::build_context(Some(&config_path)).is_err());
}
