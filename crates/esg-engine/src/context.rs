//! # Engine Context
//!
//! [`EngineContext`] carries the reference catalog, the peer table and the
//! configuration into every call. Nothing is global. A context is cheap to
//! clone and safe to share across threads, and each call is a pure function
//! of the context and its arguments.

use std::sync::Arc;

use esg_benchmark::{BenchmarkOutcome, PeerTable};
use esg_catalog::Catalog;
use esg_core::{CompanyId, CoreError, EsgSubmission, Framework, MetricSet, ReportingYear};
use esg_mapping::{FrameworkComplianceReport, FrameworkMapper, MappingOptions};
use esg_scoring::EsgScoreSummary;
use esg_validation::{ValidationError, ValidationReport};

use crate::config::EngineConfig;
use crate::dashboard::Assessment;
use crate::error::EngineError;
use crate::store::{MetricStore, StoreError};

/// Per-request inputs beyond the metrics themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessRequest {
    /// Sector to benchmark against. No benchmark when absent.
    pub sector: Option<String>,
    /// Prior period's composite, for momentum.
    pub previous_composite: Option<u8>,
}

impl AssessRequest {
    /// Request benchmarking against `sector`.
    pub fn in_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Supply the prior period's composite.
    pub fn with_previous(mut self, composite: u8) -> Self {
        self.previous_composite = Some(composite);
        self
    }
}

/// Reference data and configuration shared by every call.
#[derive(Debug, Clone)]
pub struct EngineContext {
    catalog: Arc<Catalog>,
    peers: Arc<PeerTable>,
    config: Arc<EngineConfig>,
}

impl EngineContext {
    /// Assemble a context from loaded parts.
    ///
    /// # Errors
    ///
    /// Configuration validation failures.
    pub fn new(
        catalog: Catalog,
        peers: PeerTable,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            catalog: Arc::new(catalog),
            peers: Arc::new(peers),
            config: Arc::new(config),
        })
    }

    /// Built-in catalog, illustrative peers, default configuration.
    ///
    /// # Errors
    ///
    /// Only if the built-in catalog fails its own consistency checks.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::new(Catalog::builtin()?, PeerTable::illustrative(), EngineConfig::default())
    }

    /// Load the catalog and peer table named by `config`, falling back to
    /// the built-in catalog and the illustrative peers.
    ///
    /// # Errors
    ///
    /// Load or validation failures of any part.
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::builtin()?,
        };
        let peers = match &config.peer_data_path {
            Some(path) => PeerTable::from_file(path)?,
            None => PeerTable::illustrative(),
        };
        tracing::info!(
            catalog_version = catalog.version(),
            catalog_digest = catalog.digest(),
            sectors = peers.len(),
            "engine context ready"
        );
        Self::new(catalog, peers, config)
    }

    /// Reference catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Peer table.
    pub fn peers(&self) -> &PeerTable {
        &self.peers
    }

    /// Configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a raw submission.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] for input-shape problems only.
    pub fn validate(&self, submission: &EsgSubmission) -> Result<ValidationReport, EngineError> {
        Ok(esg_validation::validate(
            submission,
            &self.catalog,
            &self.config.validation,
        )?)
    }

    fn mapper(&self, prior_period_available: bool) -> FrameworkMapper<'_> {
        FrameworkMapper::new(
            &self.catalog,
            MappingOptions {
                prior_period_available,
                key_matching: self.config.key_matching,
            },
        )
    }

    /// Compliance of a metric set against one framework.
    pub fn map(
        &self,
        set: &MetricSet,
        framework: Framework,
        prior_period_available: bool,
    ) -> FrameworkComplianceReport {
        self.mapper(prior_period_available).report(set, framework)
    }

    /// Score a metric set.
    pub fn score(&self, set: &MetricSet, previous_composite: Option<u8>) -> EsgScoreSummary {
        esg_scoring::score(set, previous_composite, &self.config.scoring)
    }

    /// Benchmark a score summary.
    pub fn benchmark(&self, summary: &EsgScoreSummary, sector: &str) -> BenchmarkOutcome {
        esg_benchmark::benchmark(summary, sector, &self.peers, &self.config.benchmark)
    }

    /// Run the full pipeline over a raw submission.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] for input-shape problems.
    pub fn assess(
        &self,
        submission: &EsgSubmission,
        request: &AssessRequest,
    ) -> Result<Assessment, EngineError> {
        let set = submission.to_metric_set().map_err(|e| match e {
            CoreError::Input(input) => EngineError::Validation(ValidationError::Input(input)),
            other => EngineError::Core(other),
        })?;
        Ok(self.assess_set(&set, request))
    }

    /// Run the full pipeline over a resolved metric set.
    ///
    /// Validation runs first; fields with validation errors mark the
    /// requirements that depend on them as in progress. Scoring follows,
    /// then the optional benchmark fills `industryPercentile`.
    pub fn assess_set(&self, set: &MetricSet, request: &AssessRequest) -> Assessment {
        let validation = esg_validation::validate_set(set, &self.catalog, &self.config.validation);

        let frameworks = self
            .mapper(request.previous_composite.is_some())
            .with_error_fields(validation.fields_with_errors())
            .map_all_frameworks(set);

        let mut summary = self.score(set, request.previous_composite);

        let benchmark = request.sector.as_deref().map(|sector| {
            let outcome = self.benchmark(&summary, sector);
            summary.industry_percentile = outcome.percentile();
            outcome
        });

        tracing::info!(
            company_id = %set.company_id(),
            reporting_year = %set.reporting_year(),
            composite = summary.composite,
            rating = %summary.rating,
            critical = validation.critical.len(),
            errors = validation.errors.len(),
            "assessment complete"
        );

        Assessment {
            validation,
            frameworks,
            summary,
            benchmark,
        }
    }

    /// Run the full pipeline over entries held in a metric store. The
    /// prior composite comes from the store.
    ///
    /// A company-period with no entries is assessed as an empty set and
    /// scores zero with low confidence.
    ///
    /// # Errors
    ///
    /// Store failures or entries that do not assemble into a set.
    pub fn assess_stored(
        &self,
        store: &dyn MetricStore,
        company_id: &CompanyId,
        year: ReportingYear,
        sector: Option<&str>,
    ) -> Result<Assessment, EngineError> {
        let entries = match store.entries(company_id, year) {
            Ok(entries) => entries,
            Err(StoreError::NotFound { .. }) => {
                tracing::info!(
                    company_id = %company_id,
                    reporting_year = %year,
                    "no stored metric entries, assessing an empty set"
                );
                Vec::new()
            }
        };
        let set = MetricSet::from_entries(company_id.clone(), year, &entries)?;
        let request = AssessRequest {
            sector: sector.map(str::to_string),
            previous_composite: store.prior_composite(company_id, year)?,
        };
        Ok(self.assess_set(&set, &request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryMetricStore;
    use chrono::TimeZone;
    use esg_core::{Category, InputError};
    use esg_mapping::ComplianceStatus;
    use esg_scoring::Momentum;

    fn full() -> EsgSubmission {
        EsgSubmission::new("acme", 2024)
            .with_metric(Category::Environmental, "renewableEnergyPercentage", 90.0)
            .with_metric(Category::Environmental, "wasteRecycledPercentage", 80.0)
            .with_metric(Category::Environmental, "emissionsReductionPercentage", 70.0)
            .with_metric(Category::Social, "femaleEmployees", 400.0)
            .with_metric(Category::Social, "maleEmployees", 600.0)
            .with_metric(Category::Social, "safetyIncidents", 1.0)
            .with_metric(Category::Governance, "independentDirectorsPercentage", 60.0)
            .with_metric(Category::Governance, "ethicsTrainingCompletion", 98.0)
            .with_metric(Category::Governance, "auditCommitteeIndependence", 100.0)
    }

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineContext>();
    }

    #[test]
    fn assess_runs_every_stage() {
        let ctx = EngineContext::builtin().unwrap();
        let assessment = ctx
            .assess(&full(), &AssessRequest::default().in_sector("Mining"))
            .unwrap();
        assert_eq!(assessment.summary.composite, 79);
        assert_eq!(assessment.frameworks.len(), Framework::all().len());
        // 79 is above every illustrative mining peer.
        assert_eq!(assessment.summary.industry_percentile, Some(100));
        let ranked = assessment.benchmark.as_ref().and_then(|b| b.ranked()).unwrap();
        assert_eq!(ranked.rank, 1);
        assert!(ranked.illustrative);
    }

    #[test]
    fn unknown_sector_leaves_percentile_empty() {
        let ctx = EngineContext::builtin().unwrap();
        let assessment = ctx
            .assess(&full(), &AssessRequest::default().in_sector("Aerospace"))
            .unwrap();
        assert_eq!(assessment.summary.industry_percentile, None);
        assert!(matches!(
            assessment.benchmark,
            Some(BenchmarkOutcome::InsufficientPeerData { .. })
        ));
    }

    #[test]
    fn missing_company_is_an_input_error() {
        let mut submission = full();
        submission.company_id = None;
        let err = EngineContext::builtin()
            .unwrap()
            .assess(&submission, &AssessRequest::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::Input(InputError::MissingCompanyId))
        ));
    }

    #[test]
    fn critical_alerts_reach_the_dashboard() {
        let ctx = EngineContext::builtin().unwrap();
        let submission = full().with_metric(Category::Social, "fatalityRate", 1.0);
        let assessment = ctx.assess(&submission, &AssessRequest::default()).unwrap();
        assert!(!assessment.is_clean());

        let at = chrono::Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let view = assessment.dashboard(ctx.catalog(), at);
        assert_eq!(view.critical_alerts.len(), 1);
        assert_eq!(view.critical_alerts[0].field, "fatalityRate");
        assert_eq!(view.validation.total_critical, 1);
        assert_eq!(view.catalog_digest, ctx.catalog().digest());
        assert_eq!(view.generated_at, at);
        assert!(view.benchmark.is_none());
    }

    #[test]
    fn validation_errors_mark_requirements_in_progress() {
        let ctx = EngineContext::builtin().unwrap();
        let submission = full()
            .with_metric(Category::Environmental, "energyConsumption", 5000.0)
            .with_metric(Category::Environmental, "renewableEnergyPercentage", 120.0);
        let assessment = ctx.assess(&submission, &AssessRequest::default()).unwrap();
        assert!(assessment
            .validation
            .fields_with_errors()
            .contains("renewableEnergyPercentage"));
        let energy = assessment.frameworks[&Framework::Gri]
            .records
            .iter()
            .find(|r| r.requirement_id == "GRI-302-1")
            .unwrap();
        assert_eq!(energy.compliance_status, ComplianceStatus::InProgress);
        assert!(energy.missing_metric_keys.is_empty());
    }

    #[test]
    fn stored_assessment_uses_prior_composite() {
        let ctx = EngineContext::builtin().unwrap();
        let mut store = InMemoryMetricStore::new();
        store.insert_submission(&full()).unwrap();
        let company = CompanyId::new("acme").unwrap();
        store.record_composite(company.clone(), ReportingYear::new(2023).unwrap(), 60);

        let assessment = ctx
            .assess_stored(&store, &company, ReportingYear::new(2024).unwrap(), None)
            .unwrap();
        assert_eq!(assessment.summary.previous_composite, Some(60));
        assert_eq!(assessment.summary.momentum, Momentum::Improving);
    }

    #[test]
    fn stored_assessment_without_entries_scores_zero() {
        let ctx = EngineContext::builtin().unwrap();
        let store = InMemoryMetricStore::new();
        let assessment = ctx
            .assess_stored(
                &store,
                &CompanyId::new("ghost").unwrap(),
                ReportingYear::new(2024).unwrap(),
                None,
            )
            .unwrap();
        let summary = &assessment.summary;
        assert_eq!(summary.composite, 0);
        assert_eq!(summary.rating, "B");
        assert_eq!(summary.coverage.confidence, esg_scoring::Confidence::Low);
        assert!(!summary.notes.is_empty());
        assert!(assessment.validation.errors.is_empty());
    }

    #[test]
    fn from_config_loads_peer_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peers.json");
        std::fs::write(
            &path,
            concat!(
                r#"{"groups":[{"sector":"Utilities","source":"published","#,
                r#""composites":[40,50,60,70,80]}]}"#,
            ),
        )
        .unwrap();
        let config = EngineConfig {
            peer_data_path: Some(path),
            ..EngineConfig::default()
        };
        let ctx = EngineContext::from_config(config).unwrap();
        assert_eq!(ctx.peers().len(), 1);
        let summary = ctx.score(&full().to_metric_set().unwrap(), None);
        let outcome = ctx.benchmark(&summary, "utilities");
        assert!(!outcome.ranked().unwrap().illustrative);
    }
}
