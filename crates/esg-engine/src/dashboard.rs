//! # Dashboard View
//!
//! An [`Assessment`] is the full pipeline output for one company-period.
//! [`DashboardView`] condenses it into the record a dashboard renders.
//! The critical alerts travel in their own field and are never folded into
//! the general error count.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use esg_benchmark::BenchmarkOutcome;
use esg_catalog::Catalog;
use esg_core::{CompanyId, Framework, ReportingYear};
use esg_mapping::FrameworkComplianceReport;
use esg_scoring::EsgScoreSummary;
use esg_validation::{ValidationAlert, ValidationReport, ValidationSummary};

/// Full pipeline output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Validation findings.
    pub validation: ValidationReport,
    /// Compliance per framework.
    pub frameworks: BTreeMap<Framework, FrameworkComplianceReport>,
    /// Composite score, with `industryPercentile` filled when ranked.
    pub summary: EsgScoreSummary,
    /// Benchmark outcome, when a sector was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkOutcome>,
}

/// Headline compliance for one framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkScore {
    /// Overall compliance score, 0–100.
    pub compliance_score: u8,
    /// Met requirements.
    pub met_requirements: usize,
    /// Requirements in the framework.
    pub total_requirements: usize,
}

impl From<&FrameworkComplianceReport> for FrameworkScore {
    fn from(report: &FrameworkComplianceReport) -> Self {
        Self {
            compliance_score: report.compliance_score,
            met_requirements: report.met_requirements,
            total_requirements: report.total_requirements,
        }
    }
}

/// Dashboard record for one company-period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Reporting company.
    pub company_id: CompanyId,
    /// Reporting period.
    pub reporting_year: ReportingYear,
    /// When the view was produced. Supplied by the caller.
    pub generated_at: DateTime<Utc>,
    /// Catalog version the figures were computed against.
    pub catalog_version: String,
    /// Catalog content digest.
    pub catalog_digest: String,
    /// Composite score.
    pub summary: EsgScoreSummary,
    /// Benchmark outcome, when a sector was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkOutcome>,
    /// Compliance headline per framework.
    pub framework_scores: BTreeMap<Framework, FrameworkScore>,
    /// Validation counters.
    pub validation: ValidationSummary,
    /// Compliance-critical findings.
    pub critical_alerts: Vec<ValidationAlert>,
}

impl Assessment {
    /// Condense into a dashboard record.
    pub fn dashboard(&self, catalog: &Catalog, generated_at: DateTime<Utc>) -> DashboardView {
        DashboardView {
            company_id: self.summary.company_id.clone(),
            reporting_year: self.summary.reporting_year,
            generated_at,
            catalog_version: catalog.version().to_string(),
            catalog_digest: catalog.digest().to_string(),
            summary: self.summary.clone(),
            benchmark: self.benchmark.clone(),
            framework_scores: self
                .frameworks
                .iter()
                .map(|(fw, report)| (*fw, FrameworkScore::from(report)))
                .collect(),
            validation: self.validation.summary.clone(),
            critical_alerts: self.validation.critical.clone(),
        }
    }

    /// Whether validation passed and nothing compliance-critical surfaced.
    pub fn is_clean(&self) -> bool {
        self.validation.is_valid() && !self.validation.has_critical()
    }
}
