//! # esg-mapping — Framework Mapper
//!
//! Translates a company's resolved metrics into per-requirement
//! [`ComplianceRecord`]s for a disclosure framework, and rolls the records
//! up into a [`FrameworkComplianceReport`] with per-category percentages.
//!
//! ## Status rules
//!
//! For each requirement the mapper intersects the filled submitted keys
//! with the requirement's metric keys (see [`matching`]):
//!
//! | present | validation errors | prior period | status |
//! |---------|-------------------|--------------|--------|
//! | all     | none              | –            | `COMPLIANT` |
//! | all     | some              | –            | `IN_PROGRESS` |
//! | some    | –                 | –            | `PARTIAL` |
//! | none    | –                 | yes          | `NON_COMPLIANT` |
//! | none    | –                 | no           | `NOT_STARTED` |
//!
//! ## Category percentages
//!
//! Per category, `round(100 × compliant / total)`. A category with no
//! applicable requirements is *vacuous*: it reports 100 and is excluded
//! from the framework's overall score, which is the unweighted mean of the
//! remaining category percentages.

pub mod matching;
pub mod status;

use std::collections::{BTreeMap, BTreeSet};

use esg_catalog::{Catalog, FrameworkRequirement, Materiality};
use esg_core::{Category, CompanyId, CoreError, Framework, MetricEntry, MetricSet, ReportingYear};
use serde::{Deserialize, Serialize};

pub use matching::KeyMatching;
pub use status::{ComplianceStatus, VerificationStatus};

/// Caller-supplied mapping options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MappingOptions {
    /// Whether the company reported in a prior period. Decides between
    /// `NON_COMPLIANT` and `NOT_STARTED` for untouched requirements.
    pub prior_period_available: bool,
    /// Key matching mode.
    pub key_matching: KeyMatching,
}

/// Mapping outcome for one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    /// Reporting company.
    pub company_id: CompanyId,
    /// Reporting period.
    pub reporting_year: ReportingYear,
    /// Framework.
    pub framework_id: Framework,
    /// Requirement code.
    pub requirement_id: String,
    /// Requirement title.
    pub title: String,
    /// Pillar the requirement counts towards.
    pub category: Category,
    /// Materiality level.
    pub materiality: Materiality,
    /// Status.
    pub compliance_status: ComplianceStatus,
    /// `completeness × quality / 100`.
    pub compliance_score: u8,
    /// Share of present values without a validation error.
    pub data_quality_score: u8,
    /// Share of required keys present.
    pub completeness_score: u8,
    /// Weakest assurance level among contributing metrics.
    pub verification_status: VerificationStatus,
    /// Submitted keys that satisfied the requirement.
    pub matched_metric_keys: Vec<String>,
    /// Metric keys still missing.
    pub missing_metric_keys: Vec<String>,
}

/// Compliance percentage of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    /// Applicable requirements in the category.
    pub total: usize,
    /// Compliant requirements.
    pub compliant: usize,
    /// `round(100 × compliant / total)`, or 100 when vacuous.
    pub percentage: u8,
    /// No applicable requirements; excluded from the overall score.
    pub vacuous: bool,
}

/// A requirement that is not yet compliant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingRequirement {
    /// Requirement code.
    pub requirement_id: String,
    /// Requirement title.
    pub title: String,
    /// Pillar.
    pub category: Category,
    /// Materiality level.
    pub materiality: Materiality,
    /// Current status.
    pub status: ComplianceStatus,
    /// Metric keys still missing.
    pub missing_metric_keys: Vec<String>,
}

/// Compliance of one company-period against one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkComplianceReport {
    /// Framework.
    pub framework: Framework,
    /// Reporting company.
    pub company_id: CompanyId,
    /// Reporting period.
    pub reporting_year: ReportingYear,
    /// Applicable requirements.
    pub total_requirements: usize,
    /// Compliant requirements.
    pub met_requirements: usize,
    /// Mean of non-vacuous category percentages.
    pub compliance_score: u8,
    /// Per-category percentages.
    pub category_scores: BTreeMap<Category, CategoryScore>,
    /// Non-compliant requirements, most material first.
    pub missing_requirements: Vec<MissingRequirement>,
    /// Every requirement's record, in catalog order.
    pub records: Vec<ComplianceRecord>,
}

/// Maps metric sets onto the frameworks of a catalog.
///
/// The mapper is cheap to build per request: it borrows the catalog and
/// holds only the caller's options and the set of metric keys that failed
/// validation.
#[derive(Debug, Clone)]
pub struct FrameworkMapper<'a> {
    catalog: &'a Catalog,
    options: MappingOptions,
    error_fields: BTreeSet<String>,
}

impl<'a> FrameworkMapper<'a> {
    /// Create a mapper with no validation errors recorded.
    pub fn new(catalog: &'a Catalog, options: MappingOptions) -> Self {
        Self {
            catalog,
            options,
            error_fields: BTreeSet::new(),
        }
    }

    /// Record metric keys that carry error-severity validation alerts.
    /// Requirements whose keys are all present but include one of these
    /// become `IN_PROGRESS`.
    pub fn with_error_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.error_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    /// Evaluate one requirement.
    pub fn map_requirement(
        &self,
        set: &MetricSet,
        requirement: &FrameworkRequirement,
    ) -> ComplianceRecord {
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        for term in &requirement.required_metric_keys {
            match matching::find_key(set, term, self.catalog.aliases(), self.options.key_matching) {
                Some(key) => matched.push(key.to_string()),
                None => missing.push(self.catalog.resolve_term(term).to_string()),
            }
        }

        let required = requirement.required_metric_keys.len();
        let present = matched.len();
        let flagged = matched
            .iter()
            .filter(|k| self.error_fields.contains(k.as_str()))
            .count();

        let compliance_status = if present == 0 {
            if self.options.prior_period_available {
                ComplianceStatus::NonCompliant
            } else {
                ComplianceStatus::NotStarted
            }
        } else if present < required {
            ComplianceStatus::Partial
        } else if flagged > 0 {
            ComplianceStatus::InProgress
        } else {
            ComplianceStatus::Compliant
        };

        let completeness_score = esg_core::percentage(present, required).unwrap_or(0);
        let data_quality_score = esg_core::percentage(present - flagged, present).unwrap_or(0);
        let compliance_score = esg_core::clamp_score(
            f64::from(completeness_score) * f64::from(data_quality_score) / 100.0,
        );
        let verification_status = VerificationStatus::from_weakest(
            matched
                .iter()
                .filter_map(|k| set.get(k))
                .map(|r| r.assurance),
        );

        ComplianceRecord {
            company_id: set.company_id().clone(),
            reporting_year: set.reporting_year(),
            framework_id: requirement.framework,
            requirement_id: requirement.requirement_id.clone(),
            title: requirement.title.clone(),
            category: requirement.category,
            materiality: requirement.materiality,
            compliance_status,
            compliance_score,
            data_quality_score,
            completeness_score,
            verification_status,
            matched_metric_keys: matched,
            missing_metric_keys: missing,
        }
    }

    /// One record per requirement of `framework`, in catalog order.
    pub fn map_to_framework(&self, set: &MetricSet, framework: Framework) -> Vec<ComplianceRecord> {
        self.catalog
            .requirements(framework)
            .iter()
            .map(|r| self.map_requirement(set, r))
            .collect()
    }

    /// Full compliance report for one framework.
    pub fn report(&self, set: &MetricSet, framework: Framework) -> FrameworkComplianceReport {
        let records = self.map_to_framework(set, framework);
        let applicable: Vec<&ComplianceRecord> = records
            .iter()
            .filter(|r| r.materiality != Materiality::NotApplicable)
            .collect();

        let mut category_scores = BTreeMap::new();
        for &category in Category::all() {
            let in_category: Vec<&&ComplianceRecord> =
                applicable.iter().filter(|r| r.category == category).collect();
            let total = in_category.len();
            let compliant = in_category
                .iter()
                .filter(|r| r.compliance_status.is_met())
                .count();
            category_scores.insert(
                category,
                CategoryScore {
                    total,
                    compliant,
                    percentage: esg_core::percentage(compliant, total).unwrap_or(100),
                    vacuous: total == 0,
                },
            );
        }

        let counted: Vec<f64> = category_scores
            .values()
            .filter(|s| !s.vacuous)
            .map(|s| f64::from(s.percentage))
            .collect();
        let compliance_score = if counted.is_empty() {
            100
        } else {
            esg_core::clamp_score(counted.iter().sum::<f64>() / counted.len() as f64)
        };

        let mut missing_requirements: Vec<MissingRequirement> = applicable
            .iter()
            .filter(|r| !r.compliance_status.is_met())
            .map(|r| MissingRequirement {
                requirement_id: r.requirement_id.clone(),
                title: r.title.clone(),
                category: r.category,
                materiality: r.materiality,
                status: r.compliance_status,
                missing_metric_keys: r.missing_metric_keys.clone(),
            })
            .collect();
        missing_requirements.sort_by(|a, b| {
            a.materiality
                .cmp(&b.materiality)
                .then_with(|| a.requirement_id.cmp(&b.requirement_id))
        });

        let met_requirements = applicable
            .iter()
            .filter(|r| r.compliance_status.is_met())
            .count();

        tracing::debug!(
            framework = %framework,
            company_id = %set.company_id(),
            met = met_requirements,
            total = applicable.len(),
            score = compliance_score,
            "framework mapped"
        );

        FrameworkComplianceReport {
            framework,
            company_id: set.company_id().clone(),
            reporting_year: set.reporting_year(),
            total_requirements: applicable.len(),
            met_requirements,
            compliance_score,
            category_scores,
            missing_requirements,
            records,
        }
    }

    /// Reports for every framework in the catalog.
    pub fn map_all_frameworks(
        &self,
        set: &MetricSet,
    ) -> BTreeMap<Framework, FrameworkComplianceReport> {
        Framework::all()
            .iter()
            .map(|&fw| (fw, self.report(set, fw)))
            .collect()
    }
}

/// Map raw metric entries for one company-period onto a framework.
///
/// Entries are resolved latest-wins before mapping.
///
/// # Errors
///
/// [`CoreError::ScopeMismatch`] if an entry belongs to another company or
/// period.
pub fn map_to_framework(
    company_id: CompanyId,
    reporting_year: ReportingYear,
    entries: &[MetricEntry],
    framework: Framework,
    catalog: &Catalog,
    options: MappingOptions,
) -> Result<Vec<ComplianceRecord>, CoreError> {
    let set = MetricSet::from_entries(company_id, reporting_year, entries)?;
    Ok(FrameworkMapper::new(catalog, options).map_to_framework(&set, framework))
}
