//! # Metric Store
//!
//! The engine reads raw metric entries through the [`MetricStore`] trait.
//! Persistence is not the engine's concern. Callers plug in whatever holds
//! their records, and [`InMemoryMetricStore`] serves the CLI and tests.

use std::collections::BTreeMap;

use thiserror::Error;

use esg_core::{CompanyId, CoreError, EsgSubmission, MetricEntry, ReportingYear};

/// Metric store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No entries exist for the company-period.
    #[error("no metric entries for {company_id} in {reporting_year}")]
    NotFound {
        /// Requested company.
        company_id: String,
        /// Requested period.
        reporting_year: u16,
    },
}

/// Read-only access to submitted metrics.
pub trait MetricStore: Send + Sync {
    /// Every entry recorded for a company-period, superseded ones included.
    fn entries(
        &self,
        company_id: &CompanyId,
        year: ReportingYear,
    ) -> Result<Vec<MetricEntry>, StoreError>;

    /// Composite recorded for the period before `year`, if any.
    fn prior_composite(
        &self,
        company_id: &CompanyId,
        year: ReportingYear,
    ) -> Result<Option<u8>, StoreError>;
}

type Key = (CompanyId, ReportingYear);

/// A [`MetricStore`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricStore {
    entries: BTreeMap<Key, Vec<MetricEntry>>,
    composites: BTreeMap<Key, u8>,
}

impl InMemoryMetricStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry.
    pub fn insert(&mut self, entry: MetricEntry) {
        self.entries
            .entry((entry.company_id.clone(), entry.reporting_year))
            .or_default()
            .push(entry);
    }

    /// Append every metric of a submission.
    ///
    /// # Errors
    ///
    /// Input-shape errors from the submission.
    pub fn insert_submission(&mut self, submission: &EsgSubmission) -> Result<usize, CoreError> {
        let entries = submission.entries()?;
        let count = entries.len();
        for entry in entries {
            self.insert(entry);
        }
        Ok(count)
    }

    /// Record a scored composite so the following period can compute
    /// momentum against it.
    pub fn record_composite(&mut self, company_id: CompanyId, year: ReportingYear, composite: u8) {
        self.composites.insert((company_id, year), composite);
    }

    /// Number of company-periods with entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetricStore for InMemoryMetricStore {
    fn entries(
        &self,
        company_id: &CompanyId,
        year: ReportingYear,
    ) -> Result<Vec<MetricEntry>, StoreError> {
        self.entries
            .get(&(company_id.clone(), year))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                company_id: company_id.to_string(),
                reporting_year: year.value(),
            })
    }

    fn prior_composite(
        &self,
        company_id: &CompanyId,
        year: ReportingYear,
    ) -> Result<Option<u8>, StoreError> {
        Ok(year
            .previous()
            .and_then(|prev| self.composites.get(&(company_id.clone(), prev)).copied()))
    }
}
