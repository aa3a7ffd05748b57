//! # Metric Entries and Resolved Metric Sets
//!
//! A [`MetricEntry`] is one submitted value. Entries are immutable: a
//! correction is a new entry with the same `(category, metric_key)`, and the
//! latest one wins. [`MetricSet`] applies that supersession rule once and
//! gives the validation, mapping, and scoring stages a single resolved view
//! of a company's reporting period.
//!
//! [`EsgSubmission`] is the boundary shape used by data-entry forms and the
//! CLI: three category maps keyed by metric name.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{CoreError, InputError};
use crate::identity::{CompanyId, ReportingYear};

// ---------------------------------------------------------------------------
// MetricValue
// ---------------------------------------------------------------------------

/// A submitted metric value.
///
/// Forms submit numbers as JSON numbers or as numeric strings; both are
/// accepted and [`MetricValue::as_number`] parses the latter. Yes/no
/// disclosures arrive as booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A numeric reading.
    Number(f64),
    /// A yes/no disclosure (policy in place, assurance obtained, ...).
    Flag(bool),
    /// Free text or a numeric string.
    Text(String),
}

impl MetricValue {
    /// Whether this value counts as submitted.
    ///
    /// Empty or whitespace-only strings are unfilled. Numeric zero is filled.
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Number(n) => n.is_finite(),
            Self::Flag(_) => true,
            Self::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Numeric interpretation of the value.
    ///
    /// Numeric strings are parsed after trimming. Flags map to 1/0. Returns
    /// `None` for non-numeric text and non-finite numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for MetricValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for MetricValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for MetricValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Assurance
// ---------------------------------------------------------------------------

/// External assurance level attached to a submitted value.
///
/// Ordered from weakest to strongest so that the weakest level among a
/// requirement's contributing metrics is `min()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assurance {
    /// Self-reported, no external check.
    #[default]
    None,
    /// Limited assurance engagement (ISAE 3000 limited).
    Limited,
    /// Reasonable assurance engagement.
    Reasonable,
}

// ---------------------------------------------------------------------------
// MetricEntry
// ---------------------------------------------------------------------------

/// One submitted metric value, as persisted by the metric store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    /// Reporting company.
    pub company_id: CompanyId,
    /// Reporting period.
    pub reporting_year: ReportingYear,
    /// ESG pillar the metric is filed under.
    pub category: Category,
    /// Metric key from the catalog vocabulary (`scope1Emissions`).
    pub metric_key: String,
    /// Submitted value.
    pub value: MetricValue,
    /// Unit as entered (`tCO2e`, `%`, `MWh`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// When the entry was recorded. Drives latest-wins supersession.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
    /// External assurance level for this value.
    #[serde(default)]
    pub assurance: Assurance,
}

impl MetricEntry {
    /// Create an entry with no unit, timestamp, or assurance.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyMetricKey`] for a blank key.
    pub fn new(
        company_id: CompanyId,
        reporting_year: ReportingYear,
        category: Category,
        metric_key: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> Result<Self, InputError> {
        let metric_key = metric_key.into();
        if metric_key.trim().is_empty() {
            return Err(InputError::EmptyMetricKey);
        }
        Ok(Self {
            company_id,
            reporting_year,
            category,
            metric_key,
            value: value.into(),
            unit: None,
            recorded_at: None,
            assurance: Assurance::None,
        })
    }

    /// Attach a unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Attach a recording timestamp.
    pub fn with_recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(at);
        self
    }

    /// Attach an assurance level.
    pub fn with_assurance(mut self, assurance: Assurance) -> Self {
        self.assurance = assurance;
        self
    }
}

// ---------------------------------------------------------------------------
// MetricSet
// ---------------------------------------------------------------------------

/// The resolved value of one metric within a [`MetricSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Pillar the metric was filed under.
    pub category: Category,
    /// Current value.
    pub value: MetricValue,
    /// Unit, if one was entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Assurance level of the current value.
    #[serde(default)]
    pub assurance: Assurance,
}

/// All current metric values for one company and reporting period.
///
/// Keys are unique per category. Iteration order is deterministic
/// (category order, then key order), which keeps every downstream
/// computation reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    company_id: CompanyId,
    reporting_year: ReportingYear,
    metrics: BTreeMap<Category, BTreeMap<String, MetricRecord>>,
}

impl MetricSet {
    /// Create an empty set.
    pub fn new(company_id: CompanyId, reporting_year: ReportingYear) -> Self {
        Self {
            company_id,
            reporting_year,
            metrics: BTreeMap::new(),
        }
    }

    /// Build a set from raw entries, applying latest-wins supersession.
    ///
    /// Entries are ordered by `recorded_at` (entries without a timestamp
    /// sort before timestamped ones); ties keep submission order, so a later
    /// position wins.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ScopeMismatch`] if any entry belongs to another
    /// company or period.
    pub fn from_entries(
        company_id: CompanyId,
        reporting_year: ReportingYear,
        entries: &[MetricEntry],
    ) -> Result<Self, CoreError> {
        let mut ordered: Vec<&MetricEntry> = entries.iter().collect();
        // Stable sort: equal timestamps keep their relative order.
        ordered.sort_by_key(|e| e.recorded_at);

        let mut set = Self::new(company_id, reporting_year);
        let mut superseded = 0usize;
        for entry in ordered {
            if set.insert(entry)?.is_some() {
                superseded += 1;
            }
        }
        if superseded > 0 {
            tracing::debug!(
                company_id = %set.company_id,
                reporting_year = %set.reporting_year,
                superseded,
                "applied latest-wins supersession to metric entries"
            );
        }
        Ok(set)
    }

    /// Insert an entry, replacing any current value for the same key.
    ///
    /// Returns the superseded record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ScopeMismatch`] if the entry belongs to another
    /// company or period.
    pub fn insert(&mut self, entry: &MetricEntry) -> Result<Option<MetricRecord>, CoreError> {
        if entry.company_id != self.company_id || entry.reporting_year != self.reporting_year {
            return Err(CoreError::ScopeMismatch {
                metric_key: entry.metric_key.clone(),
                expected_company: self.company_id.to_string(),
                expected_year: self.reporting_year.value(),
                found_company: entry.company_id.to_string(),
                found_year: entry.reporting_year.value(),
            });
        }
        if entry.metric_key.trim().is_empty() {
            return Err(InputError::EmptyMetricKey.into());
        }
        let record = MetricRecord {
            category: entry.category,
            value: entry.value.clone(),
            unit: entry.unit.clone(),
            assurance: entry.assurance,
        };
        Ok(self
            .metrics
            .entry(entry.category)
            .or_default()
            .insert(entry.metric_key.clone(), record))
    }

    /// The reporting company.
    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    /// The reporting period.
    pub fn reporting_year(&self) -> ReportingYear {
        self.reporting_year
    }

    /// Look up a metric in any category. Categories are searched in
    /// canonical order.
    pub fn get(&self, key: &str) -> Option<&MetricRecord> {
        Category::all()
            .iter()
            .find_map(|c| self.metrics.get(c).and_then(|m| m.get(key)))
    }

    /// Look up a metric within one category.
    pub fn get_in(&self, category: Category, key: &str) -> Option<&MetricRecord> {
        self.metrics.get(&category).and_then(|m| m.get(key))
    }

    /// Current value of a metric, filled or not.
    pub fn value(&self, key: &str) -> Option<&MetricValue> {
        self.get(key).map(|r| &r.value)
    }

    /// Numeric value of a filled metric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.value(key)
            .filter(|v| v.is_filled())
            .and_then(MetricValue::as_number)
    }

    /// Whether the metric has a non-empty value.
    pub fn is_filled(&self, key: &str) -> bool {
        self.value(key).is_some_and(MetricValue::is_filled)
    }

    /// All records in one category, in key order.
    pub fn category(&self, category: Category) -> impl Iterator<Item = (&str, &MetricRecord)> {
        self.metrics
            .get(&category)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, r)| (k.as_str(), r)))
    }

    /// All records, in category then key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricRecord)> {
        self.metrics
            .values()
            .flat_map(|m| m.iter().map(|(k, r)| (k.as_str(), r)))
    }

    /// Keys with non-empty values across all categories.
    pub fn filled_keys(&self) -> BTreeSet<&str> {
        self.iter()
            .filter(|(_, r)| r.value.is_filled())
            .map(|(k, _)| k)
            .collect()
    }

    /// Number of filled metrics in a category.
    pub fn filled_count(&self, category: Category) -> usize {
        self.category(category)
            .filter(|(_, r)| r.value.is_filled())
            .count()
    }

    /// Total number of records, filled or not.
    pub fn len(&self) -> usize {
        self.metrics.values().map(BTreeMap::len).sum()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert back into the boundary submission shape.
    pub fn to_submission(&self) -> EsgSubmission {
        let mut submission = EsgSubmission::new(
            self.company_id.as_str(),
            self.reporting_year.value().into(),
        );
        for (key, record) in self.iter() {
            submission = submission.with_metric(record.category, key, record.value.clone());
        }
        submission
    }
}

// ---------------------------------------------------------------------------
// EsgSubmission
// ---------------------------------------------------------------------------

/// The boundary shape submitted by data-entry forms.
///
/// Identifiers are optional at the serde level so that a missing company or
/// year deserializes and is then rejected with a precise [`InputError`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgSubmission {
    /// Reporting company.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Reporting period.
    #[serde(default)]
    pub reporting_year: Option<i64>,
    /// Environmental metrics by key.
    #[serde(default)]
    pub environmental: BTreeMap<String, MetricValue>,
    /// Social metrics by key.
    #[serde(default)]
    pub social: BTreeMap<String, MetricValue>,
    /// Governance metrics by key.
    #[serde(default)]
    pub governance: BTreeMap<String, MetricValue>,
}

impl EsgSubmission {
    /// Create an empty submission for a company and year.
    pub fn new(company_id: impl Into<String>, reporting_year: i64) -> Self {
        Self {
            company_id: Some(company_id.into()),
            reporting_year: Some(reporting_year),
            ..Self::default()
        }
    }

    /// Add or replace a metric.
    pub fn with_metric(
        mut self,
        category: Category,
        key: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> Self {
        self.metrics_mut(category).insert(key.into(), value.into());
        self
    }

    /// Metrics of one category.
    pub fn metrics(&self, category: Category) -> &BTreeMap<String, MetricValue> {
        match category {
            Category::Environmental => &self.environmental,
            Category::Social => &self.social,
            Category::Governance => &self.governance,
        }
    }

    fn metrics_mut(&mut self, category: Category) -> &mut BTreeMap<String, MetricValue> {
        match category {
            Category::Environmental => &mut self.environmental,
            Category::Social => &mut self.social,
            Category::Governance => &mut self.governance,
        }
    }

    /// Validate and return the company and period identifiers.
    ///
    /// # Errors
    ///
    /// [`InputError::MissingCompanyId`], [`InputError::MissingReportingYear`],
    /// or [`InputError::InvalidReportingYear`].
    pub fn identity(&self) -> Result<(CompanyId, ReportingYear), InputError> {
        let company = CompanyId::new(self.company_id.clone().unwrap_or_default())?;
        let year = self.reporting_year.ok_or(InputError::MissingReportingYear)?;
        Ok((company, ReportingYear::new(year)?))
    }

    /// Explode into individual metric entries.
    ///
    /// # Errors
    ///
    /// Input-shape errors from [`EsgSubmission::identity`] or an empty
    /// metric key.
    pub fn entries(&self) -> Result<Vec<MetricEntry>, InputError> {
        let (company, year) = self.identity()?;
        let mut out = Vec::new();
        for &category in Category::all() {
            for (key, value) in self.metrics(category) {
                out.push(MetricEntry::new(
                    company.clone(),
                    year,
                    category,
                    key.as_str(),
                    value.clone(),
                )?);
            }
        }
        Ok(out)
    }

    /// Resolve into a [`MetricSet`].
    ///
    /// # Errors
    ///
    /// Input-shape errors; see [`EsgSubmission::entries`].
    pub fn to_metric_set(&self) -> Result<MetricSet, CoreError> {
        let (company, year) = self.identity()?;
        MetricSet::from_entries(company, year, &self.entries()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn acme() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn fy24() -> ReportingYear {
        ReportingYear::new(2024).unwrap()
    }

    fn entry(key: &str, value: impl Into<MetricValue>) -> MetricEntry {
        MetricEntry::new(acme(), fy24(), Category::Environmental, key, value).unwrap()
    }

    #[test]
    fn value_filled_semantics() {
        assert!(MetricValue::Number(0.0).is_filled());
        assert!(MetricValue::Flag(false).is_filled());
        assert!(!MetricValue::Text(String::new()).is_filled());
        assert!(!MetricValue::Text("   ".into()).is_filled());
        assert!(!MetricValue::Number(f64::NAN).is_filled());
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(MetricValue::from("120").as_number(), Some(120.0));
        assert_eq!(MetricValue::from(" 3.5 ").as_number(), Some(3.5));
        assert_eq!(MetricValue::from("n/a").as_number(), None);
        assert_eq!(MetricValue::from(true).as_number(), Some(1.0));
    }

    #[test]
    fn untagged_deserialization() {
        let v: MetricValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(v, MetricValue::Number(42.5));
        let v: MetricValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, MetricValue::Flag(true));
        let v: MetricValue = serde_json::from_str("\"120\"").unwrap();
        assert_eq!(v, MetricValue::Text("120".into()));
    }

    #[test]
    fn empty_metric_key_rejected() {
        let err = MetricEntry::new(acme(), fy24(), Category::Social, " ", 1.0).unwrap_err();
        assert_eq!(err, InputError::EmptyMetricKey);
    }

    #[test]
    fn later_position_wins_without_timestamps() {
        let set = MetricSet::from_entries(
            acme(),
            fy24(),
            &[entry("scope1Emissions", 100.0), entry("scope1Emissions", 90.0)],
        )
        .unwrap();
        assert_eq!(set.number("scope1Emissions"), Some(90.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn latest_timestamp_wins_regardless_of_position() {
        let newer = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let set = MetricSet::from_entries(
            acme(),
            fy24(),
            &[
                entry("scope1Emissions", 90.0).with_recorded_at(newer),
                entry("scope1Emissions", 100.0).with_recorded_at(older),
            ],
        )
        .unwrap();
        assert_eq!(set.number("scope1Emissions"), Some(90.0));
    }

    #[test]
    fn scope_mismatch_is_rejected() {
        let other = MetricEntry::new(
            CompanyId::new("globex").unwrap(),
            fy24(),
            Category::Social,
            "safetyIncidents",
            1.0,
        )
        .unwrap();
        let err = MetricSet::from_entries(acme(), fy24(), &[other]).unwrap_err();
        assert!(matches!(err, CoreError::ScopeMismatch { .. }));
    }

    #[test]
    fn submission_requires_identity() {
        let missing_company = EsgSubmission {
            reporting_year: Some(2024),
            ..EsgSubmission::default()
        };
        assert_eq!(missing_company.identity().unwrap_err(), InputError::MissingCompanyId);

        let missing_year = EsgSubmission {
            company_id: Some("acme".into()),
            ..EsgSubmission::default()
        };
        assert_eq!(missing_year.identity().unwrap_err(), InputError::MissingReportingYear);
    }

    #[test]
    fn submission_to_set_and_back() {
        let submission = EsgSubmission::new("acme", 2024)
            .with_metric(Category::Environmental, "scope1Emissions", 1200.0)
            .with_metric(Category::Social, "femaleEmployeesPercentage", "42")
            .with_metric(Category::Governance, "antiCorruptionPolicy", true);
        let set = submission.to_metric_set().unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.number("femaleEmployeesPercentage"), Some(42.0));
        assert_eq!(set.filled_count(Category::Governance), 1);
        assert_eq!(set.to_submission(), submission);
    }

    #[test]
    fn submission_deserializes_camel_case() {
        let json = r#"{
            "companyId": "acme",
            "reportingYear": 2024,
            "environmental": {"scope1Emissions": 1200, "renewableEnergyPercentage": "35"},
            "social": {}
        }"#;
        let submission: EsgSubmission = serde_json::from_str(json).unwrap();
        let set = submission.to_metric_set().unwrap();
        assert_eq!(set.number("renewableEnergyPercentage"), Some(35.0));
        assert!(set.get_in(Category::Social, "scope1Emissions").is_none());
    }

    #[test]
    fn empty_string_is_not_filled_in_set() {
        let set = EsgSubmission::new("acme", 2024)
            .with_metric(Category::Environmental, "waterWithdrawal", "")
            .to_metric_set()
            .unwrap();
        assert!(!set.is_filled("waterWithdrawal"));
        assert!(set.filled_keys().is_empty());
        assert_eq!(set.len(), 1);
    }
}
