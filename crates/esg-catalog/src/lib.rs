//! # esg-catalog — Reference Data for the ESG Compliance Engine
//!
//! The catalog bundles every piece of static reference data the engine
//! evaluates against:
//!
//! - **Threshold rules** per metric key ([`ThresholdRule`]).
//! - **Disclosure standards** with required/recommended field lists
//!   ([`DisclosureStandard`]) for completeness scoring.
//! - **Framework requirements** ([`FrameworkRequirement`]) for GRI, SASB,
//!   TCFD, BRSR and ICMM.
//! - **Alias table** ([`AliasTable`]) from requirement vocabulary to metric
//!   keys.
//!
//! A [`Catalog`] is either built in ([`Catalog::builtin`]) or loaded from a
//! YAML/JSON document at process start ([`Catalog::from_file`]). Both paths
//! go through [`Catalog::from_document`], which validates the whole document
//! and fails on the first inconsistency. A constructed catalog is immutable
//! and safe to share behind an `Arc`.
//!
//! ## Digest
//!
//! Every catalog carries a SHA-256 digest over a domain prefix followed by
//! the canonical JSON serialization of its document. Reports record the
//! digest so a score can always be traced to the reference data it was
//! computed against.

pub mod aliases;
pub mod error;
pub mod parser;
pub mod requirements;
pub mod standards;
pub mod thresholds;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use esg_core::Framework;
use serde::{Deserialize, Serialize};

pub use aliases::{AliasTable, BUILTIN_ALIAS_VERSION};
pub use error::{CatalogError, CatalogResult};
pub use requirements::{FrameworkRequirement, Materiality};
pub use standards::DisclosureStandard;
pub use thresholds::{ThresholdRule, WarningBound};

/// Domain separator prepended to the catalog document before hashing.
const CATALOG_DIGEST_PREFIX: &[u8] = b"esg-catalog-v1\0";

/// Version string of the built-in catalog.
pub const BUILTIN_CATALOG_VERSION: &str = "2024.1";

/// The serialized form of a catalog, as written in YAML or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    /// Catalog version label.
    pub version: String,
    /// Threshold rules by metric key.
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdRule>,
    /// Disclosure standards for completeness scoring.
    #[serde(default)]
    pub standards: Vec<DisclosureStandard>,
    /// Requirements of every framework.
    pub requirements: Vec<FrameworkRequirement>,
    /// Alias table. Defaults to the built-in table when omitted.
    #[serde(default)]
    pub aliases: AliasTable,
}

impl CatalogDocument {
    /// The built-in document.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_CATALOG_VERSION.to_string(),
            thresholds: thresholds::builtin_thresholds(),
            standards: standards::builtin_standards(),
            requirements: requirements::builtin_requirements(),
            aliases: AliasTable::builtin(),
        }
    }
}

/// Validated, indexed reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    document: CatalogDocument,
    by_framework: BTreeMap<Framework, Vec<FrameworkRequirement>>,
    codes_by_metric: BTreeMap<String, BTreeSet<String>>,
    digest: String,
}

impl Catalog {
    /// The built-in catalog.
    ///
    /// # Errors
    ///
    /// Only if the built-in tables are inconsistent, which the test suite
    /// rules out.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_document(CatalogDocument::builtin())
    }

    /// Load a catalog from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// File, parse, or consistency errors. All are startup errors.
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let document: CatalogDocument = parser::load_typed(path)?;
        let catalog = Self::from_document(document)?;
        tracing::info!(
            path = %path.display(),
            version = %catalog.version(),
            digest = %catalog.digest(),
            "loaded catalog from file"
        );
        Ok(catalog)
    }

    /// Validate and index a catalog document.
    ///
    /// # Errors
    ///
    /// The first consistency violation found: a framework with no
    /// requirements, a duplicate or empty requirement, an inconsistent
    /// threshold rule, a duplicate standard, or an invalid alias.
    pub fn from_document(document: CatalogDocument) -> CatalogResult<Self> {
        for (metric, rule) in &document.thresholds {
            rule.check(metric)?;
        }

        let mut seen_standards = BTreeSet::new();
        for standard in &document.standards {
            if !seen_standards.insert(standard.id.as_str()) {
                return Err(CatalogError::DuplicateStandard {
                    standard_id: standard.id.clone(),
                });
            }
        }

        document.aliases.check()?;

        let mut by_framework: BTreeMap<Framework, Vec<FrameworkRequirement>> = BTreeMap::new();
        let mut codes_by_metric: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for requirement in &document.requirements {
            let bucket = by_framework.entry(requirement.framework).or_default();
            if bucket
                .iter()
                .any(|r| r.requirement_id == requirement.requirement_id)
            {
                return Err(CatalogError::DuplicateRequirement {
                    framework: requirement.framework,
                    requirement_id: requirement.requirement_id.clone(),
                });
            }
            if requirement.required_metric_keys.is_empty()
                || requirement
                    .required_metric_keys
                    .iter()
                    .any(|k| k.trim().is_empty())
            {
                return Err(CatalogError::EmptyRequirement {
                    framework: requirement.framework,
                    requirement_id: requirement.requirement_id.clone(),
                });
            }
            for term in &requirement.required_metric_keys {
                codes_by_metric
                    .entry(document.aliases.resolve(term).to_string())
                    .or_default()
                    .insert(requirement.requirement_id.clone());
            }
            bucket.push(requirement.clone());
        }

        for framework in Framework::all() {
            if !by_framework.contains_key(framework) {
                return Err(CatalogError::MissingFramework {
                    framework: *framework,
                });
            }
        }

        let digest = compute_digest(&document)?;
        tracing::debug!(
            version = %document.version,
            requirements = document.requirements.len(),
            thresholds = document.thresholds.len(),
            standards = document.standards.len(),
            %digest,
            "catalog validated"
        );

        Ok(Self {
            document,
            by_framework,
            codes_by_metric,
            digest,
        })
    }

    /// Catalog version label.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Version of the alias table.
    pub fn alias_version(&self) -> &str {
        &self.document.aliases.version
    }

    /// SHA-256 hex digest of the catalog content.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The underlying document, for export.
    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }

    /// Requirements of one framework, in catalog order.
    pub fn requirements(&self, framework: Framework) -> &[FrameworkRequirement] {
        self.by_framework
            .get(&framework)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Look up a requirement by code within a framework.
    pub fn requirement(
        &self,
        framework: Framework,
        requirement_id: &str,
    ) -> Option<&FrameworkRequirement> {
        self.requirements(framework)
            .iter()
            .find(|r| r.requirement_id == requirement_id)
    }

    /// Threshold rule for a metric key.
    pub fn threshold(&self, metric_key: &str) -> Option<&ThresholdRule> {
        self.document.thresholds.get(metric_key)
    }

    /// All threshold rules.
    pub fn thresholds(&self) -> &BTreeMap<String, ThresholdRule> {
        &self.document.thresholds
    }

    /// All disclosure standards.
    pub fn standards(&self) -> &[DisclosureStandard] {
        &self.document.standards
    }

    /// Look up a standard by id.
    pub fn standard(&self, id: &str) -> Option<&DisclosureStandard> {
        self.document.standards.iter().find(|s| s.id == id)
    }

    /// The alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.document.aliases
    }

    /// Resolve a requirement term to a metric key through the alias table.
    pub fn resolve_term<'a>(&'a self, term: &'a str) -> &'a str {
        self.document.aliases.resolve(term)
    }

    /// Requirement codes, across all frameworks, that a metric key feeds.
    ///
    /// `scope1Emissions` → `GRI-305-1`, `SASB-EM-MM-110a.1`, `TCFD-MT-b`, …
    /// Returned in code order.
    pub fn codes_for_metric(&self, metric_key: &str) -> Vec<&str> {
        self.codes_by_metric
            .get(metric_key)
            .map(|codes| codes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

fn compute_digest(document: &CatalogDocument) -> CatalogResult<String> {
    let mut bytes = CATALOG_DIGEST_PREFIX.to_vec();
    bytes.extend(serde_json::to_vec(document)?);
    Ok(parser::sha256_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::Category;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.version(), BUILTIN_CATALOG_VERSION);
        assert_eq!(catalog.alias_version(), "2024.1");
        for fw in Framework::all() {
            assert!(!catalog.requirements(*fw).is_empty());
        }
        assert_eq!(catalog.standards().len(), 5);
    }

    #[test]
    fn digest_is_stable_hex() {
        let a = Catalog::builtin().unwrap();
        let b = Catalog::builtin().unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
        assert!(a.digest().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_changes_with_content() {
        let base = Catalog::builtin().unwrap();
        let mut doc = CatalogDocument::builtin();
        doc.version = "2024.2".to_string();
        let changed = Catalog::from_document(doc).unwrap();
        assert_ne!(base.digest(), changed.digest());
    }

    #[test]
    fn digest_is_domain_separated() {
        let catalog = Catalog::builtin().unwrap();
        let raw = serde_json::to_vec(catalog.document()).unwrap();
        assert_ne!(catalog.digest(), parser::sha256_hex(&raw));
        let prefixed = [CATALOG_DIGEST_PREFIX, raw.as_slice()].concat();
        assert_eq!(catalog.digest(), parser::sha256_hex(&prefixed));
    }

    #[test]
    fn codes_for_metric_spans_frameworks() {
        let catalog = Catalog::builtin().unwrap();
        let codes = catalog.codes_for_metric("scope1Emissions");
        assert!(codes.contains(&"GRI-305-1"));
        assert!(codes.contains(&"SASB-EM-MM-110a.1"));
        assert!(codes.contains(&"TCFD-MT-b"));
        assert!(codes.contains(&"ICMM-P6"));
        assert!(catalog.codes_for_metric("unknownMetric").is_empty());
    }

    #[test]
    fn codes_for_metric_resolves_aliases() {
        let catalog = Catalog::builtin().unwrap();
        let codes = catalog.codes_for_metric("femaleEmployeesPercentage");
        assert!(codes.contains(&"GRI-405-1"));
        assert!(catalog.codes_for_metric("female_employees").is_empty());
    }

    #[test]
    fn requirement_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let r = catalog.requirement(Framework::Gri, "GRI-305-1").unwrap();
        assert_eq!(r.category, Category::Environmental);
        assert!(catalog.requirement(Framework::Sasb, "GRI-305-1").is_none());
    }

    #[test]
    fn missing_framework_fails_load() {
        let mut doc = CatalogDocument::builtin();
        doc.requirements.retain(|r| r.framework != Framework::Icmm);
        let err = Catalog::from_document(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingFramework {
                framework: Framework::Icmm
            }
        ));
    }

    #[test]
    fn duplicate_requirement_fails_load() {
        let mut doc = CatalogDocument::builtin();
        let dup = doc.requirements[0].clone();
        doc.requirements.push(dup);
        assert!(matches!(
            Catalog::from_document(doc),
            Err(CatalogError::DuplicateRequirement { .. })
        ));
    }

    #[test]
    fn empty_requirement_fails_load() {
        let mut doc = CatalogDocument::builtin();
        doc.requirements[0].required_metric_keys.clear();
        assert!(matches!(
            Catalog::from_document(doc),
            Err(CatalogError::EmptyRequirement { .. })
        ));
    }

    #[test]
    fn duplicate_standard_fails_load() {
        let mut doc = CatalogDocument::builtin();
        let dup = doc.standards[0].clone();
        doc.standards.push(dup);
        assert!(matches!(
            Catalog::from_document(doc),
            Err(CatalogError::DuplicateStandard { .. })
        ));
    }

    #[test]
    fn broken_threshold_fails_load() {
        let mut doc = CatalogDocument::builtin();
        doc.thresholds
            .insert("bad".to_string(), ThresholdRule::new(10.0, 1.0));
        assert!(matches!(
            Catalog::from_document(doc),
            Err(CatalogError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn from_file_round_trips_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let doc = CatalogDocument::builtin();
        let builtin = Catalog::builtin().unwrap();

        let yaml_path = dir.path().join("catalog.yaml");
        std::fs::write(&yaml_path, serde_yaml::to_string(&doc).unwrap()).unwrap();
        let from_yaml = Catalog::from_file(&yaml_path).unwrap();
        assert_eq!(from_yaml.document(), builtin.document());

        let json_path = dir.path().join("catalog.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
        let from_json = Catalog::from_file(&json_path).unwrap();
        assert_eq!(from_json.digest(), builtin.digest());
    }

    #[test]
    fn minimal_yaml_document_uses_builtin_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.yaml");
        let mut yaml = String::from("version: custom-1\nrequirements:\n");
        for fw in Framework::all() {
            yaml.push_str(&format!(
                concat!(
                    "  - framework: {fw}\n",
                    "    standardId: S\n",
                    "    requirementId: {fw}-1\n",
                    "    title: T\n",
                    "    category: environmental\n",
                    "    requiredMetricKeys: [renewable_energy]\n",
                    "    materiality: HIGH\n",
                ),
                fw = fw
            ));
        }
        std::fs::write(&path, yaml).unwrap();
        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.version(), "custom-1");
        assert!(catalog.thresholds().is_empty());
        assert_eq!(
            catalog.codes_for_metric("renewableEnergyPercentage").len(),
            5
        );
    }
}
