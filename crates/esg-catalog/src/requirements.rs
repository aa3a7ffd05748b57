//! # Framework Requirements
//!
//! One [`FrameworkRequirement`] per disclosure requirement per framework.
//! Required metric keys are written in the requirement's own vocabulary;
//! snake_case terms such as `female_employees` resolve to metric keys
//! through the catalog's alias table.

use std::collections::BTreeSet;

use esg_core::{Category, Framework};
use serde::{Deserialize, Serialize};

use Category::{Environmental as Env, Governance as Gov, Social as Soc};
use Materiality::{High, Low, Medium};

/// How material a requirement is to the framework's disclosure.
///
/// Declared most-material first, so ascending order lists `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Materiality {
    /// Core disclosure.
    High,
    /// Expected disclosure.
    Medium,
    /// Supplementary disclosure.
    Low,
    /// Not applicable to the reporting entity.
    NotApplicable,
}

impl Materiality {
    /// The wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::NotApplicable => "NOT_APPLICABLE",
        }
    }
}

impl std::fmt::Display for Materiality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single disclosure requirement of a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkRequirement {
    /// Framework the requirement belongs to.
    pub framework: Framework,
    /// Standard or topic within the framework (`GRI 305`).
    pub standard_id: String,
    /// Unique requirement code (`GRI-305-1`).
    pub requirement_id: String,
    /// Short title.
    pub title: String,
    /// Pillar the requirement counts towards.
    pub category: Category,
    /// Metric keys (or alias terms) the requirement needs.
    pub required_metric_keys: BTreeSet<String>,
    /// Materiality level.
    pub materiality: Materiality,
}

struct Row(
    &'static str,
    &'static str,
    &'static str,
    Category,
    &'static [&'static str],
    Materiality,
);

fn expand(framework: Framework, rows: &[Row]) -> Vec<FrameworkRequirement> {
    rows.iter()
        .map(|Row(standard, id, title, category, keys, materiality)| FrameworkRequirement {
            framework,
            standard_id: (*standard).to_string(),
            requirement_id: (*id).to_string(),
            title: (*title).to_string(),
            category: *category,
            required_metric_keys: keys.iter().map(|k| (*k).to_string()).collect(),
            materiality: *materiality,
        })
        .collect()
}

fn gri() -> Vec<FrameworkRequirement> {
    expand(
        Framework::Gri,
        &[
            Row(
                "GRI 2",
                "GRI-2-9",
                "Governance structure and composition",
                Gov,
                &["boardSize", "independent_directors"],
                High,
            ),
            Row(
                "GRI 2",
                "GRI-2-26",
                "Mechanisms for seeking advice and raising concerns",
                Gov,
                &["whistleblowerMechanism"],
                Medium,
            ),
            Row(
                "GRI 205",
                "GRI-205-2",
                "Communication and training about anti-corruption",
                Gov,
                &["antiCorruptionPolicy", "ethicsTrainingCompletion"],
                Medium,
            ),
            Row(
                "GRI 205",
                "GRI-205-3",
                "Confirmed incidents of corruption",
                Gov,
                &["corruptionIncidents"],
                High,
            ),
            Row(
                "GRI 302",
                "GRI-302-1",
                "Energy consumption within the organization",
                Env,
                &["energyConsumption", "renewable_energy"],
                High,
            ),
            Row("GRI 303", "GRI-303-3", "Water withdrawal", Env, &["waterWithdrawal"], Medium),
            Row(
                "GRI 305",
                "GRI-305-1",
                "Direct (Scope 1) GHG emissions",
                Env,
                &["scope1Emissions"],
                High,
            ),
            Row(
                "GRI 305",
                "GRI-305-2",
                "Energy indirect (Scope 2) GHG emissions",
                Env,
                &["scope2Emissions"],
                High,
            ),
            Row(
                "GRI 305",
                "GRI-305-3",
                "Other indirect (Scope 3) GHG emissions",
                Env,
                &["scope3Emissions"],
                Medium,
            ),
            Row("GRI 306", "GRI-306-3", "Waste generated", Env, &["wasteGenerated"], Medium),
            Row(
                "GRI 306",
                "GRI-306-4",
                "Waste diverted from disposal",
                Env,
                &["waste_recycled"],
                Medium,
            ),
            Row(
                "GRI 401",
                "GRI-401-1",
                "New employee hires and employee turnover",
                Soc,
                &["totalEmployees", "employeeTurnoverRate"],
                Medium,
            ),
            Row(
                "GRI 403",
                "GRI-403-9",
                "Work-related injuries",
                Soc,
                &["lostTimeInjuryRate", "fatalityRate", "safetyIncidents"],
                High,
            ),
            Row(
                "GRI 404",
                "GRI-404-1",
                "Average hours of training per year per employee",
                Soc,
                &["trainingHoursPerEmployee"],
                Low,
            ),
            Row(
                "GRI 405",
                "GRI-405-1",
                "Diversity of governance bodies and employees",
                Soc,
                &["female_employees", "femaleDirectorsPercentage"],
                High,
            ),
            Row(
                "GRI 413",
                "GRI-413-1",
                "Local community engagement and development programs",
                Soc,
                &["communityInvestment"],
                Low,
            ),
        ],
    )
}

fn sasb() -> Vec<FrameworkRequirement> {
    expand(
        Framework::Sasb,
        &[
            Row(
                "EM-MM-110a",
                "SASB-EM-MM-110a.1",
                "Gross global Scope 1 emissions",
                Env,
                &["scope1Emissions"],
                High,
            ),
            Row(
                "EM-MM-130a",
                "SASB-EM-MM-130a.1",
                "Total energy consumed and percentage renewable",
                Env,
                &["energyConsumption", "renewable_energy"],
                High,
            ),
            Row(
                "EM-MM-140a",
                "SASB-EM-MM-140a.1",
                "Total fresh water withdrawn",
                Env,
                &["waterWithdrawal"],
                High,
            ),
            Row(
                "EM-MM-150a",
                "SASB-EM-MM-150a.4",
                "Total weight of non-mineral and hazardous waste",
                Env,
                &["wasteGenerated", "hazardousWaste"],
                Medium,
            ),
            Row(
                "EM-MM-320a",
                "SASB-EM-MM-320a.1",
                "Workforce health and safety performance",
                Soc,
                &["lostTimeInjuryRate", "fatalityRate"],
                High,
            ),
            Row(
                "EM-MM-510a",
                "SASB-EM-MM-510a.1",
                "Management system for prevention of corruption and bribery",
                Gov,
                &["antiCorruptionPolicy", "corruptionIncidents"],
                Medium,
            ),
        ],
    )
}

fn tcfd() -> Vec<FrameworkRequirement> {
    expand(
        Framework::Tcfd,
        &[
            Row(
                "Governance",
                "TCFD-GOV-a",
                "Board oversight of climate-related risks",
                Gov,
                &["climateOversightBoard"],
                High,
            ),
            Row(
                "Governance",
                "TCFD-GOV-b",
                "Management's role in assessing climate risks",
                Gov,
                &["riskManagementProcess"],
                Medium,
            ),
            Row(
                "Strategy",
                "TCFD-STR-a",
                "Climate-related risks and opportunities identified",
                Env,
                &["climateRiskAssessment"],
                High,
            ),
            Row(
                "Risk Management",
                "TCFD-RM-a",
                "Processes for identifying and assessing climate risks",
                Gov,
                &["climateRiskAssessment", "riskManagementProcess"],
                Medium,
            ),
            Row(
                "Metrics and Targets",
                "TCFD-MT-a",
                "Metrics used to assess climate risks",
                Env,
                &["ghgIntensity"],
                Medium,
            ),
            Row(
                "Metrics and Targets",
                "TCFD-MT-b",
                "Scope 1, 2 and 3 GHG emissions",
                Env,
                &["scope1Emissions", "scope2Emissions", "scope3Emissions"],
                High,
            ),
            Row(
                "Metrics and Targets",
                "TCFD-MT-c",
                "Targets used to manage climate risks",
                Env,
                &["emissionsTarget"],
                Medium,
            ),
        ],
    )
}

fn brsr() -> Vec<FrameworkRequirement> {
    expand(
        Framework::Brsr,
        &[
            Row(
                "Section A",
                "BRSR-A-EMP-1",
                "Employees and workers including differently abled",
                Soc,
                &["totalEmployees", "female_employees"],
                High,
            ),
            Row(
                "Section A",
                "BRSR-A-EMP-2",
                "Turnover rate for permanent employees",
                Soc,
                &["employeeTurnoverRate"],
                Medium,
            ),
            Row(
                "Principle 1",
                "BRSR-P1-E4",
                "Anti-corruption or anti-bribery policy",
                Gov,
                &["antiCorruptionPolicy", "corruptionIncidents"],
                High,
            ),
            Row(
                "Principle 3",
                "BRSR-P3-E11",
                "Safety related incidents",
                Soc,
                &["safetyIncidents", "lostTimeInjuryRate", "fatalityRate"],
                High,
            ),
            Row(
                "Principle 3",
                "BRSR-P3-E8",
                "Training given to employees",
                Soc,
                &["trainingHoursPerEmployee"],
                Low,
            ),
            Row(
                "Principle 6",
                "BRSR-P6-E1",
                "Total energy consumption and energy intensity",
                Env,
                &["energyConsumption", "renewable_energy"],
                High,
            ),
            Row(
                "Principle 6",
                "BRSR-P6-E3",
                "Water withdrawal by source",
                Env,
                &["waterWithdrawal"],
                Medium,
            ),
            Row(
                "Principle 6",
                "BRSR-P6-E7",
                "Scope 1 and Scope 2 emissions",
                Env,
                &["scope1Emissions", "scope2Emissions"],
                High,
            ),
            Row(
                "Principle 6",
                "BRSR-P6-E9",
                "Waste management",
                Env,
                &["wasteGenerated", "waste_recycled"],
                Medium,
            ),
            Row(
                "Principle 8",
                "BRSR-P8-E4",
                "Input material sourced from local suppliers and CSR spend",
                Soc,
                &["communityInvestment"],
                Low,
            ),
            Row(
                "Section B",
                "BRSR-B-GOV",
                "Governance, leadership and oversight",
                Gov,
                &["independent_directors", "whistleblowerMechanism"],
                Medium,
            ),
        ],
    )
}

fn icmm() -> Vec<FrameworkRequirement> {
    expand(
        Framework::Icmm,
        &[
            Row(
                "Principle 1",
                "ICMM-P1",
                "Ethical business",
                Gov,
                &["antiCorruptionPolicy", "corruptionIncidents"],
                High,
            ),
            Row(
                "Principle 2",
                "ICMM-P2",
                "Decision making",
                Gov,
                &["climateOversightBoard", "riskManagementProcess"],
                Medium,
            ),
            Row(
                "Principle 4",
                "ICMM-P4",
                "Risk management and tailings governance",
                Env,
                &["tailingsFacilities"],
                High,
            ),
            Row(
                "Principle 5",
                "ICMM-P5",
                "Health and safety",
                Soc,
                &["fatalityRate", "lostTimeInjuryRate"],
                High,
            ),
            Row(
                "Principle 6",
                "ICMM-P6",
                "Environmental performance",
                Env,
                &["scope1Emissions", "waterWithdrawal"],
                High,
            ),
            Row(
                "Principle 7",
                "ICMM-P7",
                "Conservation of biodiversity",
                Env,
                &["landRehabilitated", "biodiversityAssessments"],
                Medium,
            ),
            Row(
                "Principle 9",
                "ICMM-P9",
                "Social performance",
                Soc,
                &["communityInvestment", "localProcurementPercentage"],
                Medium,
            ),
        ],
    )
}

/// The built-in requirement catalog for every supported framework.
pub fn builtin_requirements() -> Vec<FrameworkRequirement> {
    let mut all = gri();
    all.extend(sasb());
    all.extend(tcfd());
    all.extend(brsr());
    all.extend(icmm());
    all
}
