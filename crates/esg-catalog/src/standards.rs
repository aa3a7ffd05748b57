//! Disclosure-standard field lists used for completeness scoring.

use esg_core::Framework;
use serde::{Deserialize, Serialize};

/// The fields a disclosure standard expects a report to contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureStandard {
    /// Short identifier (`GRI`, `BRSR`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Framework the standard belongs to.
    pub framework: Framework,
    /// Metric keys that must be reported.
    #[serde(default)]
    pub required: Vec<String>,
    /// Metric keys that should be reported.
    #[serde(default)]
    pub recommended: Vec<String>,
}

impl DisclosureStandard {
    /// Total number of fields, required plus recommended.
    pub fn field_count(&self) -> usize {
        self.required.len() + self.recommended.len()
    }
}

fn standard(
    framework: Framework,
    name: &str,
    required: &[&str],
    recommended: &[&str],
) -> DisclosureStandard {
    DisclosureStandard {
        id: framework.as_str().to_string(),
        name: name.to_string(),
        framework,
        required: required.iter().map(|s| s.to_string()).collect(),
        recommended: recommended.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in standard field lists, one per framework.
pub fn builtin_standards() -> Vec<DisclosureStandard> {
    vec![
        standard(
            Framework::Gri,
            "GRI Standards",
            &[
                "scope1Emissions",
                "scope2Emissions",
                "energyConsumption",
                "waterWithdrawal",
                "wasteGenerated",
                "totalEmployees",
                "employeeTurnoverRate",
                "lostTimeInjuryRate",
                "fatalityRate",
                "femaleEmployeesPercentage",
                "corruptionIncidents",
                "boardSize",
            ],
            &[
                "scope3Emissions",
                "trainingHoursPerEmployee",
                "communityInvestment",
                "renewableEnergyPercentage",
                "ethicsTrainingCompletion",
            ],
        ),
        standard(
            Framework::Sasb,
            "SASB Metals & Mining",
            &[
                "scope1Emissions",
                "energyConsumption",
                "renewableEnergyPercentage",
                "waterWithdrawal",
                "lostTimeInjuryRate",
                "fatalityRate",
                "dataBreaches",
            ],
            &["hazardousWaste", "employeeTurnoverRate"],
        ),
        standard(
            Framework::Tcfd,
            "TCFD Recommendations",
            &[
                "scope1Emissions",
                "scope2Emissions",
                "climateOversightBoard",
                "climateRiskAssessment",
                "emissionsTarget",
            ],
            &["scope3Emissions", "ghgIntensity"],
        ),
        standard(
            Framework::Brsr,
            "Business Responsibility and Sustainability Report",
            &[
                "scope1Emissions",
                "scope2Emissions",
                "energyConsumption",
                "waterWithdrawal",
                "wasteGenerated",
                "totalEmployees",
                "femaleEmployeesPercentage",
                "safetyIncidents",
                "fatalityRate",
                "corruptionIncidents",
                "independentDirectorsPercentage",
                "whistleblowerMechanism",
            ],
            &[
                "renewableEnergyPercentage",
                "trainingHoursPerEmployee",
                "communityInvestment",
                "localProcurementPercentage",
            ],
        ),
        standard(
            Framework::Icmm,
            "ICMM Mining Principles",
            &[
                "scope1Emissions",
                "fatalityRate",
                "lostTimeInjuryRate",
                "tailingsFacilities",
                "landRehabilitated",
                "waterWithdrawal",
                "communityInvestment",
            ],
            &["localProcurementPercentage", "biodiversityAssessments"],
        ),
    ]
}
