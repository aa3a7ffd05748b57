//! # Threshold Rules
//!
//! Declarative per-metric plausibility bounds. A rule has a hard domain
//! (`min`/`max`), an optional warning boundary, and an optional critical
//! level. Evaluation lives in `esg-validation`; this module only defines
//! the shape and the built-in table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// A warning boundary: either a scalar high bound or an explicit low/high
/// band.
///
/// In YAML a scalar is written `warning: 25`; a band is written
/// `warning: { low: 20, high: 80 }`, and either side may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WarningBound {
    /// Warn when the value is strictly above this level.
    Above(f64),
    /// Warn when the value is strictly below `low` or strictly above `high`.
    Range {
        /// Lower warning level.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        low: Option<f64>,
        /// Upper warning level.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        high: Option<f64>,
    },
}

impl WarningBound {
    /// Lower warning level, if any.
    pub fn low(&self) -> Option<f64> {
        match self {
            Self::Above(_) => None,
            Self::Range { low, .. } => *low,
        }
    }

    /// Upper warning level, if any.
    pub fn high(&self) -> Option<f64> {
        match self {
            Self::Above(high) => Some(*high),
            Self::Range { high, .. } => *high,
        }
    }

    fn low_only(low: f64) -> Self {
        Self::Range {
            low: Some(low),
            high: None,
        }
    }
}

/// Plausibility rule for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRule {
    /// Smallest in-domain value.
    pub min: f64,
    /// Largest in-domain value.
    pub max: f64,
    /// Warning boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<WarningBound>,
    /// Values at or above this level are critical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<f64>,
    /// Expected unit, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ThresholdRule {
    /// A rule with only a hard domain.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            warning: None,
            critical: None,
            unit: None,
        }
    }

    /// Set a scalar high warning.
    pub fn warn_above(mut self, level: f64) -> Self {
        self.warning = Some(WarningBound::Above(level));
        self
    }

    /// Set a low-only warning.
    pub fn warn_below(mut self, level: f64) -> Self {
        self.warning = Some(WarningBound::low_only(level));
        self
    }

    /// Set a low/high warning band.
    pub fn warn_outside(mut self, low: f64, high: f64) -> Self {
        self.warning = Some(WarningBound::Range {
            low: Some(low),
            high: Some(high),
        });
        self
    }

    /// Set the critical level.
    pub fn critical_at(mut self, level: f64) -> Self {
        self.critical = Some(level);
        self
    }

    /// Set the expected unit.
    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Whether `value` lies within `[min, max]`.
    pub fn in_domain(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidThreshold`] for non-finite levels, an inverted
    /// domain, an inverted warning band, or a critical level outside the
    /// domain.
    pub fn check(&self, metric: &str) -> CatalogResult<()> {
        let invalid = |detail: String| CatalogError::InvalidThreshold {
            metric: metric.to_string(),
            detail,
        };
        let levels = [
            Some(self.min),
            Some(self.max),
            self.warning.as_ref().and_then(WarningBound::low),
            self.warning.as_ref().and_then(WarningBound::high),
            self.critical,
        ];
        if levels.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid("all levels must be finite".to_string()));
        }
        if self.min > self.max {
            return Err(invalid(format!(
                "min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if let Some(bound) = &self.warning {
            match (bound.low(), bound.high()) {
                (None, None) => {
                    return Err(invalid("warning band has neither low nor high".to_string()))
                }
                (Some(low), Some(high)) if low > high => {
                    return Err(invalid(format!(
                        "warning low {low} exceeds warning high {high}"
                    )))
                }
                _ => {}
            }
        }
        if let Some(critical) = self.critical {
            if !self.in_domain(critical) {
                return Err(invalid(format!(
                    "critical level {critical} is outside [{}, {}]",
                    self.min, self.max
                )));
            }
        }
        Ok(())
    }
}

/// The built-in threshold table.
///
/// Zero-tolerance metrics (`fatalityRate`, `corruptionIncidents`,
/// `regulatoryBreaches`) carry only a domain here. Their escalation is a
/// cross-field rule so that exactly one critical alert is raised.
pub fn builtin_thresholds() -> BTreeMap<String, ThresholdRule> {
    let rules = [
        // Environmental
        (
            "scope1Emissions",
            ThresholdRule::new(0.0, 1e8).warn_above(1e7).unit("tCO2e"),
        ),
        (
            "scope2Emissions",
            ThresholdRule::new(0.0, 1e8).warn_above(1e7).unit("tCO2e"),
        ),
        (
            "scope3Emissions",
            ThresholdRule::new(0.0, 1e9).warn_above(1e8).unit("tCO2e"),
        ),
        (
            "energyConsumption",
            ThresholdRule::new(0.0, 1e9).warn_above(1e8).unit("MWh"),
        ),
        (
            "renewableEnergyPercentage",
            ThresholdRule::new(0.0, 100.0).warn_below(10.0).unit("%"),
        ),
        (
            "waterWithdrawal",
            ThresholdRule::new(0.0, 1e10).warn_above(1e9).unit("m3"),
        ),
        ("wasteGenerated", ThresholdRule::new(0.0, 1e9).unit("t")),
        (
            "wasteRecycledPercentage",
            ThresholdRule::new(0.0, 100.0).warn_below(20.0).unit("%"),
        ),
        (
            "emissionsReductionPercentage",
            ThresholdRule::new(-100.0, 100.0).warn_below(0.0).unit("%"),
        ),
        // Social
        (
            "femaleEmployeesPercentage",
            ThresholdRule::new(0.0, 100.0)
                .warn_outside(20.0, 80.0)
                .unit("%"),
        ),
        (
            "employeeTurnoverRate",
            ThresholdRule::new(0.0, 100.0).warn_above(25.0).unit("%"),
        ),
        (
            "trainingHoursPerEmployee",
            ThresholdRule::new(0.0, 1000.0).warn_below(8.0).unit("h"),
        ),
        (
            "lostTimeInjuryRate",
            ThresholdRule::new(0.0, 200.0)
                .warn_above(2.0)
                .critical_at(10.0),
        ),
        ("fatalityRate", ThresholdRule::new(0.0, 100.0)),
        (
            "safetyIncidents",
            ThresholdRule::new(0.0, 1e6).warn_above(10.0),
        ),
        // Governance
        (
            "independentDirectorsPercentage",
            ThresholdRule::new(0.0, 100.0).warn_below(33.0).unit("%"),
        ),
        (
            "femaleDirectorsPercentage",
            ThresholdRule::new(0.0, 100.0).warn_below(30.0).unit("%"),
        ),
        (
            "ethicsTrainingCompletion",
            ThresholdRule::new(0.0, 100.0).warn_below(80.0).unit("%"),
        ),
        (
            "auditCommitteeIndependence",
            ThresholdRule::new(0.0, 100.0).warn_below(100.0).unit("%"),
        ),
        ("corruptionIncidents", ThresholdRule::new(0.0, 1e4)),
        ("regulatoryBreaches", ThresholdRule::new(0.0, 1e4)),
        ("dataBreaches", ThresholdRule::new(0.0, 1e4).critical_at(1.0)),
        ("boardSize", ThresholdRule::new(1.0, 50.0)),
    ];
    rules
        .into_iter()
        .map(|(k, r)| (k.to_string(), r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_consistent() {
        for (metric, rule) in builtin_thresholds() {
            rule.check(&metric).unwrap();
        }
    }

    #[test]
    fn zero_tolerance_metrics_have_no_critical_level() {
        let table = builtin_thresholds();
        for key in ["fatalityRate", "corruptionIncidents", "regulatoryBreaches"] {
            assert!(table[key].critical.is_none(), "{key}");
        }
    }

    #[test]
    fn scalar_warning_is_a_high_bound() {
        let bound = WarningBound::Above(25.0);
        assert_eq!(bound.high(), Some(25.0));
        assert_eq!(bound.low(), None);
    }

    #[test]
    fn warning_deserializes_from_scalar_or_band() {
        let scalar: ThresholdRule =
            serde_yaml::from_str("min: 0\nmax: 100\nwarning: 25\n").unwrap();
        assert_eq!(scalar.warning, Some(WarningBound::Above(25.0)));

        let band: ThresholdRule =
            serde_yaml::from_str("min: 0\nmax: 100\nwarning: { low: 20, high: 80 }\n").unwrap();
        assert_eq!(band.warning.as_ref().and_then(WarningBound::low), Some(20.0));
        assert_eq!(band.warning.as_ref().and_then(WarningBound::high), Some(80.0));

        let low_only: ThresholdRule =
            serde_yaml::from_str("min: 0\nmax: 100\nwarning: { low: 10 }\n").unwrap();
        assert_eq!(low_only.warning.as_ref().and_then(WarningBound::high), None);
    }

    #[test]
    fn inverted_domain_is_rejected() {
        let err = ThresholdRule::new(100.0, 0.0).check("x").unwrap_err();
        assert!(err.to_string().contains("exceeds max"));
    }

    #[test]
    fn inverted_warning_band_is_rejected() {
        let rule = ThresholdRule::new(0.0, 100.0).warn_outside(80.0, 20.0);
        assert!(rule.check("x").is_err());
    }

    #[test]
    fn empty_warning_band_is_rejected() {
        let mut rule = ThresholdRule::new(0.0, 100.0);
        rule.warning = Some(WarningBound::Range {
            low: None,
            high: None,
        });
        assert!(rule.check("x").is_err());
    }

    #[test]
    fn critical_outside_domain_is_rejected() {
        let rule = ThresholdRule::new(0.0, 10.0).critical_at(11.0);
        assert!(rule.check("x").is_err());
    }

    #[test]
    fn non_finite_level_is_rejected() {
        let rule = ThresholdRule::new(0.0, f64::INFINITY);
        assert!(rule.check("x").is_err());
    }
}
