//! Improvement recommendations for weak pillars.

use esg_core::Category;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::pillars::PillarScore;

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Pillar is below the high-priority threshold.
    High,
    /// Pillar is below the recommendation threshold.
    Medium,
}

/// A suggested action for one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Priority.
    pub priority: Priority,
    /// Pillar the action targets.
    pub category: Category,
    /// What to do.
    pub action: String,
    /// Expected effect on the composite.
    pub impact: String,
}

fn action(pillar: &PillarScore) -> String {
    if !pillar.has_data() {
        return format!(
            "Begin reporting {} indicators; the pillar currently scores 0 for lack of data",
            pillar.pillar
        );
    }
    match pillar.pillar {
        Category::Environmental => {
            "Increase renewable energy sourcing, raise waste recycling rates, \
             and set verified emissions reduction targets"
        }
        Category::Social => {
            "Broaden workforce diversity and strengthen occupational safety programs \
             to reduce recordable incidents"
        }
        Category::Governance => {
            "Raise board and audit committee independence and extend ethics training coverage"
        }
    }
    .to_string()
}

/// Recommendations for every pillar below the configured threshold, high
/// priority first, then in pillar order.
pub fn recommend(pillars: &[PillarScore], config: &ScoringConfig) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = pillars
        .iter()
        .filter(|p| p.score < config.recommendation_threshold)
        .map(|p| {
            let gap = f64::from(config.recommendation_threshold - p.score);
            let gain = config.weights.get(p.pillar) * gap;
            Recommendation {
                priority: if p.score < config.high_priority_threshold {
                    Priority::High
                } else {
                    Priority::Medium
                },
                category: p.pillar,
                action: action(p),
                impact: format!(
                    "Raising {} from {} to {} would add about {:.0} points to the composite score",
                    p.pillar, p.score, config.recommendation_threshold, gain
                ),
            }
        })
        .collect();
    out.sort_by_key(|r| (r.priority, r.category));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pillar(pillar: Category, score: u8) -> PillarScore {
        PillarScore {
            pillar,
            score,
            metrics_used: 1,
            components: BTreeMap::new(),
        }
    }

    #[test]
    fn only_pillars_below_threshold() {
        let recs = recommend(
            &[
                pillar(Category::Environmental, 85),
                pillar(Category::Social, 70),
                pillar(Category::Governance, 69),
            ],
            &ScoringConfig::default(),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, Category::Governance);
        assert_eq!(recs[0].priority, Priority::Medium);
    }

    #[test]
    fn high_priority_first() {
        let recs = recommend(
            &[
                pillar(Category::Environmental, 55),
                pillar(Category::Social, 20),
                pillar(Category::Governance, 39),
            ],
            &ScoringConfig::default(),
        );
        let order: Vec<(Priority, Category)> =
            recs.iter().map(|r| (r.priority, r.category)).collect();
        assert_eq!(
            order,
            vec![
                (Priority::High, Category::Social),
                (Priority::High, Category::Governance),
                (Priority::Medium, Category::Environmental),
            ]
        );
    }

    #[test]
    fn impact_reflects_weight() {
        let recs = recommend(&[pillar(Category::Environmental, 20)], &ScoringConfig::default());
        // 0.4 × (70 − 20) = 20
        assert!(recs[0].impact.contains("about 20 points"));
    }

    #[test]
    fn missing_data_gets_reporting_action() {
        let mut p = pillar(Category::Social, 0);
        p.metrics_used = 0;
        let recs = recommend(&[p], &ScoringConfig::default());
        assert!(recs[0].action.starts_with("Begin reporting social"));
    }
}
