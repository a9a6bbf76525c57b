//! Threshold-keyed footprint recommendations

use serde::{Deserialize, Serialize};

/// Effort level of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single static advice entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub title: String,
    pub description: String,

    /// Estimated savings if adopted, in kg CO2 per day
    pub potential_savings: f64,

    pub difficulty: Difficulty,
}

impl RecommendationEntry {
    fn new(title: &str, description: &str, potential_savings: f64, difficulty: Difficulty) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            potential_savings,
            difficulty,
        }
    }
}

/// Recommendations plus their combined savings potential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<RecommendationEntry>,
    pub total_potential_savings: f64,
}

/// Advice entries for a daily footprint, highest threshold first.
///
/// Thresholds are independent rather than mutually exclusive: a footprint
/// above all of them collects every entry, and the waste entry is always
/// present.
pub fn recommendations_for(footprint: f64) -> RecommendationSet {
    let mut recommendations = Vec::new();

    if footprint > 10.0 {
        recommendations.push(RecommendationEntry::new(
            "Reduce Transportation",
            "Consider carpooling or using public transport",
            2.5,
            Difficulty::Medium,
        ));
    }

    if footprint > 8.0 {
        recommendations.push(RecommendationEntry::new(
            "Switch to Renewable Energy",
            "Consider solar panels or green energy plans",
            1.8,
            Difficulty::Hard,
        ));
    }

    if footprint > 6.0 {
        recommendations.push(RecommendationEntry::new(
            "Reduce Meat Consumption",
            "Try meatless Mondays or plant-based alternatives",
            1.2,
            Difficulty::Easy,
        ));
    }

    recommendations.push(RecommendationEntry::new(
        "Reduce Waste",
        "Compost organic waste and recycle more",
        0.8,
        Difficulty::Easy,
    ));

    let total_potential_savings = recommendations.iter().map(|r| r.potential_savings).sum();

    RecommendationSet {
        recommendations,
        total_potential_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(set: &RecommendationSet) -> Vec<&str> {
        set.recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect()
    }

    #[test]
    fn test_low_footprint_gets_waste_entry_only() {
        let set = recommendations_for(5.0);

        assert_eq!(titles(&set), ["Reduce Waste"]);
        assert!((set.total_potential_savings - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_high_footprint_gets_all_entries() {
        let set = recommendations_for(12.0);

        assert_eq!(
            titles(&set),
            [
                "Reduce Transportation",
                "Switch to Renewable Energy",
                "Reduce Meat Consumption",
                "Reduce Waste",
            ]
        );
        assert!((set.total_potential_savings - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_are_exclusive_bounds() {
        // Exactly at a threshold the entry is not included.
        assert_eq!(recommendations_for(10.0).recommendations.len(), 3);
        assert_eq!(recommendations_for(8.0).recommendations.len(), 2);
        assert_eq!(recommendations_for(6.0).recommendations.len(), 1);
    }

    #[test]
    fn test_entry_count_is_monotonic_in_footprint() {
        let lower = [0.0, 7.0, 9.0, 11.0];
        for window in lower.windows(2) {
            let smaller = recommendations_for(window[0]);
            let larger = recommendations_for(window[1]);

            assert!(larger.recommendations.len() > smaller.recommendations.len());
            for entry in &smaller.recommendations {
                assert!(
                    larger.recommendations.contains(entry),
                    "entry '{}' dropped at footprint {}",
                    entry.title,
                    window[1]
                );
            }
        }
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
