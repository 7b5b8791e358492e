//! Diabetes-management scorer.

use super::rules::{evaluate, Note, Rule};
use super::BASE_SCORE;
use crate::aggregate::NutrientTotals;
use crate::types::nutrient_ids as ids;
use crate::{glycemic, BloodSugarImpact, FoodEntry};
use serde::Serialize;

/// Daily sodium ceiling in milligrams
pub const SODIUM_LIMIT_MG: f64 = 2300.0;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DiabetesMetrics {
    /// Carbohydrate-weighted GI
    pub glycemic_index: f64,
    pub glycemic_load: f64,
    /// Total carbohydrate grams
    pub carb_load: f64,
    pub fiber: f64,
    pub protein_ratio: f64,
    /// Saturated fat as a share of total fat; 0 when there is no fat
    pub saturated_fat_ratio: f64,
    pub sodium: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DiabetesScore {
    pub score: f64,
    pub blood_sugar_impact: BloodSugarImpact,
    pub metrics: DiabetesMetrics,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

const DIABETES_RULES: &[Rule<DiabetesMetrics>] = &[
    Rule {
        name: "gi_high",
        applies: |m: &DiabetesMetrics| m.glycemic_index > 70.0,
        delta: -25.0,
        note: Some(Note::warn(|m: &DiabetesMetrics| {
            format!(
                "Average glycemic index is high ({:.0}); these foods can spike blood sugar quickly",
                m.glycemic_index
            )
        })),
    },
    Rule { name: "gi_low", applies: |m: &DiabetesMetrics| m.glycemic_index < 55.0, delta: 15.0, note: None },
    Rule {
        name: "gi_medium",
        applies: |m: &DiabetesMetrics| (55.0..=70.0).contains(&m.glycemic_index),
        delta: -5.0,
        note: Some(Note::recommend(|_: &DiabetesMetrics| {
            "Pair medium-GI carbohydrates with protein or healthy fat to blunt the glucose response".to_string()
        })),
    },
    Rule {
        name: "carb_load_high",
        applies: |m: &DiabetesMetrics| m.carb_load > 60.0,
        delta: -15.0,
        note: Some(Note::warn(|m: &DiabetesMetrics| {
            format!(
                "Carbohydrate load of {:.0} g is above 60 g; spread carbohydrates across meals",
                m.carb_load
            )
        })),
    },
    Rule { name: "carb_load_low", applies: |m: &DiabetesMetrics| m.carb_load < 30.0, delta: 10.0, note: None },
    Rule { name: "fiber_high", applies: |m: &DiabetesMetrics| m.fiber > 25.0, delta: 10.0, note: None },
    Rule {
        name: "fiber_low",
        applies: |m: &DiabetesMetrics| m.fiber < 15.0,
        delta: 0.0,
        note: Some(Note::warn(|m: &DiabetesMetrics| {
            format!(
                "Fiber is only {:.1} g; vegetables, legumes and whole grains help stabilize blood sugar",
                m.fiber
            )
        })),
    },
    Rule { name: "protein_high", applies: |m: &DiabetesMetrics| m.protein_ratio > 20.0, delta: 5.0, note: None },
    Rule {
        name: "saturated_fat_high",
        applies: |m: &DiabetesMetrics| m.saturated_fat_ratio > 0.4,
        delta: 0.0,
        note: Some(Note::warn(|m: &DiabetesMetrics| {
            format!(
                "Saturated fat makes up {:.0}% of your fat intake; favor olive oil, nuts and fish",
                m.saturated_fat_ratio * 100.0
            )
        })),
    },
    Rule {
        name: "sodium_high",
        applies: |m: &DiabetesMetrics| m.sodium > SODIUM_LIMIT_MG,
        delta: 0.0,
        note: Some(Note::warn(|m: &DiabetesMetrics| {
            format!(
                "Sodium intake of {:.0} mg exceeds the 2300 mg daily limit",
                m.sodium
            )
        })),
    },
];

/// Blood-sugar impact label from `(GI / 100) × carb load`
pub fn blood_sugar_impact(glycemic_index: f64, carb_load: f64) -> BloodSugarImpact {
    let impact = glycemic_index / 100.0 * carb_load;
    if impact < 15.0 {
        BloodSugarImpact::Minimal
    } else if impact < 30.0 {
        BloodSugarImpact::Moderate
    } else {
        BloodSugarImpact::Significant
    }
}

pub(crate) fn analyze_with_totals(entries: &[FoodEntry], totals: &NutrientTotals) -> DiabetesScore {
    let total_fat = totals.get(ids::FAT);
    let saturated_fat_ratio = if total_fat > 0.0 {
        totals.get(ids::SATURATED_FAT) / total_fat
    } else {
        0.0
    };

    let metrics = DiabetesMetrics {
        glycemic_index: glycemic::weighted_gi(entries),
        glycemic_load: glycemic::glycemic_load(entries),
        carb_load: totals.get(ids::CARBS),
        fiber: totals.get(ids::FIBER),
        protein_ratio: totals.protein_calorie_ratio(),
        saturated_fat_ratio,
        sodium: totals.get(ids::SODIUM),
    };
    let outcome = evaluate(BASE_SCORE, DIABETES_RULES, &metrics);

    tracing::debug!("Diabetes score {} from rules {:?}", outcome.score, outcome.fired);

    DiabetesScore {
        score: outcome.score,
        blood_sugar_impact: blood_sugar_impact(metrics.glycemic_index, metrics.carb_load),
        metrics,
        recommendations: outcome.recommendations,
        warnings: outcome.warnings,
    }
}

/// Score a food list for diabetes management
pub fn analyze_diabetes(entries: &[FoodEntry]) -> DiabetesScore {
    analyze_with_totals(entries, &NutrientTotals::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;

    #[test]
    fn test_high_gi_heavy_meal() {
        let entries = vec![
            entry("white bread", "grains", 530.0, &[("carbs", 98.0), ("fiber", 5.0), ("protein", 18.0)]),
            entry("soda", "beverages", 140.0, &[("carbs", 39.0), ("sodium", 45.0)]),
        ];
        let result = analyze_diabetes(&entries);

        // (75*98 + 63*39) / 137
        assert!(result.metrics.glycemic_index > 70.0);
        assert_eq!(result.metrics.carb_load, 137.0);
        // 50 - 25 - 15
        assert_eq!(result.score, 10.0);
        assert_eq!(result.blood_sugar_impact, BloodSugarImpact::Significant);
        // GI, carb load, fiber
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_low_gi_balanced_meal() {
        let entries = vec![
            entry("lentils", "legumes", 230.0, &[("carbs", 20.0), ("fiber", 16.0), ("protein", 18.0)]),
            entry("broccoli", "vegetables", 55.0, &[("carbs", 6.0), ("fiber", 10.0), ("protein", 4.0)]),
        ];
        let result = analyze_diabetes(&entries);

        // GI (32*20 + 15*6) / 26 ≈ 28, carbs 26, fiber 26, protein 22*4/285 ≈ 30.9%
        // 50 + 15 + 10 + 10 + 5
        assert_eq!(result.score, 90.0);
        assert_eq!(result.blood_sugar_impact, BloodSugarImpact::Minimal);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_medium_gi_band_is_inclusive() {
        let entries = vec![entry("basmati", "grains", 200.0, &[("carbs", 40.0), ("fiber", 20.0)])];
        let result = analyze_diabetes(&entries);
        assert_eq!(result.metrics.glycemic_index, 58.0);
        // 50 - 5 (medium GI), carbs 40 no delta
        assert_eq!(result.score, 45.0);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_fat_and_sodium_warnings() {
        let entries = vec![entry(
            "bacon",
            "protein",
            540.0,
            &[("fat", 42.0), ("saturated-fat", 20.0), ("sodium", 2500.0), ("protein", 37.0)],
        )];
        let result = analyze_diabetes(&entries);
        assert!(result.metrics.saturated_fat_ratio > 0.4);
        assert!(result.warnings.iter().any(|w| w.contains("Saturated fat")));
        assert!(result.warnings.iter().any(|w| w.contains("Sodium")));
    }

    #[test]
    fn test_empty_entries_are_guarded() {
        let result = analyze_diabetes(&[]);
        assert_eq!(result.metrics.glycemic_index, 50.0);
        assert_eq!(result.metrics.saturated_fat_ratio, 0.0);
        // 50 + 15 (GI sentinel < 55) + 10 (no carbs)
        assert_eq!(result.score, 75.0);
        assert_eq!(result.blood_sugar_impact, BloodSugarImpact::Minimal);
    }
}
