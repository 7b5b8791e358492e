//! PCOS-management scorer.
//!
//! Focuses on insulin response (glycemic load), inflammation and the
//! nutrients that support hormone balance.

use super::rules::{evaluate, Note, Rule};
use super::BASE_SCORE;
use crate::aggregate::NutrientTotals;
use crate::types::nutrient_ids as ids;
use crate::{glycemic, inflammation, FoodEntry, Level};
use serde::Serialize;

/// Inputs to the hormone-support sub-score
struct HormoneInputs {
    fiber: f64,
    protein_ratio: f64,
    magnesium: f64,
    vitamin_d: f64,
}

const HORMONE_SUPPORT_RULES: &[Rule<HormoneInputs>] = &[
    Rule { name: "fiber_adequate", applies: |m: &HormoneInputs| m.fiber >= 25.0, delta: 15.0, note: None },
    Rule { name: "fiber_low", applies: |m: &HormoneInputs| m.fiber < 15.0, delta: -10.0, note: None },
    Rule { name: "protein_high", applies: |m: &HormoneInputs| m.protein_ratio >= 20.0, delta: 10.0, note: None },
    Rule {
        name: "protein_moderate",
        applies: |m: &HormoneInputs| m.protein_ratio >= 15.0 && m.protein_ratio < 20.0,
        delta: 5.0,
        note: None,
    },
    Rule { name: "magnesium_adequate", applies: |m: &HormoneInputs| m.magnesium >= 310.0, delta: 10.0, note: None },
    Rule { name: "vitamin_d_adequate", applies: |m: &HormoneInputs| m.vitamin_d >= 15.0, delta: 10.0, note: None },
    Rule {
        name: "vitamin_d_some",
        applies: |m: &HormoneInputs| m.vitamin_d > 0.0 && m.vitamin_d < 15.0,
        delta: 5.0,
        note: None,
    },
];

fn hormone_support(totals: &NutrientTotals) -> f64 {
    let inputs = HormoneInputs {
        fiber: totals.get(ids::FIBER),
        protein_ratio: totals.protein_calorie_ratio(),
        magnesium: totals.get(ids::MAGNESIUM),
        vitamin_d: totals.get(ids::VITAMIN_D),
    };
    evaluate(BASE_SCORE, HORMONE_SUPPORT_RULES, &inputs).score
}

/// Hormone-support score (0–100) from fiber, protein share, magnesium and vitamin D
pub fn hormone_support_score(entries: &[FoodEntry]) -> f64 {
    hormone_support(&NutrientTotals::from_entries(entries))
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PcosMetrics {
    pub glycemic_load: f64,
    pub anti_inflammatory_score: f64,
    pub hormone_support_score: f64,
    pub fiber: f64,
    pub protein_ratio: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PcosScore {
    pub score: f64,
    pub insulin_impact: Level,
    pub metrics: PcosMetrics,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

const PCOS_RULES: &[Rule<PcosMetrics>] = &[
    Rule {
        name: "glycemic_load_high",
        applies: |m: &PcosMetrics| m.glycemic_load > 20.0,
        delta: -20.0,
        note: Some(Note::warn(|m: &PcosMetrics| {
            format!(
                "High glycemic load ({:.1}) can worsen insulin resistance; swap refined carbs for whole grains and legumes",
                m.glycemic_load
            )
        })),
    },
    Rule { name: "glycemic_load_low", applies: |m: &PcosMetrics| m.glycemic_load < 10.0, delta: 15.0, note: None },
    Rule {
        name: "anti_inflammatory_high",
        applies: |m: &PcosMetrics| m.anti_inflammatory_score > 70.0,
        delta: 15.0,
        note: None,
    },
    Rule {
        name: "anti_inflammatory_low",
        applies: |m: &PcosMetrics| m.anti_inflammatory_score < 30.0,
        delta: -10.0,
        note: Some(Note::warn(|_: &PcosMetrics| {
            "Your meals lean pro-inflammatory; cut back on fried and processed foods".to_string()
        })),
    },
    Rule {
        name: "hormone_support_high",
        applies: |m: &PcosMetrics| m.hormone_support_score > 70.0,
        delta: 10.0,
        note: None,
    },
    Rule {
        name: "hormone_support_low",
        applies: |m: &PcosMetrics| m.hormone_support_score < 40.0,
        delta: -10.0,
        note: Some(Note::recommend(|_: &PcosMetrics| {
            "Support hormone balance with magnesium-rich foods (leafy greens, nuts, seeds) and vitamin D sources (oily fish, eggs)".to_string()
        })),
    },
    Rule {
        name: "fiber_low",
        applies: |m: &PcosMetrics| m.fiber < 25.0,
        delta: 0.0,
        note: Some(Note::warn(|m: &PcosMetrics| {
            format!(
                "Fiber intake is {:.1} g; aim for at least 25 g to slow glucose absorption",
                m.fiber
            )
        })),
    },
    Rule {
        name: "protein_low",
        applies: |m: &PcosMetrics| m.protein_ratio < 15.0,
        delta: 0.0,
        note: Some(Note::recommend(|m: &PcosMetrics| {
            format!(
                "Protein provides {:.0}% of calories; include lean protein with each meal to reach 15-20%",
                m.protein_ratio
            )
        })),
    },
    Rule { name: "protein_high", applies: |m: &PcosMetrics| m.protein_ratio > 20.0, delta: 5.0, note: None },
];

/// Insulin impact label from glycemic load
pub fn insulin_impact(glycemic_load: f64) -> Level {
    if glycemic_load < 10.0 {
        Level::Low
    } else if glycemic_load < 20.0 {
        Level::Moderate
    } else {
        Level::High
    }
}

pub(crate) fn analyze_with_totals(entries: &[FoodEntry], totals: &NutrientTotals) -> PcosScore {
    let metrics = PcosMetrics {
        glycemic_load: glycemic::glycemic_load(entries),
        anti_inflammatory_score: inflammation::anti_inflammatory_score(entries),
        hormone_support_score: hormone_support(totals),
        fiber: totals.get(ids::FIBER),
        protein_ratio: totals.protein_calorie_ratio(),
    };
    let outcome = evaluate(BASE_SCORE, PCOS_RULES, &metrics);

    tracing::debug!("PCOS score {} from rules {:?}", outcome.score, outcome.fired);

    PcosScore {
        score: outcome.score,
        insulin_impact: insulin_impact(metrics.glycemic_load),
        metrics,
        recommendations: outcome.recommendations,
        warnings: outcome.warnings,
    }
}

/// Score a food list for PCOS management
pub fn analyze_pcos(entries: &[FoodEntry]) -> PcosScore {
    analyze_with_totals(entries, &NutrientTotals::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;

    #[test]
    fn test_high_glycemic_load_only() {
        // GI 50 (no table or category match) x 50 g carbs = GL 25.
        // Protein 20 g over 500 kcal = 16%, fiber 20 g: no other delta fires.
        let entries = vec![entry(
            "mystery casserole",
            "other",
            500.0,
            &[("carbs", 50.0), ("protein", 20.0), ("fiber", 20.0)],
        )];
        let result = analyze_pcos(&entries);

        assert!((result.metrics.glycemic_load - 25.0).abs() < 1e-9);
        assert_eq!(result.metrics.anti_inflammatory_score, 50.0);
        assert_eq!(result.metrics.hormone_support_score, 55.0);
        assert_eq!(result.score, 30.0);
        assert_eq!(result.insulin_impact, Level::High);
        assert_eq!(result.warnings.len(), 2); // glycemic load + fiber
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_supportive_day_scores_high() {
        let entries = vec![
            entry(
                "grilled salmon",
                "protein",
                400.0,
                &[("protein", 40.0), ("vitamin-d", 16.0), ("magnesium", 120.0)],
            ),
            entry(
                "spinach and walnut salad",
                "vegetables",
                250.0,
                &[("carbs", 8.0), ("fiber", 14.0), ("magnesium", 200.0), ("protein", 6.0)],
            ),
            entry(
                "blueberries",
                "fruits",
                80.0,
                &[("carbs", 14.0), ("fiber", 12.0)],
            ),
        ];
        let result = analyze_pcos(&entries);

        // GL: 8*15/100 + 14*53/100 = 1.2 + 7.42
        assert!(result.metrics.glycemic_load < 10.0);
        assert_eq!(result.insulin_impact, Level::Low);
        // 50 + 8 (salmon) + 6 (walnut) + 3 (veg) + 6 (blueberries) + 2 (fruit)
        assert_eq!(result.metrics.anti_inflammatory_score, 75.0);
        // 50 + 15 fiber + 10 protein + 10 magnesium + 10 vitamin D
        assert_eq!(result.metrics.hormone_support_score, 95.0);
        // 50 + 15 + 15 + 10 + 5
        assert_eq!(result.score, 95.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_entries() {
        let result = analyze_pcos(&[]);
        // GL 0 (+15), hormone 40 (fiber < 15), fiber warning, protein recommendation
        assert_eq!(result.metrics.hormone_support_score, 40.0);
        assert_eq!(result.score, 65.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_insulin_impact_thresholds() {
        assert_eq!(insulin_impact(9.9), Level::Low);
        assert_eq!(insulin_impact(10.0), Level::Moderate);
        assert_eq!(insulin_impact(19.9), Level::Moderate);
        assert_eq!(insulin_impact(20.0), Level::High);
    }

    #[test]
    fn test_hormone_support_score_public_fn() {
        assert_eq!(hormone_support_score(&[]), 40.0);
    }
}
