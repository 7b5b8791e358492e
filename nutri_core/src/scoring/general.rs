//! General-health scorer: inflammation, oxidative stress and metabolic health.

use super::rules::{evaluate, Note, Rule};
use super::{clamp_score, BASE_SCORE};
use crate::aggregate::NutrientTotals;
use crate::scoring::diabetes::SODIUM_LIMIT_MG;
use crate::types::nutrient_ids as ids;
use crate::{glycemic, inflammation, FoodEntry, Level};
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GeneralHealthMetrics {
    pub anti_inflammatory_score: f64,
    /// Antioxidant protection index, 0–100
    pub antioxidant_index: f64,
    pub metabolic_health: f64,
    pub fiber: f64,
    pub sodium: f64,
    pub calories: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GeneralHealthScore {
    pub score: f64,
    pub inflammation_level: Level,
    pub oxidative_stress: Level,
    pub metabolic_health: f64,
    pub metrics: GeneralHealthMetrics,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

const GENERAL_RULES: &[Rule<GeneralHealthMetrics>] = &[
    Rule {
        name: "inflammation_low",
        applies: |m: &GeneralHealthMetrics| m.anti_inflammatory_score > 70.0,
        delta: 15.0,
        note: None,
    },
    Rule {
        name: "inflammation_high",
        applies: |m: &GeneralHealthMetrics| m.anti_inflammatory_score <= 40.0,
        delta: -15.0,
        note: Some(Note::warn(|_: &GeneralHealthMetrics| {
            "Your diet shows a high inflammatory pattern; add oily fish, leafy greens and berries".to_string()
        })),
    },
    Rule {
        name: "oxidative_stress_low",
        applies: |m: &GeneralHealthMetrics| m.antioxidant_index >= 60.0,
        delta: 10.0,
        note: None,
    },
    Rule {
        name: "oxidative_stress_high",
        applies: |m: &GeneralHealthMetrics| m.antioxidant_index < 30.0,
        delta: -10.0,
        note: Some(Note::recommend(|_: &GeneralHealthMetrics| {
            "Eat more colorful fruits and vegetables for vitamin C, vitamin E and antioxidants".to_string()
        })),
    },
    Rule {
        name: "metabolic_health_good",
        applies: |m: &GeneralHealthMetrics| m.metabolic_health > 70.0,
        delta: 10.0,
        note: None,
    },
    Rule {
        name: "metabolic_health_poor",
        applies: |m: &GeneralHealthMetrics| m.metabolic_health < 40.0,
        delta: -10.0,
        note: Some(Note::warn(|m: &GeneralHealthMetrics| {
            format!(
                "Metabolic health indicator is low ({:.0}/100); reduce snacks and refined carbohydrates",
                m.metabolic_health
            )
        })),
    },
    Rule {
        name: "sodium_high",
        applies: |m: &GeneralHealthMetrics| m.sodium > SODIUM_LIMIT_MG,
        delta: -5.0,
        note: Some(Note::warn(|m: &GeneralHealthMetrics| {
            format!("Sodium intake of {:.0} mg exceeds the 2300 mg daily limit", m.sodium)
        })),
    },
    Rule {
        name: "fiber_adequate",
        applies: |m: &GeneralHealthMetrics| m.fiber >= 25.0,
        delta: 5.0,
        note: None,
    },
    Rule {
        name: "nothing_logged",
        applies: |m: &GeneralHealthMetrics| m.calories == 0.0,
        delta: 0.0,
        note: Some(Note::recommend(|_: &GeneralHealthMetrics| {
            "Log your meals to get a personalized health assessment".to_string()
        })),
    },
];

/// Inflammation level from the anti-inflammatory score
pub fn inflammation_level(anti_inflammatory_score: f64) -> Level {
    if anti_inflammatory_score > 70.0 {
        Level::Low
    } else if anti_inflammatory_score > 40.0 {
        Level::Moderate
    } else {
        Level::High
    }
}

/// Oxidative stress from the antioxidant protection index
pub fn oxidative_stress(antioxidant_index: f64) -> Level {
    if antioxidant_index >= 60.0 {
        Level::Low
    } else if antioxidant_index >= 30.0 {
        Level::Moderate
    } else {
        Level::High
    }
}

fn count_category(entries: &[FoodEntry], singular: &str, plural: &str) -> usize {
    entries
        .iter()
        .filter(|e| e.is_category(singular) || e.is_category(plural))
        .count()
}

/// Antioxidant protection index (0–100) from vitamins C and E, the
/// antioxidant total, and fruit/vegetable entry counts
fn antioxidant_index(entries: &[FoodEntry], totals: &NutrientTotals) -> f64 {
    fn share(amount: f64, target: f64, points: f64) -> f64 {
        (amount / target).clamp(0.0, 1.0) * points
    }

    let fruits = count_category(entries, "fruit", "fruits") as f64;
    let vegetables = count_category(entries, "vegetable", "vegetables") as f64;

    share(totals.get(ids::VITAMIN_C), 75.0, 25.0)
        + share(totals.get(ids::VITAMIN_E), 15.0, 20.0)
        + share(totals.get(ids::ANTIOXIDANTS), 10.0, 15.0)
        + (fruits * 5.0).min(20.0)
        + (vegetables * 5.0).min(20.0)
}

fn metabolic_health_with(entries: &[FoodEntry], totals: &NutrientTotals) -> f64 {
    let gi = glycemic::weighted_gi(entries);
    let protein_ratio = totals.protein_calorie_ratio();
    let fiber = totals.get(ids::FIBER);
    let snacks = count_category(entries, "snack", "snacks") as f64;

    let mut score = BASE_SCORE;
    if gi < 55.0 {
        score += 15.0;
    } else if gi > 70.0 {
        score -= 15.0;
    }
    if protein_ratio >= 20.0 {
        score += 10.0;
    } else if protein_ratio >= 15.0 {
        score += 5.0;
    }
    if fiber >= 25.0 {
        score += 15.0;
    } else if fiber >= 15.0 {
        score += 5.0;
    } else if fiber < 10.0 {
        score -= 10.0;
    }
    score -= snacks * 5.0;

    clamp_score(score)
}

/// Metabolic health indicator (0–100). Each snack-category entry costs 5 points.
pub fn metabolic_health(entries: &[FoodEntry]) -> f64 {
    metabolic_health_with(entries, &NutrientTotals::from_entries(entries))
}

pub(crate) fn analyze_with_totals(entries: &[FoodEntry], totals: &NutrientTotals) -> GeneralHealthScore {
    let metrics = GeneralHealthMetrics {
        anti_inflammatory_score: inflammation::anti_inflammatory_score(entries),
        antioxidant_index: antioxidant_index(entries, totals),
        metabolic_health: metabolic_health_with(entries, totals),
        fiber: totals.get(ids::FIBER),
        sodium: totals.get(ids::SODIUM),
        calories: totals.calories,
    };
    let outcome = evaluate(BASE_SCORE, GENERAL_RULES, &metrics);

    tracing::debug!("General health score {} from rules {:?}", outcome.score, outcome.fired);

    GeneralHealthScore {
        score: outcome.score,
        inflammation_level: inflammation_level(metrics.anti_inflammatory_score),
        oxidative_stress: oxidative_stress(metrics.antioxidant_index),
        metabolic_health: metrics.metabolic_health,
        metrics,
        recommendations: outcome.recommendations,
        warnings: outcome.warnings,
    }
}

/// Score a food list for general health indicators
pub fn analyze_general_health(entries: &[FoodEntry]) -> GeneralHealthScore {
    analyze_with_totals(entries, &NutrientTotals::from_entries(entries))
}
