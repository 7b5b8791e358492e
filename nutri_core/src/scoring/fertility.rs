//! Female and male fertility scorers.
//!
//! Both share one evaluator driven by a [`FertilityProfile`]: a main rule
//! table over micronutrient totals, separate rule tables for the
//! reproductive-health and hormonal-balance sub-scores, and keyword lists of
//! supportive and harmful foods found in entry names.

use super::rules::{evaluate, Note, Rule};
use super::BASE_SCORE;
use crate::aggregate::NutrientTotals;
use crate::types::nutrient_ids as ids;
use crate::units::contains_word;
use crate::{glycemic, FoodEntry, NutritionalSupport};
use serde::Serialize;

const FERTILITY_FOOD_BONUS: f64 = 3.0;
const FERTILITY_FOOD_CAP: f64 = 15.0;
const HARMFUL_FOOD_PENALTY: f64 = 5.0;
const HARMFUL_FOOD_CAP: f64 = 20.0;

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct FertilityMetrics {
    pub folate: f64,
    pub iron: f64,
    pub zinc: f64,
    pub selenium: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
    pub vitamin_e: f64,
    pub omega_3: f64,
    pub antioxidants: f64,
    pub glycemic_load: f64,
    /// Distinct fertility-supporting foods found in entry names
    pub fertility_foods: usize,
    /// Distinct harmful foods found in entry names
    pub harmful_foods: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FertilityScore {
    pub score: f64,
    pub reproductive_health: f64,
    pub hormonal_balance: f64,
    pub nutritional_support: NutritionalSupport,
    pub metrics: FertilityMetrics,
    pub fertility_foods_found: Vec<String>,
    pub harmful_foods_found: Vec<String>,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Everything that distinguishes one fertility scorer from another
pub struct FertilityProfile {
    pub label: &'static str,
    pub rules: &'static [Rule<FertilityMetrics>],
    pub reproductive_rules: &'static [Rule<FertilityMetrics>],
    pub hormonal_rules: &'static [Rule<FertilityMetrics>],
    pub fertility_foods: &'static [&'static str],
    pub harmful_foods: &'static [&'static str],
}

const SHARED_HARMFUL_FOODS: &[&str] = &[
    "alcohol", "beer", "wine", "vodka", "whiskey", "soda", "energy drink", "fried", "fries",
    "trans fat", "processed", "hot dog", "bacon", "sausage",
];

// ============================================================================
// Female Profile
// ============================================================================

const FEMALE_RULES: &[Rule<FertilityMetrics>] = &[
    Rule { name: "folate_adequate", applies: |m: &FertilityMetrics| m.folate >= 400.0, delta: 10.0, note: None },
    Rule {
        name: "folate_low",
        applies: |m: &FertilityMetrics| m.folate < 200.0,
        delta: -5.0,
        note: Some(Note::recommend(|m: &FertilityMetrics| {
            format!(
                "Folate is {:.0} mcg; aim for 400 mcg from leafy greens, lentils and fortified grains",
                m.folate
            )
        })),
    },
    Rule { name: "iron_adequate", applies: |m: &FertilityMetrics| m.iron >= 18.0, delta: 8.0, note: None },
    Rule {
        name: "iron_low",
        applies: |m: &FertilityMetrics| m.iron < 9.0,
        delta: -4.0,
        note: Some(Note::recommend(|m: &FertilityMetrics| {
            format!(
                "Iron is {:.1} mg; add spinach, lentils or lean red meat with a vitamin C source",
                m.iron
            )
        })),
    },
    Rule { name: "vitamin_d_adequate", applies: |m: &FertilityMetrics| m.vitamin_d >= 15.0, delta: 8.0, note: None },
    Rule {
        name: "vitamin_d_low",
        applies: |m: &FertilityMetrics| m.vitamin_d < 7.5,
        delta: -4.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "Include vitamin D sources such as salmon, eggs or fortified milk".to_string()
        })),
    },
    Rule { name: "omega_3_adequate", applies: |m: &FertilityMetrics| m.omega_3 >= 1.1, delta: 8.0, note: None },
    Rule {
        name: "omega_3_low",
        applies: |m: &FertilityMetrics| m.omega_3 < 0.55,
        delta: -4.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "Add omega-3 fats from oily fish, walnuts, chia or flax seeds".to_string()
        })),
    },
    Rule { name: "antioxidants_adequate", applies: |m: &FertilityMetrics| m.antioxidants >= 10.0, delta: 6.0, note: None },
    Rule {
        name: "antioxidants_low",
        applies: |m: &FertilityMetrics| m.antioxidants < 5.0,
        delta: -3.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "Berries, dark leafy greens and nuts supply antioxidants that protect egg quality".to_string()
        })),
    },
    Rule {
        name: "glycemic_load_high",
        applies: |m: &FertilityMetrics| m.glycemic_load > 20.0,
        delta: -5.0,
        note: Some(Note::warn(|m: &FertilityMetrics| {
            format!(
                "High glycemic load ({:.1}) may disrupt ovulation; choose low-GI carbohydrates",
                m.glycemic_load
            )
        })),
    },
];

const FEMALE_REPRODUCTIVE_RULES: &[Rule<FertilityMetrics>] = &[
    Rule { name: "folate_adequate", applies: |m: &FertilityMetrics| m.folate >= 400.0, delta: 15.0, note: None },
    Rule { name: "folate_low", applies: |m: &FertilityMetrics| m.folate < 200.0, delta: -10.0, note: None },
    Rule { name: "iron_adequate", applies: |m: &FertilityMetrics| m.iron >= 18.0, delta: 10.0, note: None },
    Rule { name: "iron_low", applies: |m: &FertilityMetrics| m.iron < 9.0, delta: -10.0, note: None },
    Rule { name: "antioxidants_adequate", applies: |m: &FertilityMetrics| m.antioxidants >= 10.0, delta: 10.0, note: None },
    Rule { name: "fertility_foods_many", applies: |m: &FertilityMetrics| m.fertility_foods >= 3, delta: 10.0, note: None },
    Rule { name: "fertility_foods_none", applies: |m: &FertilityMetrics| m.fertility_foods == 0, delta: -5.0, note: None },
];

const FEMALE_HORMONAL_RULES: &[Rule<FertilityMetrics>] = &[
    Rule { name: "vitamin_d_adequate", applies: |m: &FertilityMetrics| m.vitamin_d >= 15.0, delta: 15.0, note: None },
    Rule { name: "vitamin_d_low", applies: |m: &FertilityMetrics| m.vitamin_d < 7.5, delta: -10.0, note: None },
    Rule { name: "omega_3_adequate", applies: |m: &FertilityMetrics| m.omega_3 >= 1.1, delta: 15.0, note: None },
    Rule { name: "omega_3_low", applies: |m: &FertilityMetrics| m.omega_3 < 0.55, delta: -10.0, note: None },
    Rule { name: "glycemic_load_high", applies: |m: &FertilityMetrics| m.glycemic_load > 20.0, delta: -10.0, note: None },
    Rule { name: "glycemic_load_low", applies: |m: &FertilityMetrics| m.glycemic_load < 10.0, delta: 5.0, note: None },
    Rule { name: "harmful_foods", applies: |m: &FertilityMetrics| m.harmful_foods > 0, delta: -10.0, note: None },
];

pub const FEMALE_PROFILE: FertilityProfile = FertilityProfile {
    label: "female",
    rules: FEMALE_RULES,
    reproductive_rules: FEMALE_REPRODUCTIVE_RULES,
    hormonal_rules: FEMALE_HORMONAL_RULES,
    fertility_foods: &[
        "spinach", "kale", "lentil", "beans", "chickpea", "salmon", "sardine", "avocado", "walnut",
        "berries", "blueberries", "strawberries", "raspberries", "greek yogurt", "egg",
        "sweet potato", "quinoa", "pumpkin seed",
    ],
    harmful_foods: SHARED_HARMFUL_FOODS,
};

// ============================================================================
// Male Profile
// ============================================================================

const MALE_RULES: &[Rule<FertilityMetrics>] = &[
    Rule { name: "zinc_adequate", applies: |m: &FertilityMetrics| m.zinc >= 11.0, delta: 10.0, note: None },
    Rule {
        name: "zinc_low",
        applies: |m: &FertilityMetrics| m.zinc < 5.5,
        delta: -5.0,
        note: Some(Note::recommend(|m: &FertilityMetrics| {
            format!(
                "Zinc is {:.1} mg; oysters, pumpkin seeds and beef support sperm production",
                m.zinc
            )
        })),
    },
    Rule { name: "selenium_adequate", applies: |m: &FertilityMetrics| m.selenium >= 55.0, delta: 8.0, note: None },
    Rule {
        name: "selenium_low",
        applies: |m: &FertilityMetrics| m.selenium < 27.5,
        delta: -4.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "A couple of Brazil nuts or a serving of fish covers daily selenium".to_string()
        })),
    },
    Rule { name: "vitamin_c_adequate", applies: |m: &FertilityMetrics| m.vitamin_c >= 90.0, delta: 6.0, note: None },
    Rule {
        name: "vitamin_c_low",
        applies: |m: &FertilityMetrics| m.vitamin_c < 45.0,
        delta: -3.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "Add citrus, berries or peppers for vitamin C".to_string()
        })),
    },
    Rule { name: "vitamin_e_adequate", applies: |m: &FertilityMetrics| m.vitamin_e >= 15.0, delta: 6.0, note: None },
    Rule {
        name: "vitamin_e_low",
        applies: |m: &FertilityMetrics| m.vitamin_e < 7.5,
        delta: -3.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "Almonds, sunflower seeds and spinach are good vitamin E sources".to_string()
        })),
    },
    Rule { name: "folate_adequate", applies: |m: &FertilityMetrics| m.folate >= 400.0, delta: 5.0, note: None },
    Rule {
        name: "folate_low",
        applies: |m: &FertilityMetrics| m.folate < 200.0,
        delta: -3.0,
        note: Some(Note::recommend(|m: &FertilityMetrics| {
            format!("Folate is {:.0} mcg; leafy greens and legumes raise it", m.folate)
        })),
    },
    Rule { name: "antioxidants_adequate", applies: |m: &FertilityMetrics| m.antioxidants >= 10.0, delta: 5.0, note: None },
    Rule {
        name: "antioxidants_low",
        applies: |m: &FertilityMetrics| m.antioxidants < 5.0,
        delta: -3.0,
        note: Some(Note::recommend(|_: &FertilityMetrics| {
            "Antioxidant-rich foods like walnuts, tomatoes and pomegranate protect sperm DNA".to_string()
        })),
    },
    Rule {
        name: "glycemic_load_high",
        applies: |m: &FertilityMetrics| m.glycemic_load > 20.0,
        delta: -5.0,
        note: Some(Note::warn(|m: &FertilityMetrics| {
            format!(
                "High glycemic load ({:.1}) is linked to lower testosterone; choose low-GI carbohydrates",
                m.glycemic_load
            )
        })),
    },
];

const MALE_REPRODUCTIVE_RULES: &[Rule<FertilityMetrics>] = &[
    Rule { name: "zinc_adequate", applies: |m: &FertilityMetrics| m.zinc >= 11.0, delta: 15.0, note: None },
    Rule { name: "zinc_low", applies: |m: &FertilityMetrics| m.zinc < 5.5, delta: -10.0, note: None },
    Rule { name: "selenium_adequate", applies: |m: &FertilityMetrics| m.selenium >= 55.0, delta: 15.0, note: None },
    Rule { name: "selenium_low", applies: |m: &FertilityMetrics| m.selenium < 27.5, delta: -10.0, note: None },
    Rule { name: "vitamin_c_adequate", applies: |m: &FertilityMetrics| m.vitamin_c >= 90.0, delta: 5.0, note: None },
    Rule { name: "vitamin_e_adequate", applies: |m: &FertilityMetrics| m.vitamin_e >= 15.0, delta: 5.0, note: None },
    Rule { name: "antioxidants_adequate", applies: |m: &FertilityMetrics| m.antioxidants >= 10.0, delta: 5.0, note: None },
    Rule { name: "fertility_foods_many", applies: |m: &FertilityMetrics| m.fertility_foods >= 3, delta: 10.0, note: None },
];

const MALE_HORMONAL_RULES: &[Rule<FertilityMetrics>] = &[
    Rule { name: "zinc_adequate", applies: |m: &FertilityMetrics| m.zinc >= 11.0, delta: 15.0, note: None },
    Rule { name: "zinc_low", applies: |m: &FertilityMetrics| m.zinc < 5.5, delta: -10.0, note: None },
    Rule { name: "vitamin_d_adequate", applies: |m: &FertilityMetrics| m.vitamin_d >= 15.0, delta: 10.0, note: None },
    Rule { name: "vitamin_d_low", applies: |m: &FertilityMetrics| m.vitamin_d < 7.5, delta: -5.0, note: None },
    Rule { name: "omega_3_adequate", applies: |m: &FertilityMetrics| m.omega_3 >= 1.1, delta: 5.0, note: None },
    Rule { name: "glycemic_load_high", applies: |m: &FertilityMetrics| m.glycemic_load > 20.0, delta: -10.0, note: None },
    Rule { name: "harmful_foods", applies: |m: &FertilityMetrics| m.harmful_foods > 0, delta: -10.0, note: None },
];

pub const MALE_PROFILE: FertilityProfile = FertilityProfile {
    label: "male",
    rules: MALE_RULES,
    reproductive_rules: MALE_REPRODUCTIVE_RULES,
    hormonal_rules: MALE_HORMONAL_RULES,
    fertility_foods: &[
        "oyster", "brazil nut", "pumpkin seed", "walnut", "tomato", "salmon", "sardine",
        "pomegranate", "spinach", "egg", "lentil", "dark chocolate", "berries", "blueberries",
        "strawberries", "raspberries",
    ],
    harmful_foods: SHARED_HARMFUL_FOODS,
};

// ============================================================================
// Evaluation
// ============================================================================

/// Keywords from `keywords` that occur as whole words in at least one entry name
fn keywords_found(entries: &[FoodEntry], keywords: &[&str]) -> Vec<String> {
    let names: Vec<String> = entries.iter().map(|e| e.name.to_lowercase()).collect();
    keywords
        .iter()
        .filter(|keyword| names.iter().any(|name| contains_word(name, keyword)))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Nutritional support label from a fertility score
pub fn nutritional_support(score: f64) -> NutritionalSupport {
    if score >= 80.0 {
        NutritionalSupport::Optimal
    } else if score >= 60.0 {
        NutritionalSupport::Good
    } else {
        NutritionalSupport::NeedsImprovement
    }
}

fn metrics_from(entries: &[FoodEntry], totals: &NutrientTotals) -> FertilityMetrics {
    FertilityMetrics {
        folate: totals.get(ids::FOLATE),
        iron: totals.get(ids::IRON),
        zinc: totals.get(ids::ZINC),
        selenium: totals.get(ids::SELENIUM),
        vitamin_c: totals.get(ids::VITAMIN_C),
        vitamin_d: totals.get(ids::VITAMIN_D),
        vitamin_e: totals.get(ids::VITAMIN_E),
        omega_3: totals.get(ids::OMEGA_3),
        antioxidants: totals.get(ids::ANTIOXIDANTS),
        glycemic_load: glycemic::glycemic_load(entries),
        fertility_foods: 0,
        harmful_foods: 0,
    }
}

/// Score a food list against a fertility profile
pub fn analyze_fertility(
    profile: &FertilityProfile,
    entries: &[FoodEntry],
    totals: &NutrientTotals,
) -> FertilityScore {
    let fertility_foods_found = keywords_found(entries, profile.fertility_foods);
    let harmful_foods_found = keywords_found(entries, profile.harmful_foods);

    let metrics = FertilityMetrics {
        fertility_foods: fertility_foods_found.len(),
        harmful_foods: harmful_foods_found.len(),
        ..metrics_from(entries, totals)
    };

    let keyword_adjustment = (metrics.fertility_foods as f64 * FERTILITY_FOOD_BONUS)
        .min(FERTILITY_FOOD_CAP)
        - (metrics.harmful_foods as f64 * HARMFUL_FOOD_PENALTY).min(HARMFUL_FOOD_CAP);

    let mut outcome = evaluate(BASE_SCORE + keyword_adjustment, profile.rules, &metrics);
    let reproductive = evaluate(BASE_SCORE, profile.reproductive_rules, &metrics);
    let hormonal = evaluate(BASE_SCORE, profile.hormonal_rules, &metrics);

    for food in &harmful_foods_found {
        outcome
            .warnings
            .push(format!("Limit {} while trying to conceive", food));
    }
    if fertility_foods_found.is_empty() {
        let examples: Vec<&str> = profile.fertility_foods.iter().take(4).copied().collect();
        outcome.recommendations.push(format!(
            "Add fertility-supporting foods such as {}",
            examples.join(", ")
        ));
    }

    tracing::debug!(
        "{} fertility score {} (keywords {:+}) from rules {:?}",
        profile.label,
        outcome.score,
        keyword_adjustment,
        outcome.fired
    );

    FertilityScore {
        score: outcome.score,
        reproductive_health: reproductive.score,
        hormonal_balance: hormonal.score,
        nutritional_support: nutritional_support(outcome.score),
        metrics,
        fertility_foods_found,
        harmful_foods_found,
        recommendations: outcome.recommendations,
        warnings: outcome.warnings,
    }
}

/// Score a food list for female fertility
pub fn analyze_female_fertility(entries: &[FoodEntry]) -> FertilityScore {
    analyze_fertility(&FEMALE_PROFILE, entries, &NutrientTotals::from_entries(entries))
}

/// Score a food list for male fertility
pub fn analyze_male_fertility(entries: &[FoodEntry]) -> FertilityScore {
    analyze_fertility(&MALE_PROFILE, entries, &NutrientTotals::from_entries(entries))
}
