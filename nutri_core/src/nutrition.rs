//! Nutrition calculator.
//!
//! Looks up a per-100-gram reference profile for a food and scales it to the
//! logged portion using the unit resolver. Unknown foods never fail: they get
//! a generic fixed profile so a dashboard always has a number to show.

use crate::config::ConversionConfig;
use crate::types::nutrient_ids as ids;
use crate::{units, ConversionResult, FoodEntry, NutrientAmount, NutrientCategory, NutritionProfile};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Calories reported for a food with no reference profile
pub const GENERIC_CALORIES: f64 = 100.0;

/// Grams assumed when the logged unit cannot be turned into a mass
pub const REFERENCE_PORTION_GRAMS: f64 = 100.0;

/// A reference food with nutrient amounts per 100 g
#[derive(Clone, Debug)]
pub struct ReferenceFood {
    pub name: &'static str,
    pub calories: f64,
    pub nutrients: &'static [(&'static str, f64)],
}

/// Display name, unit and category for each known nutrient id
const NUTRIENT_META: &[(&str, &str, &str, NutrientCategory)] = &[
    (ids::PROTEIN, "Protein", "g", NutrientCategory::Macronutrient),
    (ids::CARBS, "Carbohydrates", "g", NutrientCategory::Macronutrient),
    (ids::FAT, "Fat", "g", NutrientCategory::Macronutrient),
    (ids::SATURATED_FAT, "Saturated Fat", "g", NutrientCategory::Macronutrient),
    (ids::FIBER, "Fiber", "g", NutrientCategory::Macronutrient),
    (ids::SUGAR, "Sugar", "g", NutrientCategory::Macronutrient),
    (ids::SODIUM, "Sodium", "mg", NutrientCategory::Mineral),
    (ids::MAGNESIUM, "Magnesium", "mg", NutrientCategory::Mineral),
    (ids::IRON, "Iron", "mg", NutrientCategory::Mineral),
    (ids::ZINC, "Zinc", "mg", NutrientCategory::Mineral),
    (ids::CALCIUM, "Calcium", "mg", NutrientCategory::Mineral),
    (ids::SELENIUM, "Selenium", "mcg", NutrientCategory::Mineral),
    (ids::FOLATE, "Folate", "mcg", NutrientCategory::Vitamin),
    (ids::VITAMIN_C, "Vitamin C", "mg", NutrientCategory::Vitamin),
    (ids::VITAMIN_D, "Vitamin D", "mcg", NutrientCategory::Vitamin),
    (ids::VITAMIN_E, "Vitamin E", "mg", NutrientCategory::Vitamin),
    (ids::OMEGA_3, "Omega-3 Fatty Acids", "g", NutrientCategory::Other),
    (ids::ANTIOXIDANTS, "Antioxidants", "mmol", NutrientCategory::Other),
];

const REFERENCE_FOODS: &[ReferenceFood] = &[
    ReferenceFood { name: "apple", calories: 52.0, nutrients: &[(ids::PROTEIN, 0.3), (ids::CARBS, 13.8), (ids::FAT, 0.2), (ids::FIBER, 2.4), (ids::SUGAR, 10.4), (ids::SODIUM, 1.0), (ids::VITAMIN_C, 4.6), (ids::ANTIOXIDANTS, 0.9)] },
    ReferenceFood { name: "banana", calories: 89.0, nutrients: &[(ids::PROTEIN, 1.1), (ids::CARBS, 22.8), (ids::FAT, 0.3), (ids::FIBER, 2.6), (ids::SUGAR, 12.2), (ids::SODIUM, 1.0), (ids::MAGNESIUM, 27.0), (ids::VITAMIN_C, 8.7), (ids::ANTIOXIDANTS, 0.3)] },
    ReferenceFood { name: "orange", calories: 47.0, nutrients: &[(ids::PROTEIN, 0.9), (ids::CARBS, 11.8), (ids::FAT, 0.1), (ids::FIBER, 2.4), (ids::SUGAR, 9.4), (ids::FOLATE, 30.0), (ids::VITAMIN_C, 53.2), (ids::ANTIOXIDANTS, 1.1)] },
    ReferenceFood { name: "blueberries", calories: 57.0, nutrients: &[(ids::PROTEIN, 0.7), (ids::CARBS, 14.5), (ids::FAT, 0.3), (ids::FIBER, 2.4), (ids::SUGAR, 10.0), (ids::VITAMIN_C, 9.7), (ids::VITAMIN_E, 0.6), (ids::ANTIOXIDANTS, 9.2)] },
    ReferenceFood { name: "strawberries", calories: 32.0, nutrients: &[(ids::PROTEIN, 0.7), (ids::CARBS, 7.7), (ids::FAT, 0.3), (ids::FIBER, 2.0), (ids::SUGAR, 4.9), (ids::FOLATE, 24.0), (ids::VITAMIN_C, 58.8), (ids::ANTIOXIDANTS, 2.2)] },
    ReferenceFood { name: "avocado", calories: 160.0, nutrients: &[(ids::PROTEIN, 2.0), (ids::CARBS, 8.5), (ids::FAT, 14.7), (ids::SATURATED_FAT, 2.1), (ids::FIBER, 6.7), (ids::SODIUM, 7.0), (ids::MAGNESIUM, 29.0), (ids::FOLATE, 81.0), (ids::VITAMIN_C, 10.0), (ids::VITAMIN_E, 2.1)] },
    ReferenceFood { name: "spinach", calories: 23.0, nutrients: &[(ids::PROTEIN, 2.9), (ids::CARBS, 3.6), (ids::FAT, 0.4), (ids::FIBER, 2.2), (ids::SODIUM, 79.0), (ids::MAGNESIUM, 79.0), (ids::IRON, 2.7), (ids::CALCIUM, 99.0), (ids::FOLATE, 194.0), (ids::VITAMIN_C, 28.1), (ids::VITAMIN_E, 2.0), (ids::ANTIOXIDANTS, 1.0)] },
    ReferenceFood { name: "broccoli", calories: 34.0, nutrients: &[(ids::PROTEIN, 2.8), (ids::CARBS, 6.6), (ids::FAT, 0.4), (ids::FIBER, 2.6), (ids::SODIUM, 33.0), (ids::IRON, 0.7), (ids::SELENIUM, 2.5), (ids::FOLATE, 63.0), (ids::VITAMIN_C, 89.2), (ids::ANTIOXIDANTS, 0.5)] },
    ReferenceFood { name: "carrot", calories: 41.0, nutrients: &[(ids::PROTEIN, 0.9), (ids::CARBS, 9.6), (ids::FAT, 0.2), (ids::FIBER, 2.8), (ids::SUGAR, 4.7), (ids::SODIUM, 69.0), (ids::VITAMIN_C, 5.9)] },
    ReferenceFood { name: "tomato", calories: 18.0, nutrients: &[(ids::PROTEIN, 0.9), (ids::CARBS, 3.9), (ids::FAT, 0.2), (ids::FIBER, 1.2), (ids::SUGAR, 2.6), (ids::SODIUM, 5.0), (ids::VITAMIN_C, 13.7), (ids::VITAMIN_E, 0.5), (ids::ANTIOXIDANTS, 0.3)] },
    ReferenceFood { name: "potato", calories: 77.0, nutrients: &[(ids::PROTEIN, 2.0), (ids::CARBS, 17.5), (ids::FAT, 0.1), (ids::FIBER, 2.2), (ids::SODIUM, 6.0), (ids::MAGNESIUM, 23.0), (ids::VITAMIN_C, 19.7)] },
    ReferenceFood { name: "sweet potato", calories: 86.0, nutrients: &[(ids::PROTEIN, 1.6), (ids::CARBS, 20.1), (ids::FAT, 0.1), (ids::FIBER, 3.0), (ids::SUGAR, 4.2), (ids::SODIUM, 55.0), (ids::MAGNESIUM, 25.0), (ids::VITAMIN_C, 2.4)] },
    ReferenceFood { name: "white rice", calories: 130.0, nutrients: &[(ids::PROTEIN, 2.7), (ids::CARBS, 28.2), (ids::FAT, 0.3), (ids::FIBER, 0.4), (ids::SODIUM, 1.0), (ids::MAGNESIUM, 12.0), (ids::SELENIUM, 7.5)] },
    ReferenceFood { name: "brown rice", calories: 112.0, nutrients: &[(ids::PROTEIN, 2.3), (ids::CARBS, 23.5), (ids::FAT, 0.8), (ids::FIBER, 1.8), (ids::MAGNESIUM, 43.0), (ids::ZINC, 0.6), (ids::SELENIUM, 9.8)] },
    ReferenceFood { name: "white bread", calories: 265.0, nutrients: &[(ids::PROTEIN, 9.0), (ids::CARBS, 49.0), (ids::FAT, 3.2), (ids::SATURATED_FAT, 0.7), (ids::FIBER, 2.7), (ids::SUGAR, 5.0), (ids::SODIUM, 491.0), (ids::IRON, 3.6), (ids::SELENIUM, 22.0), (ids::FOLATE, 111.0)] },
    ReferenceFood { name: "whole wheat bread", calories: 247.0, nutrients: &[(ids::PROTEIN, 13.0), (ids::CARBS, 41.0), (ids::FAT, 3.4), (ids::SATURATED_FAT, 0.7), (ids::FIBER, 7.0), (ids::SUGAR, 6.0), (ids::SODIUM, 400.0), (ids::MAGNESIUM, 76.0), (ids::IRON, 2.5), (ids::ZINC, 1.8), (ids::SELENIUM, 25.8)] },
    ReferenceFood { name: "oats", calories: 389.0, nutrients: &[(ids::PROTEIN, 16.9), (ids::CARBS, 66.3), (ids::FAT, 6.9), (ids::SATURATED_FAT, 1.2), (ids::FIBER, 10.6), (ids::MAGNESIUM, 177.0), (ids::IRON, 4.7), (ids::ZINC, 4.0), (ids::SELENIUM, 28.9)] },
    ReferenceFood { name: "pasta", calories: 158.0, nutrients: &[(ids::PROTEIN, 5.8), (ids::CARBS, 30.9), (ids::FAT, 0.9), (ids::FIBER, 1.8), (ids::SODIUM, 1.0), (ids::SELENIUM, 26.4)] },
    ReferenceFood { name: "quinoa", calories: 120.0, nutrients: &[(ids::PROTEIN, 4.4), (ids::CARBS, 21.3), (ids::FAT, 1.9), (ids::FIBER, 2.8), (ids::MAGNESIUM, 64.0), (ids::IRON, 1.5), (ids::ZINC, 1.1), (ids::FOLATE, 42.0)] },
    ReferenceFood { name: "lentils", calories: 116.0, nutrients: &[(ids::PROTEIN, 9.0), (ids::CARBS, 20.1), (ids::FAT, 0.4), (ids::FIBER, 7.9), (ids::MAGNESIUM, 36.0), (ids::IRON, 3.3), (ids::ZINC, 1.3), (ids::FOLATE, 181.0)] },
    ReferenceFood { name: "chickpeas", calories: 164.0, nutrients: &[(ids::PROTEIN, 8.9), (ids::CARBS, 27.4), (ids::FAT, 2.6), (ids::FIBER, 7.6), (ids::SODIUM, 7.0), (ids::MAGNESIUM, 48.0), (ids::IRON, 2.9), (ids::ZINC, 1.5), (ids::FOLATE, 172.0)] },
    ReferenceFood { name: "chicken breast", calories: 165.0, nutrients: &[(ids::PROTEIN, 31.0), (ids::FAT, 3.6), (ids::SATURATED_FAT, 1.0), (ids::SODIUM, 74.0), (ids::MAGNESIUM, 29.0), (ids::ZINC, 1.0), (ids::SELENIUM, 27.6)] },
    ReferenceFood { name: "salmon", calories: 208.0, nutrients: &[(ids::PROTEIN, 20.0), (ids::FAT, 13.0), (ids::SATURATED_FAT, 3.1), (ids::SODIUM, 59.0), (ids::MAGNESIUM, 27.0), (ids::SELENIUM, 36.5), (ids::VITAMIN_D, 11.0), (ids::OMEGA_3, 2.3)] },
    ReferenceFood { name: "egg", calories: 143.0, nutrients: &[(ids::PROTEIN, 12.6), (ids::CARBS, 0.7), (ids::FAT, 9.5), (ids::SATURATED_FAT, 3.1), (ids::SODIUM, 142.0), (ids::IRON, 1.8), (ids::ZINC, 1.3), (ids::SELENIUM, 30.7), (ids::FOLATE, 47.0), (ids::VITAMIN_D, 2.0)] },
    ReferenceFood { name: "greek yogurt", calories: 59.0, nutrients: &[(ids::PROTEIN, 10.0), (ids::CARBS, 3.6), (ids::FAT, 0.4), (ids::SATURATED_FAT, 0.1), (ids::SUGAR, 3.2), (ids::SODIUM, 36.0), (ids::CALCIUM, 110.0), (ids::ZINC, 0.5)] },
    ReferenceFood { name: "milk", calories: 61.0, nutrients: &[(ids::PROTEIN, 3.2), (ids::CARBS, 4.8), (ids::FAT, 3.3), (ids::SATURATED_FAT, 1.9), (ids::SUGAR, 5.1), (ids::SODIUM, 43.0), (ids::CALCIUM, 113.0), (ids::VITAMIN_D, 1.3)] },
    ReferenceFood { name: "cheddar cheese", calories: 403.0, nutrients: &[(ids::PROTEIN, 24.9), (ids::CARBS, 1.3), (ids::FAT, 33.1), (ids::SATURATED_FAT, 21.1), (ids::SODIUM, 621.0), (ids::CALCIUM, 721.0), (ids::ZINC, 3.1)] },
    ReferenceFood { name: "almonds", calories: 579.0, nutrients: &[(ids::PROTEIN, 21.2), (ids::CARBS, 21.6), (ids::FAT, 49.9), (ids::SATURATED_FAT, 3.8), (ids::FIBER, 12.5), (ids::MAGNESIUM, 270.0), (ids::CALCIUM, 269.0), (ids::ZINC, 3.1), (ids::VITAMIN_E, 25.6), (ids::ANTIOXIDANTS, 4.5)] },
    ReferenceFood { name: "walnuts", calories: 654.0, nutrients: &[(ids::PROTEIN, 15.2), (ids::CARBS, 13.7), (ids::FAT, 65.2), (ids::SATURATED_FAT, 6.1), (ids::FIBER, 6.7), (ids::MAGNESIUM, 158.0), (ids::OMEGA_3, 9.1), (ids::ANTIOXIDANTS, 21.9)] },
    ReferenceFood { name: "brazil nuts", calories: 659.0, nutrients: &[(ids::PROTEIN, 14.3), (ids::CARBS, 11.7), (ids::FAT, 67.1), (ids::SATURATED_FAT, 15.1), (ids::FIBER, 7.5), (ids::MAGNESIUM, 376.0), (ids::ZINC, 4.1), (ids::SELENIUM, 1917.0)] },
    ReferenceFood { name: "pumpkin seeds", calories: 559.0, nutrients: &[(ids::PROTEIN, 30.2), (ids::CARBS, 10.7), (ids::FAT, 49.0), (ids::SATURATED_FAT, 8.7), (ids::FIBER, 6.0), (ids::MAGNESIUM, 592.0), (ids::IRON, 8.8), (ids::ZINC, 7.8)] },
    ReferenceFood { name: "oysters", calories: 81.0, nutrients: &[(ids::PROTEIN, 9.5), (ids::CARBS, 4.7), (ids::FAT, 2.3), (ids::SODIUM, 106.0), (ids::IRON, 5.1), (ids::ZINC, 90.8), (ids::SELENIUM, 77.0), (ids::OMEGA_3, 0.7)] },
    ReferenceFood { name: "beef", calories: 250.0, nutrients: &[(ids::PROTEIN, 26.0), (ids::FAT, 15.0), (ids::SATURATED_FAT, 6.0), (ids::SODIUM, 72.0), (ids::IRON, 2.6), (ids::ZINC, 6.3), (ids::SELENIUM, 22.0)] },
    ReferenceFood { name: "bacon", calories: 541.0, nutrients: &[(ids::PROTEIN, 37.0), (ids::CARBS, 1.4), (ids::FAT, 42.0), (ids::SATURATED_FAT, 14.0), (ids::SODIUM, 1717.0)] },
    ReferenceFood { name: "french fries", calories: 312.0, nutrients: &[(ids::PROTEIN, 3.4), (ids::CARBS, 41.0), (ids::FAT, 15.0), (ids::SATURATED_FAT, 2.3), (ids::FIBER, 3.8), (ids::SODIUM, 210.0)] },
    ReferenceFood { name: "potato chips", calories: 536.0, nutrients: &[(ids::PROTEIN, 7.0), (ids::CARBS, 53.0), (ids::FAT, 35.0), (ids::SATURATED_FAT, 3.1), (ids::FIBER, 4.4), (ids::SODIUM, 525.0)] },
    ReferenceFood { name: "cookie", calories: 488.0, nutrients: &[(ids::PROTEIN, 5.0), (ids::CARBS, 64.0), (ids::FAT, 24.0), (ids::SATURATED_FAT, 12.0), (ids::SUGAR, 35.0), (ids::SODIUM, 300.0)] },
    ReferenceFood { name: "pizza", calories: 266.0, nutrients: &[(ids::PROTEIN, 11.0), (ids::CARBS, 33.0), (ids::FAT, 10.0), (ids::SATURATED_FAT, 4.5), (ids::FIBER, 2.3), (ids::SODIUM, 598.0), (ids::CALCIUM, 188.0)] },
    ReferenceFood { name: "dark chocolate", calories: 546.0, nutrients: &[(ids::PROTEIN, 4.9), (ids::CARBS, 61.0), (ids::FAT, 31.0), (ids::SATURATED_FAT, 19.0), (ids::FIBER, 7.0), (ids::SUGAR, 48.0), (ids::MAGNESIUM, 228.0), (ids::IRON, 8.0), (ids::ANTIOXIDANTS, 13.0)] },
    ReferenceFood { name: "olive oil", calories: 884.0, nutrients: &[(ids::FAT, 100.0), (ids::SATURATED_FAT, 13.8), (ids::VITAMIN_E, 14.4)] },
    ReferenceFood { name: "soda", calories: 41.0, nutrients: &[(ids::CARBS, 10.6), (ids::SUGAR, 10.6), (ids::SODIUM, 4.0)] },
    ReferenceFood { name: "green tea", calories: 1.0, nutrients: &[(ids::ANTIOXIDANTS, 1.0)] },
];

/// Reference foods ordered for matching: longest names first
static MATCH_ORDER: Lazy<Vec<&'static ReferenceFood>> = Lazy::new(|| {
    let mut foods: Vec<_> = REFERENCE_FOODS.iter().collect();
    foods.sort_by(|a, b| b.name.len().cmp(&a.name.len()).then_with(|| a.name.cmp(b.name)));
    foods
});

fn nutrient_amount(id: &str, amount: f64) -> NutrientAmount {
    match NUTRIENT_META.iter().find(|(meta_id, ..)| *meta_id == id) {
        Some(&(id, name, unit, category)) => NutrientAmount::new(id, name, amount, unit, category),
        None => NutrientAmount::new(id, id, amount, "g", NutrientCategory::Other),
    }
}

/// Find the reference profile for a food name.
///
/// Case-insensitive whole-word match in either direction. An exact name wins,
/// then the longest reference name contained in the input, then the shortest
/// reference name containing the input.
pub fn lookup_reference(food_name: &str) -> Option<&'static ReferenceFood> {
    let query = food_name.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    if let Some(exact) = REFERENCE_FOODS.iter().find(|f| f.name == query) {
        return Some(exact);
    }

    if let Some(contained) = MATCH_ORDER
        .iter()
        .find(|f| units::contains_word(&query, f.name))
        .copied()
    {
        return Some(contained);
    }

    MATCH_ORDER
        .iter()
        .rev()
        .find(|f| units::contains_word(f.name, &query))
        .copied()
}

/// Fixed profile for foods with no reference match
pub fn generic_profile() -> NutritionProfile {
    NutritionProfile {
        calories: GENERIC_CALORIES,
        nutrients: [ids::PROTEIN, ids::CARBS, ids::FAT, ids::FIBER]
            .iter()
            .map(|id| nutrient_amount(id, 0.0))
            .collect(),
    }
}

/// Mass of the logged portion in grams, applying the configured policies
fn grams_equivalent(config: &ConversionConfig, food_name: &str, quantity: f64, unit: &str) -> f64 {
    match units::convert(quantity, unit, Some(food_name)) {
        Ok(ConversionResult::Grams(grams)) => grams,
        Ok(ConversionResult::Milliliters(ml)) => ml * config.liquid_density_g_per_ml,
        Ok(ConversionResult::Pieces(pieces)) => match config.default_grams_per_piece {
            Some(grams_per_piece) => pieces * grams_per_piece,
            None => {
                tracing::debug!(
                    "No mass for {} {} of '{}', using reference portion",
                    quantity,
                    unit,
                    food_name
                );
                REFERENCE_PORTION_GRAMS
            }
        },
        Err(e) => {
            tracing::warn!("{}; using reference portion for '{}'", e, food_name);
            REFERENCE_PORTION_GRAMS
        }
    }
}

fn compute(
    config: &ConversionConfig,
    food_name: &str,
    food_key: Option<&str>,
    quantity: f64,
    unit: &str,
) -> NutritionProfile {
    let reference = food_key
        .and_then(|key| REFERENCE_FOODS.iter().find(|f| f.name.eq_ignore_ascii_case(key)))
        .or_else(|| lookup_reference(food_name));

    let Some(reference) = reference else {
        tracing::debug!("No reference profile for '{}', using generic profile", food_name);
        return generic_profile();
    };

    let scale = grams_equivalent(config, food_name, quantity, unit) / 100.0;
    NutritionProfile {
        calories: reference.calories * scale,
        nutrients: reference
            .nutrients
            .iter()
            .map(|&(id, per_100g)| nutrient_amount(id, per_100g * scale))
            .collect(),
    }
}

/// Compute calories and nutrients for a logged portion with default policies
pub fn compute_nutrition(food_name: &str, quantity: f64, unit: &str) -> NutritionProfile {
    compute(&ConversionConfig::default(), food_name, None, quantity, unit)
}

/// Compute calories and nutrients using an explicit conversion policy
pub fn compute_nutrition_with(
    config: &ConversionConfig,
    food_name: &str,
    quantity: f64,
    unit: &str,
) -> NutritionProfile {
    compute(config, food_name, None, quantity, unit)
}

/// Build a complete food entry from a logged portion.
pub fn food_entry(
    config: &ConversionConfig,
    food_name: &str,
    food_key: Option<&str>,
    quantity: f64,
    unit: &str,
    category: &str,
    date_added: DateTime<Utc>,
) -> FoodEntry {
    let profile = compute(config, food_name, food_key, quantity, unit);
    FoodEntry {
        name: food_name.to_string(),
        quantity,
        unit: unit.to_string(),
        calories: profile.calories,
        nutrients: profile.nutrients,
        category: category.to_string(),
        date_added,
        food_key: food_key.map(str::to_string),
    }
}
