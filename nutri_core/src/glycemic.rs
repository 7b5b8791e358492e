//! Glycemic index and glycemic load.
//!
//! GI comes from a curated per-food table (whole-word match on the name),
//! falling back to a default for the entry's category. GL weights GI by carbohydrate grams.

use crate::units::contains_word;
use crate::FoodEntry;
use once_cell::sync::Lazy;
use serde::Serialize;

/// GI used when nothing is known, and for carb-free food lists
pub const NEUTRAL_GI: f64 = 50.0;

const GI_TABLE: &[(&str, f64)] = &[
    ("white bread", 75.0),
    ("whole wheat bread", 69.0),
    ("bread", 70.0),
    ("bagel", 72.0),
    ("croissant", 67.0),
    ("white rice", 73.0),
    ("brown rice", 68.0),
    ("basmati", 58.0),
    ("rice", 73.0),
    ("instant oats", 79.0),
    ("oatmeal", 55.0),
    ("oats", 55.0),
    ("cornflakes", 81.0),
    ("pasta", 49.0),
    ("spaghetti", 49.0),
    ("quinoa", 53.0),
    ("couscous", 65.0),
    ("sweet potato", 63.0),
    ("potato chips", 56.0),
    ("french fries", 63.0),
    ("potato", 78.0),
    ("popcorn", 65.0),
    ("apple", 36.0),
    ("banana", 51.0),
    ("orange juice", 50.0),
    ("orange", 43.0),
    ("grapes", 59.0),
    ("watermelon", 76.0),
    ("pineapple", 59.0),
    ("mango", 51.0),
    ("strawberries", 41.0),
    ("blueberries", 53.0),
    ("dates", 42.0),
    ("lentils", 32.0),
    ("chickpeas", 28.0),
    ("kidney beans", 24.0),
    ("milk", 39.0),
    ("greek yogurt", 11.0),
    ("yogurt", 41.0),
    ("ice cream", 51.0),
    ("honey", 61.0),
    ("sugar", 65.0),
    ("soda", 63.0),
    ("cookie", 55.0),
    ("pizza", 60.0),
    ("dark chocolate", 23.0),
    ("chocolate", 40.0),
    ("carrot", 39.0),
    ("broccoli", 15.0),
    ("spinach", 15.0),
    ("tomato", 15.0),
    ("chicken", 0.0),
    ("salmon", 0.0),
    ("beef", 0.0),
    ("egg", 0.0),
];

/// Table keys sorted longest first so specific foods win
static GI_MATCH_ORDER: Lazy<Vec<(&'static str, f64)>> = Lazy::new(|| {
    let mut table = GI_TABLE.to_vec();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
    table
});

/// Default GI for a food category
pub fn category_default_gi(category: &str) -> f64 {
    match category.trim().to_lowercase().as_str() {
        "vegetable" | "vegetables" => 20.0,
        "fruit" | "fruits" => 40.0,
        "legume" | "legumes" => 30.0,
        "dairy" => 35.0,
        "grain" | "grains" => 65.0,
        "protein" => 0.0,
        "snack" | "snacks" => 70.0,
        "beverage" | "beverages" => 45.0,
        _ => NEUTRAL_GI,
    }
}

/// Glycemic index for one entry
pub fn gi_of(entry: &FoodEntry) -> f64 {
    if let Some(key) = entry.food_key.as_deref() {
        if let Some(&(_, gi)) = GI_TABLE.iter().find(|(food, _)| food.eq_ignore_ascii_case(key)) {
            return gi;
        }
    }

    let name = entry.name.to_lowercase();
    GI_MATCH_ORDER
        .iter()
        .find(|(food, _)| contains_word(&name, food))
        .map(|&(_, gi)| gi)
        .unwrap_or_else(|| category_default_gi(&entry.category))
}

/// Glycemic load of a single entry
pub fn entry_load(entry: &FoodEntry) -> f64 {
    gi_of(entry) * entry.carbs() / 100.0
}

/// Total glycemic load: Σ gi × carbs / 100
pub fn glycemic_load(entries: &[FoodEntry]) -> f64 {
    entries.iter().map(entry_load).sum()
}

/// Carbohydrate-weighted mean GI, or `NEUTRAL_GI` when there are no carbs
pub fn weighted_gi(entries: &[FoodEntry]) -> f64 {
    let (weighted, carbs) = entries.iter().fold((0.0, 0.0), |(weighted, carbs), e| {
        let c = e.carbs();
        (weighted + gi_of(e) * c, carbs + c)
    });
    if carbs == 0.0 {
        return NEUTRAL_GI;
    }
    weighted / carbs
}

/// Per-food glycemic figures
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FoodGlycemic {
    pub name: String,
    pub gi: f64,
    pub carbs: f64,
    pub load: f64,
}

pub fn glycemic_breakdown(entries: &[FoodEntry]) -> Vec<FoodGlycemic> {
    entries
        .iter()
        .map(|e| {
            let gi = gi_of(e);
            let carbs = e.carbs();
            FoodGlycemic {
                name: e.name.clone(),
                gi,
                carbs,
                load: gi * carbs / 100.0,
            }
        })
        .collect()
}
