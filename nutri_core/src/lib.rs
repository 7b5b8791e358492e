#![forbid(unsafe_code)]

//! Core domain model and business logic for nutri.
//!
//! This crate provides:
//! - Domain types (food entries, nutrient amounts, unit descriptors, labels)
//! - Unit normalization to grams, milliliters or pieces
//! - Nutrition lookup and scaling for logged portions
//! - Nutrient aggregation and glycemic index/load
//! - Condition scorers (PCOS, diabetes, general health, fertility)
//! - Food log import (JSON, CSV) and configuration

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod units;
pub mod nutrition;
pub mod aggregate;
pub mod glycemic;
pub mod inflammation;
pub mod scoring;
pub mod analysis;
pub mod food_log;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use units::{convert as convert_to_base_unit, safe_convert as safe_convert_to_base_unit};
pub use nutrition::{compute_nutrition, compute_nutrition_with};
pub use aggregate::NutrientTotals;
pub use glycemic::glycemic_load;
pub use scoring::{
    analyze_diabetes, analyze_female_fertility, analyze_general_health, analyze_male_fertility,
    analyze_pcos,
};
pub use analysis::{analyze_all, Condition, HealthReport};
pub use food_log::load_entries;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{FoodEntry, NutrientAmount, NutrientCategory};
    use chrono::Utc;

    /// Entry with explicit calories and nutrient amounts
    pub fn entry(name: &str, category: &str, calories: f64, nutrients: &[(&str, f64)]) -> FoodEntry {
        FoodEntry {
            name: name.to_string(),
            quantity: 1.0,
            unit: "serving".to_string(),
            calories,
            nutrients: nutrients
                .iter()
                .map(|&(id, amount)| NutrientAmount::new(id, id, amount, "", NutrientCategory::Other))
                .collect(),
            category: category.to_string(),
            date_added: Utc::now(),
            food_key: None,
        }
    }
}
