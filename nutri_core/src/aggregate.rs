//! Nutrient aggregation across food entries.
//!
//! All sums are keyed by nutrient id, never by display name, and are
//! independent of entry order.

use crate::types::nutrient_ids as ids;
use crate::FoodEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sum of `nutrient_id` over every entry (missing nutrients count as 0)
pub fn total_of(entries: &[FoodEntry], nutrient_id: &str) -> f64 {
    entries.iter().map(|e| e.nutrient(nutrient_id)).sum()
}

/// Sum of calories over every entry
pub fn total_calories(entries: &[FoodEntry]) -> f64 {
    entries.iter().map(|e| e.calories).sum()
}

/// Share of calories from protein, in percent. 0 when there are no calories.
pub fn protein_calorie_ratio(entries: &[FoodEntry]) -> f64 {
    ratio_of(total_of(entries, ids::PROTEIN), total_calories(entries))
}

fn ratio_of(protein: f64, calories: f64) -> f64 {
    if calories == 0.0 {
        return 0.0;
    }
    protein * 4.0 / calories * 100.0
}

/// Every nutrient total for a list of entries, computed in one pass.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct NutrientTotals {
    pub calories: f64,
    pub nutrients: BTreeMap<String, f64>,
}

impl NutrientTotals {
    pub fn from_entries(entries: &[FoodEntry]) -> Self {
        let mut totals = Self::default();
        for entry in entries {
            totals.calories += entry.calories;
            for nutrient in &entry.nutrients {
                *totals.nutrients.entry(nutrient.id.clone()).or_insert(0.0) += nutrient.amount;
            }
        }
        totals
    }

    /// Total for a nutrient id, 0 when no entry carried it
    pub fn get(&self, nutrient_id: &str) -> f64 {
        self.nutrients.get(nutrient_id).copied().unwrap_or(0.0)
    }

    pub fn protein_calorie_ratio(&self) -> f64 {
        ratio_of(self.get(ids::PROTEIN), self.calories)
    }
}
