//! Core domain types for the nutrition scoring engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Logged food entries and their nutrient amounts
//! - Unit descriptors and conversion results
//! - Categorical labels shared by the condition scorers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Food Entry Types
// ============================================================================

/// Category of a nutrient amount
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NutrientCategory {
    Macronutrient,
    Vitamin,
    Mineral,
    Other,
}

/// One nutrient measured in a food entry.
///
/// `id` is the aggregation key (e.g. "protein", "vitamin-c"); `name` is for
/// display only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutrientAmount {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: NutrientCategory,
}

impl NutrientAmount {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        category: NutrientCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            unit: unit.into(),
            category,
        }
    }
}

/// A logged food consumption record, owned by the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    #[serde(default)]
    pub nutrients: Vec<NutrientAmount>,
    pub category: String,
    pub date_added: DateTime<Utc>,
    /// Structured taxonomy key; preferred over free-text name matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_key: Option<String>,
}

impl FoodEntry {
    /// Amount of a single nutrient in this entry (0 when absent)
    pub fn nutrient(&self, id: &str) -> f64 {
        self.nutrients
            .iter()
            .filter(|n| n.id == id)
            .map(|n| n.amount)
            .sum()
    }

    /// Carbohydrate grams in this entry
    pub fn carbs(&self) -> f64 {
        self.nutrient(nutrient_ids::CARBS)
    }

    /// Whether the entry's category matches `category`, ignoring case
    pub fn is_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

/// Stable nutrient identifiers used as aggregation keys.
pub mod nutrient_ids {
    pub const PROTEIN: &str = "protein";
    pub const CARBS: &str = "carbs";
    pub const FAT: &str = "fat";
    pub const SATURATED_FAT: &str = "saturated-fat";
    pub const FIBER: &str = "fiber";
    pub const SUGAR: &str = "sugar";
    pub const SODIUM: &str = "sodium";
    pub const MAGNESIUM: &str = "magnesium";
    pub const IRON: &str = "iron";
    pub const ZINC: &str = "zinc";
    pub const CALCIUM: &str = "calcium";
    pub const SELENIUM: &str = "selenium";
    pub const FOLATE: &str = "folate";
    pub const VITAMIN_C: &str = "vitamin-c";
    pub const VITAMIN_D: &str = "vitamin-d";
    pub const VITAMIN_E: &str = "vitamin-e";
    pub const OMEGA_3: &str = "omega-3";
    pub const ANTIOXIDANTS: &str = "antioxidants";
}

// ============================================================================
// Unit Types
// ============================================================================

/// Category of a measurement unit
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    Weight,
    Volume,
    Count,
    Length,
}

/// Registry entry for a recognized unit string
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct UnitDescriptor {
    pub category: UnitCategory,
    pub conversion_factor_to_base_unit: f64,
}

/// A quantity normalized to one base unit.
///
/// Volume is never reported as weight: turning milliliters into grams needs an
/// explicit density assumption on the caller's side.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConversionResult {
    Grams(f64),
    Milliliters(f64),
    Pieces(f64),
}

impl ConversionResult {
    pub fn grams(&self) -> Option<f64> {
        match self {
            ConversionResult::Grams(g) => Some(*g),
            _ => None,
        }
    }

    pub fn milliliters(&self) -> Option<f64> {
        match self {
            ConversionResult::Milliliters(ml) => Some(*ml),
            _ => None,
        }
    }

    pub fn pieces(&self) -> Option<f64> {
        match self {
            ConversionResult::Pieces(p) => Some(*p),
            _ => None,
        }
    }

    /// The numeric value regardless of base unit
    pub fn value(&self) -> f64 {
        match self {
            ConversionResult::Grams(v)
            | ConversionResult::Milliliters(v)
            | ConversionResult::Pieces(v) => *v,
        }
    }

    /// Short base unit label ("g", "ml", "pieces")
    pub fn base_unit(&self) -> &'static str {
        match self {
            ConversionResult::Grams(_) => "g",
            ConversionResult::Milliliters(_) => "ml",
            ConversionResult::Pieces(_) => "pieces",
        }
    }
}

/// Result of a fail-soft conversion
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SafeConversion {
    pub result: ConversionResult,
    /// False when the unit was unknown and grams were assumed
    pub is_valid: bool,
}

// ============================================================================
// Nutrition Types
// ============================================================================

/// Calories and nutrients computed for a single food portion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutritionProfile {
    pub calories: f64,
    pub nutrients: Vec<NutrientAmount>,
}

// ============================================================================
// Scoring Labels
// ============================================================================

/// Three-step qualitative level used by several indicators
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Moderate,
    High,
}

/// Diabetes blood-sugar impact label
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BloodSugarImpact {
    Minimal,
    Moderate,
    Significant,
}

/// Fertility nutritional-support label
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NutritionalSupport {
    Optimal,
    Good,
    NeedsImprovement,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Low => "low",
            Level::Moderate => "moderate",
            Level::High => "high",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for BloodSugarImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BloodSugarImpact::Minimal => "minimal",
            BloodSugarImpact::Moderate => "moderate",
            BloodSugarImpact::Significant => "significant",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for NutritionalSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NutritionalSupport::Optimal => "optimal",
            NutritionalSupport::Good => "good",
            NutritionalSupport::NeedsImprovement => "needs_improvement",
        };
        f.write_str(s)
    }
}
