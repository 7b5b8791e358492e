//! Unit conversion resolver.
//!
//! Normalizes a (quantity, unit, optional food name) triple into a base
//! quantity: grams, milliliters or pieces. Food-specific overrides are tried
//! first, then the unit's category default.

use crate::{ConversionResult, Error, Result, SafeConversion, UnitCategory, UnitDescriptor};
use once_cell::sync::Lazy;
use std::collections::HashMap;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

// ============================================================================
// Reference Tables
// ============================================================================

const UNIT_TABLE: &[(&str, UnitCategory, f64)] = &[
    ("g", UnitCategory::Weight, 1.0),
    ("gram", UnitCategory::Weight, 1.0),
    ("grams", UnitCategory::Weight, 1.0),
    ("mg", UnitCategory::Weight, G_PER_MG),
    ("kg", UnitCategory::Weight, G_PER_KG),
    ("oz", UnitCategory::Weight, G_PER_OZ),
    ("lb", UnitCategory::Weight, G_PER_LB),
    ("lbs", UnitCategory::Weight, G_PER_LB),
    ("ml", UnitCategory::Volume, 1.0),
    ("l", UnitCategory::Volume, ML_PER_LITER),
    ("tsp", UnitCategory::Volume, ML_PER_TSP),
    ("tbsp", UnitCategory::Volume, ML_PER_TBSP),
    ("fl oz", UnitCategory::Volume, ML_PER_FL_OZ),
    ("cup", UnitCategory::Volume, ML_PER_CUP),
    ("cups", UnitCategory::Volume, ML_PER_CUP),
    ("piece", UnitCategory::Count, 1.0),
    ("pieces", UnitCategory::Count, 1.0),
    ("slice", UnitCategory::Count, 1.0),
    ("slices", UnitCategory::Count, 1.0),
    ("item", UnitCategory::Count, 1.0),
    ("items", UnitCategory::Count, 1.0),
    ("serving", UnitCategory::Count, 1.0),
    ("servings", UnitCategory::Count, 1.0),
    ("whole", UnitCategory::Count, 1.0),
    ("small", UnitCategory::Count, 1.0),
    ("medium", UnitCategory::Count, 1.0),
    ("large", UnitCategory::Count, 1.0),
    // A length unit counts as one portion unless a food override weighs it
    ("inch", UnitCategory::Length, 1.0),
    ("inches", UnitCategory::Length, 1.0),
    ("cm", UnitCategory::Length, 1.0),
];

/// Grams per unit for foods whose portions are well known.
const FOOD_OVERRIDES: &[(&str, &[(&str, f64)])] = &[
    (
        "apple",
        &[("piece", 182.0), ("pieces", 182.0), ("whole", 182.0), ("medium", 182.0), ("small", 149.0), ("large", 223.0), ("slice", 20.0), ("slices", 20.0), ("cup", 125.0), ("cups", 125.0)],
    ),
    (
        "banana",
        &[("piece", 118.0), ("pieces", 118.0), ("whole", 118.0), ("medium", 118.0), ("small", 101.0), ("large", 136.0), ("cup", 150.0), ("cups", 150.0), ("inch", 15.0), ("inches", 15.0)],
    ),
    ("orange", &[("piece", 131.0), ("pieces", 131.0), ("whole", 131.0), ("medium", 131.0), ("large", 184.0)]),
    ("pineapple", &[("slice", 84.0), ("slices", 84.0), ("cup", 165.0), ("cups", 165.0)]),
    ("avocado", &[("piece", 150.0), ("pieces", 150.0), ("whole", 150.0), ("medium", 150.0), ("slice", 15.0), ("slices", 15.0)]),
    ("egg", &[("piece", 50.0), ("pieces", 50.0), ("whole", 50.0), ("large", 50.0), ("medium", 44.0), ("small", 38.0)]),
    ("bread", &[("slice", 28.0), ("slices", 28.0), ("piece", 28.0), ("pieces", 28.0)]),
    ("tortilla", &[("piece", 45.0), ("pieces", 45.0), ("whole", 45.0)]),
    ("bagel", &[("piece", 105.0), ("pieces", 105.0), ("whole", 105.0)]),
    ("cheese", &[("slice", 21.0), ("slices", 21.0), ("cup", 113.0), ("cups", 113.0), ("inch", 17.0), ("inches", 17.0)]),
    ("rice", &[("cup", 158.0), ("cups", 158.0), ("serving", 158.0), ("servings", 158.0)]),
    ("oats", &[("cup", 81.0), ("cups", 81.0), ("tbsp", 5.0)]),
    ("pasta", &[("cup", 140.0), ("cups", 140.0), ("serving", 140.0), ("servings", 140.0)]),
    ("milk", &[("cup", 244.0), ("cups", 244.0), ("tbsp", 15.0)]),
    ("yogurt", &[("cup", 245.0), ("cups", 245.0), ("tbsp", 15.0)]),
    ("peanut butter", &[("tbsp", 16.0), ("tsp", 5.3)]),
    ("butter", &[("tbsp", 14.2), ("tsp", 4.7), ("slice", 5.0), ("slices", 5.0)]),
    ("olive oil", &[("tbsp", 13.5), ("tsp", 4.5)]),
    ("honey", &[("tbsp", 21.0), ("tsp", 7.0)]),
    ("sugar", &[("tbsp", 12.5), ("tsp", 4.2), ("cup", 200.0), ("cups", 200.0)]),
    ("chicken breast", &[("piece", 174.0), ("pieces", 174.0), ("serving", 120.0), ("servings", 120.0)]),
    ("chicken", &[("piece", 120.0), ("pieces", 120.0), ("serving", 100.0), ("servings", 100.0), ("cup", 140.0), ("cups", 140.0)]),
    ("salmon", &[("piece", 154.0), ("pieces", 154.0), ("serving", 100.0), ("servings", 100.0)]),
    ("almond", &[("piece", 1.2), ("pieces", 1.2), ("cup", 143.0), ("cups", 143.0), ("tbsp", 9.0)]),
    ("walnut", &[("piece", 4.0), ("pieces", 4.0), ("cup", 117.0), ("cups", 117.0)]),
    ("spinach", &[("cup", 30.0), ("cups", 30.0)]),
    ("broccoli", &[("cup", 91.0), ("cups", 91.0), ("piece", 20.0), ("pieces", 20.0)]),
    ("carrot", &[("piece", 61.0), ("pieces", 61.0), ("whole", 61.0), ("medium", 61.0), ("cup", 128.0), ("cups", 128.0)]),
    ("potato", &[("piece", 173.0), ("pieces", 173.0), ("whole", 173.0), ("medium", 173.0), ("small", 138.0), ("large", 299.0)]),
    ("sweet potato", &[("piece", 130.0), ("pieces", 130.0), ("whole", 130.0), ("medium", 130.0)]),
    ("tomato", &[("piece", 123.0), ("pieces", 123.0), ("whole", 123.0), ("medium", 123.0), ("slice", 20.0), ("slices", 20.0)]),
    ("cucumber", &[("piece", 301.0), ("pieces", 301.0), ("slice", 7.0), ("slices", 7.0), ("inch", 25.0), ("inches", 25.0)]),
    ("ginger", &[("inch", 11.0), ("inches", 11.0), ("tsp", 2.0), ("tbsp", 6.0)]),
    ("cookie", &[("piece", 16.0), ("pieces", 16.0)]),
    ("pizza", &[("slice", 107.0), ("slices", 107.0)]),
];

static UNIT_REGISTRY: Lazy<HashMap<&'static str, UnitDescriptor>> = Lazy::new(|| {
    UNIT_TABLE
        .iter()
        .map(|&(unit, category, factor)| {
            (
                unit,
                UnitDescriptor {
                    category,
                    conversion_factor_to_base_unit: factor,
                },
            )
        })
        .collect()
});

/// Override keys sorted longest first so "sweet potato" wins over "potato"
static SORTED_OVERRIDES: Lazy<Vec<(&'static str, HashMap<&'static str, f64>)>> =
    Lazy::new(|| {
        let mut overrides: Vec<_> = FOOD_OVERRIDES
            .iter()
            .map(|&(food, units)| (food, units.iter().copied().collect::<HashMap<_, _>>()))
            .collect();
        overrides.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        overrides
    });

// ============================================================================
// Registry Access
// ============================================================================

/// Look up the descriptor for a unit string (case-sensitive)
pub fn describe_unit(unit: &str) -> Option<UnitDescriptor> {
    UNIT_REGISTRY.get(unit).copied()
}

/// All registered unit strings, sorted
pub fn registered_units() -> Vec<&'static str> {
    let mut units: Vec<_> = UNIT_REGISTRY.keys().copied().collect();
    units.sort_unstable();
    units
}

/// Whether `key` occurs in `haystack` as a whole word.
///
/// A trailing plural "s" or "es" still counts as a boundary, so "apples"
/// matches "apple" while "pineapple" does not.
pub(crate) fn contains_word(haystack: &str, key: &str) -> bool {
    fn at_boundary(rest: &str) -> bool {
        rest.chars().next().map_or(true, |c| !c.is_alphanumeric())
    }

    haystack.match_indices(key).any(|(idx, _)| {
        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &haystack[idx + key.len()..];
        let after_ok = at_boundary(rest)
            || rest.strip_prefix('s').is_some_and(at_boundary)
            || rest.strip_prefix("es").is_some_and(at_boundary);
        before_ok && after_ok
    })
}

/// Grams per `unit` for the most specific override matching `food_name`
fn override_grams_per_unit(food_name: &str, unit: &str) -> Option<(&'static str, f64)> {
    let name = food_name.to_lowercase();
    SORTED_OVERRIDES
        .iter()
        .filter(|(food, _)| contains_word(&name, food))
        .find_map(|(food, units)| units.get(unit).map(|&grams| (*food, grams)))
}

// ============================================================================
// Conversion
// ============================================================================

/// Convert a quantity to its base unit.
///
/// Returns `Error::UnknownUnit` when `unit` is not registered. Amounts are
/// scaled linearly; validating positivity is the caller's job.
pub fn convert(amount: f64, unit: &str, food_name: Option<&str>) -> Result<ConversionResult> {
    let descriptor = describe_unit(unit).ok_or_else(|| Error::UnknownUnit(unit.to_string()))?;

    if let Some(name) = food_name {
        if let Some((food, grams_per_unit)) = override_grams_per_unit(name, unit) {
            tracing::debug!(
                "Override '{}' applied to '{}': {} g per {}",
                food,
                name,
                grams_per_unit,
                unit
            );
            return Ok(ConversionResult::Grams(amount * grams_per_unit));
        }
    }

    let factor = descriptor.conversion_factor_to_base_unit;
    let result = match descriptor.category {
        UnitCategory::Weight => ConversionResult::Grams(amount * factor),
        UnitCategory::Volume => ConversionResult::Milliliters(amount * factor),
        UnitCategory::Count | UnitCategory::Length => ConversionResult::Pieces(amount * factor),
    };
    Ok(result)
}

/// Fail-soft conversion: unknown units are assumed to be grams and flagged.
pub fn safe_convert(amount: f64, unit: &str, food_name: Option<&str>) -> SafeConversion {
    match convert(amount, unit, food_name) {
        Ok(result) => SafeConversion {
            result,
            is_valid: true,
        },
        Err(e) => {
            tracing::warn!("{}; assuming grams for {}", e, amount);
            SafeConversion {
                result: ConversionResult::Grams(amount),
                is_valid: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apple_piece_override() {
        let result = convert(1.0, "pieces", Some("apple")).unwrap();
        assert_eq!(result, ConversionResult::Grams(182.0));
    }

    #[test]
    fn test_bread_slices_override() {
        let result = convert(2.0, "slices", Some("bread")).unwrap();
        assert_eq!(result, ConversionResult::Grams(56.0));
    }

    #[test]
    fn test_pineapple_does_not_match_apple() {
        let result = convert(1.0, "pieces", Some("pineapple")).unwrap();
        assert_eq!(result, ConversionResult::Pieces(1.0));
    }

    #[test]
    fn test_pineapple_uses_own_override() {
        let result = convert(2.0, "slices", Some("Fresh Pineapple")).unwrap();
        assert_eq!(result, ConversionResult::Grams(168.0));
    }

    #[test]
    fn test_longest_key_wins() {
        let result = convert(1.0, "pieces", Some("grilled chicken breast")).unwrap();
        assert_eq!(result, ConversionResult::Grams(174.0));

        let result = convert(1.0, "pieces", Some("baked sweet potato")).unwrap();
        assert_eq!(result, ConversionResult::Grams(130.0));
    }

    #[test]
    fn test_longer_key_without_unit_falls_back_to_shorter_key() {
        // "chicken breast" has no cup entry, "chicken" does
        let result = convert(1.0, "cup", Some("chicken breast")).unwrap();
        assert_eq!(result, ConversionResult::Grams(140.0));
    }

    #[test]
    fn test_plural_food_name_matches() {
        let result = convert(2.0, "pieces", Some("Scrambled Eggs")).unwrap();
        assert_eq!(result, ConversionResult::Grams(100.0));
    }

    #[test]
    fn test_category_defaults() {
        assert_eq!(convert(2.0, "kg", None).unwrap(), ConversionResult::Grams(2000.0));
        assert_eq!(
            convert(1.0, "cup", None).unwrap(),
            ConversionResult::Milliliters(ML_PER_CUP)
        );
        assert_eq!(convert(3.0, "pieces", None).unwrap(), ConversionResult::Pieces(3.0));
        assert_eq!(convert(2.0, "inch", None).unwrap(), ConversionResult::Pieces(2.0));
    }

    #[test]
    fn test_volume_without_override_stays_volume() {
        let result = convert(1.0, "cup", Some("mystery smoothie")).unwrap();
        assert_eq!(result, ConversionResult::Milliliters(ML_PER_CUP));
        assert!(result.grams().is_none());
    }

    #[test]
    fn test_unknown_unit_errors() {
        let err = convert(5.0, "furlongs", None).unwrap_err();
        assert!(matches!(err, Error::UnknownUnit(ref u) if u == "furlongs"));
    }

    #[test]
    fn test_units_are_case_sensitive() {
        assert!(convert(1.0, "G", None).is_err());
    }

    #[test]
    fn test_override_requires_registered_unit() {
        assert!(convert(1.0, "handful", Some("almond")).is_err());
    }

    #[test]
    fn test_safe_convert_unknown_unit() {
        let safe = safe_convert(5.0, "furlongs", None);
        assert_eq!(safe.result, ConversionResult::Grams(5.0));
        assert!(!safe.is_valid);
    }

    #[test]
    fn test_safe_convert_valid_unit() {
        let safe = safe_convert(1.0, "pieces", Some("apple"));
        assert_eq!(safe.result, ConversionResult::Grams(182.0));
        assert!(safe.is_valid);
    }

    #[test]
    fn test_zero_and_negative_amounts_scale_linearly() {
        assert_eq!(convert(0.0, "oz", None).unwrap(), ConversionResult::Grams(0.0));
        assert_eq!(
            convert(-1.0, "pieces", Some("apple")).unwrap(),
            ConversionResult::Grams(-182.0)
        );
    }

    #[test]
    fn test_convert_is_idempotent() {
        let first = convert(1.5, "cup", Some("cooked rice")).unwrap();
        let second = convert(1.5, "cup", Some("cooked rice")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, ConversionResult::Grams(237.0));
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("green apple", "apple"));
        assert!(contains_word("apples, sliced", "apple"));
        assert!(contains_word("potatoes", "potato"));
        assert!(!contains_word("pineapple", "apple"));
        assert!(!contains_word("breadstick", "bread"));
    }

    #[test]
    fn test_registry_lookup() {
        let cup = describe_unit("cup").unwrap();
        assert_eq!(cup.category, UnitCategory::Volume);
        assert!(describe_unit("furlongs").is_none());
        assert!(registered_units().contains(&"fl oz"));
    }
}
