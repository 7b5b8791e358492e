//! Anti-inflammatory score shared by the PCOS and general-health scorers.
//!
//! Starts at 50. Each entry adds the weight of the first anti-inflammatory
//! keyword its name contains and subtracts the weight of the first
//! pro-inflammatory keyword, then category bonuses apply. Clamped to 0–100.

use crate::scoring::clamp_score;
use crate::FoodEntry;

const BASE: f64 = 50.0;

const ANTI_INFLAMMATORY: &[(&str, f64)] = &[
    ("salmon", 8.0),
    ("sardine", 8.0),
    ("mackerel", 8.0),
    ("walnut", 6.0),
    ("flax", 6.0),
    ("chia", 6.0),
    ("blueberr", 6.0),
    ("strawberr", 5.0),
    ("turmeric", 7.0),
    ("ginger", 5.0),
    ("spinach", 5.0),
    ("kale", 5.0),
    ("broccoli", 5.0),
    ("olive oil", 6.0),
    ("avocado", 4.0),
    ("green tea", 5.0),
    ("almond", 4.0),
    ("dark chocolate", 3.0),
    ("tomato", 3.0),
    ("lentil", 3.0),
    ("oats", 3.0),
];

const PRO_INFLAMMATORY: &[(&str, f64)] = &[
    ("fried", 8.0),
    ("fries", 8.0),
    ("bacon", 8.0),
    ("sausage", 8.0),
    ("hot dog", 8.0),
    ("processed", 6.0),
    ("soda", 7.0),
    ("candy", 6.0),
    ("donut", 7.0),
    ("doughnut", 7.0),
    ("pastry", 5.0),
    ("cookie", 5.0),
    ("cake", 5.0),
    ("white bread", 4.0),
    ("margarine", 6.0),
    ("chips", 5.0),
    ("alcohol", 6.0),
    ("beer", 6.0),
];

fn first_match(name: &str, table: &[(&str, f64)]) -> f64 {
    table
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|&(_, weight)| weight)
        .unwrap_or(0.0)
}

fn category_bonus(category: &str) -> f64 {
    match category.trim().to_lowercase().as_str() {
        "vegetable" | "vegetables" => 3.0,
        "fruit" | "fruits" => 2.0,
        "legume" | "legumes" => 2.0,
        "snack" | "snacks" => -3.0,
        _ => 0.0,
    }
}

pub fn anti_inflammatory_score(entries: &[FoodEntry]) -> f64 {
    let delta: f64 = entries
        .iter()
        .map(|e| {
            let name = e.name.to_lowercase();
            first_match(&name, ANTI_INFLAMMATORY) - first_match(&name, PRO_INFLAMMATORY)
                + category_bonus(&e.category)
        })
        .sum();
    clamp_score(BASE + delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(anti_inflammatory_score(&[]), 50.0);
    }

    #[test]
    fn test_keywords_and_categories() {
        let entries = vec![
            entry("Grilled Salmon", "protein", 300.0, &[]),
            entry("steamed broccoli", "vegetables", 50.0, &[]),
        ];
        // 50 + 8 + 5 + 3
        assert_eq!(anti_inflammatory_score(&entries), 66.0);
    }

    #[test]
    fn test_pro_inflammatory_lowers_score() {
        let entries = vec![
            entry("bacon", "protein", 400.0, &[]),
            entry("french fries", "snacks", 300.0, &[]),
        ];
        // 50 - 8 - 8 - 3
        assert_eq!(anti_inflammatory_score(&entries), 31.0);
    }

    #[test]
    fn test_clamped() {
        let entries: Vec<_> = (0..20)
            .map(|_| entry("fried donut", "snacks", 400.0, &[]))
            .collect();
        assert_eq!(anti_inflammatory_score(&entries), 0.0);
    }
}
