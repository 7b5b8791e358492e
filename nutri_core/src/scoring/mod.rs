//! Condition scoring engine.
//!
//! Five independent scorers (PCOS, diabetes, general health, female and male
//! fertility). Each starts at a base score of 50, applies the deltas of a
//! declarative rule table to metrics derived from the entries, and clamps the
//! result to 0–100. Metric fields are reported unclamped.

pub mod diabetes;
pub mod fertility;
pub mod general;
pub mod pcos;
pub mod rules;

pub use diabetes::{analyze_diabetes, DiabetesMetrics, DiabetesScore};
pub use fertility::{
    analyze_female_fertility, analyze_male_fertility, FertilityMetrics, FertilityScore,
};
pub use general::{analyze_general_health, metabolic_health, GeneralHealthMetrics, GeneralHealthScore};
pub use pcos::{analyze_pcos, hormone_support_score, PcosMetrics, PcosScore};
pub use rules::{evaluate, Note, NoteKind, Rule, RuleOutcome};

/// Starting score for every scorer and sub-score
pub const BASE_SCORE: f64 = 50.0;

/// Clamp a score to 0–100. NaN maps to the neutral base score.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return BASE_SCORE;
    }
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-12.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(62.5), 62.5);
        assert_eq!(clamp_score(f64::NAN), BASE_SCORE);
    }
}
