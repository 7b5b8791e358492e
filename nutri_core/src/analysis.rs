//! Whole-day analysis: every scorer over one food list.

use crate::aggregate::NutrientTotals;
use crate::glycemic::{self, FoodGlycemic};
use crate::scoring::fertility::{self, FEMALE_PROFILE, MALE_PROFILE};
use crate::scoring::{diabetes, general, pcos};
use crate::scoring::{DiabetesScore, FertilityScore, GeneralHealthScore, PcosScore};
use crate::FoodEntry;
use serde::Serialize;

/// Condition scorers selectable from the CLI and config
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Pcos,
    Diabetes,
    General,
    FemaleFertility,
    MaleFertility,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Pcos,
        Condition::Diabetes,
        Condition::General,
        Condition::FemaleFertility,
        Condition::MaleFertility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Pcos => "pcos",
            Condition::Diabetes => "diabetes",
            Condition::General => "general",
            Condition::FemaleFertility => "female-fertility",
            Condition::MaleFertility => "male-fertility",
        }
    }

    /// Parse a condition name; `None` for anything unrecognized
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        Condition::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

/// Every score for one food list, sharing a single aggregation pass
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HealthReport {
    pub entry_count: usize,
    pub totals: NutrientTotals,
    pub glycemic_load: f64,
    pub weighted_gi: f64,
    pub glycemic: Vec<FoodGlycemic>,
    pub pcos: PcosScore,
    pub diabetes: DiabetesScore,
    pub general_health: GeneralHealthScore,
    pub female_fertility: FertilityScore,
    pub male_fertility: FertilityScore,
}

/// Run every scorer over `entries`
pub fn analyze_all(entries: &[FoodEntry]) -> HealthReport {
    let totals = NutrientTotals::from_entries(entries);

    let report = HealthReport {
        entry_count: entries.len(),
        glycemic_load: glycemic::glycemic_load(entries),
        weighted_gi: glycemic::weighted_gi(entries),
        glycemic: glycemic::glycemic_breakdown(entries),
        pcos: pcos::analyze_with_totals(entries, &totals),
        diabetes: diabetes::analyze_with_totals(entries, &totals),
        general_health: general::analyze_with_totals(entries, &totals),
        female_fertility: fertility::analyze_fertility(&FEMALE_PROFILE, entries, &totals),
        male_fertility: fertility::analyze_fertility(&MALE_PROFILE, entries, &totals),
        totals,
    };

    tracing::info!(
        "Analyzed {} entries: pcos={} diabetes={} general={} female={} male={}",
        report.entry_count,
        report.pcos.score,
        report.diabetes.score,
        report.general_health.score,
        report.female_fertility.score,
        report.male_fertility.score
    );

    report
}
