use nutri_core::config::{select_conditions, ReportFormat};
use nutri_core::scoring::{DiabetesScore, FertilityScore, GeneralHealthScore, PcosScore};
use nutri_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const CONDITION_NAMES: [&str; 6] = [
    "all",
    "pcos",
    "diabetes",
    "general",
    "female-fertility",
    "male-fertility",
];

#[derive(Parser)]
#[command(name = "nutri")]
#[command(about = "Nutrition unit normalization and health scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug); RUST_LOG still wins
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a quantity to grams, milliliters or pieces
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        unit: String,

        /// Food name, used for per-food portion weights
        #[arg(long)]
        food: Option<String>,

        /// Assume grams for unknown units instead of failing
        #[arg(long)]
        safe: bool,
    },

    /// Compute calories and nutrients for one portion
    Nutrition {
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
        unit: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Score a food log (.json or .csv) for health conditions
    Analyze {
        file: PathBuf,

        /// Condition to report (repeatable); defaults to the config's list
        #[arg(long = "condition", value_parser = CONDITION_NAMES)]
        conditions: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every recognized unit
    Units,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logging::init_with_level(logging::verbosity_level(cli.verbose));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Convert {
            amount,
            unit,
            food,
            safe,
        } => cmd_convert(amount, &unit, food.as_deref(), safe),
        Commands::Nutrition {
            name,
            quantity,
            unit,
            json,
        } => cmd_nutrition(&config, &name, quantity, &unit, json),
        Commands::Analyze {
            file,
            conditions,
            json,
        } => cmd_analyze(&config, &file, &conditions, json),
        Commands::Units => {
            for unit in units::registered_units() {
                if let Some(descriptor) = units::describe_unit(unit) {
                    println!(
                        "{:<12} {:?} x{}",
                        unit, descriptor.category, descriptor.conversion_factor_to_base_unit
                    );
                }
            }
            Ok(())
        }
    }
}

fn cmd_convert(amount: f64, unit: &str, food: Option<&str>, safe: bool) -> Result<()> {
    let result = if safe {
        let conversion = safe_convert_to_base_unit(amount, unit, food);
        if !conversion.is_valid {
            eprintln!("Unknown unit '{}', assuming grams", unit);
        }
        conversion.result
    } else {
        convert_to_base_unit(amount, unit, food)?
    };

    println!("{} {}", format_number(result.value()), result.base_unit());
    Ok(())
}

fn cmd_nutrition(config: &Config, name: &str, quantity: f64, unit: &str, json: bool) -> Result<()> {
    let profile = compute_nutrition_with(&config.conversion, name, quantity, unit);

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{} ({} {})", name, format_number(quantity), unit);
    println!("  Calories: {}", format_number(profile.calories));
    for nutrient in &profile.nutrients {
        println!(
            "  {:<14} {} {}",
            nutrient.name,
            format_number(nutrient.amount),
            nutrient.unit
        );
    }
    Ok(())
}

fn cmd_analyze(config: &Config, file: &Path, requested: &[String], json: bool) -> Result<()> {
    let entries = load_entries(file, &config.conversion)?;
    let report = analyze_all(&entries);

    let conditions = if requested.is_empty() {
        config.report.selected_conditions()
    } else {
        select_conditions(requested)
    };
    let json = json || config.report.format == ReportFormat::Json;

    if json {
        let mut value = serde_json::to_value(&report)?;
        if let Some(object) = value.as_object_mut() {
            for condition in Condition::ALL {
                if !conditions.contains(&condition) {
                    object.remove(report_key(condition));
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    display_summary(&report);
    for condition in conditions {
        match condition {
            Condition::Pcos => display_pcos(&report.pcos),
            Condition::Diabetes => display_diabetes(&report.diabetes),
            Condition::General => display_general(&report.general_health),
            Condition::FemaleFertility => display_fertility("FEMALE FERTILITY", &report.female_fertility),
            Condition::MaleFertility => display_fertility("MALE FERTILITY", &report.male_fertility),
        }
    }
    Ok(())
}

/// Field name of a condition's score in the serialized report
fn report_key(condition: Condition) -> &'static str {
    match condition {
        Condition::Pcos => "pcos",
        Condition::Diabetes => "diabetes",
        Condition::General => "general_health",
        Condition::FemaleFertility => "female_fertility",
        Condition::MaleFertility => "male_fertility",
    }
}

fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

fn display_header(title: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
}

fn display_messages(recommendations: &[String], warnings: &[String]) {
    for warning in warnings {
        println!("  ⚠ {}", warning);
    }
    for recommendation in recommendations {
        println!("  → {}", recommendation);
    }
}

fn display_summary(report: &HealthReport) {
    display_header("DAILY SUMMARY");
    println!("  Entries: {}", report.entry_count);
    println!("  Calories: {}", format_number(report.totals.calories));
    for (id, amount) in &report.totals.nutrients {
        println!("  {:<14} {}", id, format_number(*amount));
    }
    println!("  Glycemic load: {}", format_number(report.glycemic_load));
    println!("  Average GI: {}", format_number(report.weighted_gi));
}

fn display_pcos(score: &PcosScore) {
    display_header("PCOS");
    println!("  Score: {}/100", format_number(score.score));
    println!("  Insulin impact: {}", score.insulin_impact);
    display_messages(&score.recommendations, &score.warnings);
}

fn display_diabetes(score: &DiabetesScore) {
    display_header("DIABETES");
    println!("  Score: {}/100", format_number(score.score));
    println!("  Blood sugar impact: {}", score.blood_sugar_impact);
    display_messages(&score.recommendations, &score.warnings);
}

fn display_general(score: &GeneralHealthScore) {
    display_header("GENERAL HEALTH");
    println!("  Score: {}/100", format_number(score.score));
    println!("  Inflammation: {}", score.inflammation_level);
    println!("  Oxidative stress: {}", score.oxidative_stress);
    println!("  Metabolic health: {}/100", format_number(score.metabolic_health));
    display_messages(&score.recommendations, &score.warnings);
}

fn display_fertility(title: &str, score: &FertilityScore) {
    display_header(title);
    println!("  Score: {}/100", format_number(score.score));
    println!("  Reproductive health: {}/100", format_number(score.reproductive_health));
    println!("  Hormonal balance: {}/100", format_number(score.hormonal_balance));
    println!("  Nutritional support: {}", score.nutritional_support);
    if !score.fertility_foods_found.is_empty() {
        println!("  Supportive foods: {}", score.fertility_foods_found.join(", "));
    }
    display_messages(&score.recommendations, &score.warnings);
}
