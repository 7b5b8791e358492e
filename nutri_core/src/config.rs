//! Configuration file support for nutri.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/nutri/config.toml`.

use crate::analysis::Condition;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Policies for turning a logged portion into grams
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConversionConfig {
    /// Mass assumed per count unit when no food override applies.
    /// Unset means one reference portion (100 g) per entry.
    #[serde(default)]
    pub default_grams_per_piece: Option<f64>,

    #[serde(default = "default_liquid_density")]
    pub liquid_density_g_per_ml: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            default_grams_per_piece: None,
            liquid_density_g_per_ml: default_liquid_density(),
        }
    }
}

/// Output format for CLI reports
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Report rendering configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Conditions included in `analyze` when none is given on the command line
    #[serde(default = "default_conditions")]
    pub conditions: Vec<String>,
}

impl ReportConfig {
    /// Conditions named in the config, with "all" expanded. Unknown names are skipped.
    pub fn selected_conditions(&self) -> Vec<Condition> {
        select_conditions(&self.conditions)
    }
}

/// Resolve condition names, expanding "all" and dropping duplicates
pub fn select_conditions<S: AsRef<str>>(names: &[S]) -> Vec<Condition> {
    if names.iter().any(|n| n.as_ref().trim().eq_ignore_ascii_case("all")) {
        return Condition::ALL.to_vec();
    }
    let mut selected = Vec::new();
    for condition in names.iter().filter_map(|n| Condition::parse(n.as_ref())) {
        if !selected.contains(&condition) {
            selected.push(condition);
        }
    }
    selected
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            conditions: default_conditions(),
        }
    }
}

// Default value functions
fn default_liquid_density() -> f64 {
    1.0
}

fn default_conditions() -> Vec<String> {
    vec!["all".into()]
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            Some(config_path) => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("nutri").join("config.toml"))
    }

    /// Reject values that would make scaled nutrients meaningless
    pub fn validate(&self) -> Result<()> {
        let density = self.conversion.liquid_density_g_per_ml;
        if !(density.is_finite() && density > 0.0) {
            return Err(Error::Config(format!(
                "liquid_density_g_per_ml must be positive, got {}",
                density
            )));
        }
        if let Some(grams) = self.conversion.default_grams_per_piece {
            if !(grams.is_finite() && grams > 0.0) {
                return Err(Error::Config(format!(
                    "default_grams_per_piece must be positive, got {}",
                    grams
                )));
            }
        }
        if let Some(unknown) = self
            .report
            .conditions
            .iter()
            .find(|c| !c.trim().eq_ignore_ascii_case("all") && Condition::parse(c).is_none())
        {
            return Err(Error::Config(format!("unknown condition '{}' in [report]", unknown)));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.default_grams_per_piece, None);
        assert_eq!(config.conversion.liquid_density_g_per_ml, 1.0);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert_eq!(config.report.conditions, vec!["all".to_string()]);
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.conversion.default_grams_per_piece = Some(80.0);
        config.report.format = ReportFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[conversion]
default_grams_per_piece = 60.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.conversion.default_grams_per_piece, Some(60.0));
        assert_eq!(config.conversion.liquid_density_g_per_ml, 1.0); // default
        assert_eq!(config.report.format, ReportFormat::Text);
    }

    #[test]
    fn test_rejects_non_positive_density() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[conversion]\nliquid_density_g_per_ml = 0.0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_condition() {
        let toml_str = "[report]\nconditions = [\"pcos\", \"thyroid\"]\n";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(ref msg)) if msg.contains("thyroid")));
    }

    #[test]
    fn test_selected_conditions() {
        let config = Config::default();
        assert_eq!(config.report.selected_conditions(), Condition::ALL.to_vec());

        let picked = select_conditions(&["diabetes", "PCOS", "diabetes"]);
        assert_eq!(picked, vec![Condition::Diabetes, Condition::Pcos]);
    }
}
