//! Food log import.
//!
//! A `.json` log is an array of fully-formed [`FoodEntry`] records. A `.csv`
//! log holds only what a person writes down (name, quantity, unit, category,
//! optional date and taxonomy key); nutrition is computed for each row.

use crate::config::ConversionConfig;
use crate::{nutrition, Error, FoodEntry, Result};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// CSV row format for hand-written food logs
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    quantity: f64,
    unit: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    food_key: Option<String>,
}

impl CsvRow {
    fn into_entry(self, config: &ConversionConfig, line: usize) -> Result<FoodEntry> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidEntry(format!("row {}: missing food name", line)));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(Error::InvalidEntry(format!(
                "row {}: quantity must be positive, got {}",
                line, self.quantity
            )));
        }

        let date_added = match self.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => DateTime::parse_from_rfc3339(date)
                .map_err(|e| Error::InvalidEntry(format!("row {}: invalid date: {}", line, e)))?
                .with_timezone(&Utc),
            _ => Utc::now(),
        };

        let category = if self.category.trim().is_empty() {
            "other"
        } else {
            self.category.trim()
        };
        let food_key = self
            .food_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());

        Ok(nutrition::food_entry(
            config,
            self.name.trim(),
            food_key,
            self.quantity,
            self.unit.trim(),
            category,
            date_added,
        ))
    }
}

/// Read entries from a CSV food log, computing nutrition for each row
pub fn read_csv(path: &Path, config: &ConversionConfig) -> Result<Vec<FoodEntry>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut entries = Vec::new();
    for (idx, row) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        entries.push(row?.into_entry(config, idx + 2)?);
    }
    Ok(entries)
}

/// Read a JSON array of food entries
pub fn read_json(path: &Path) -> Result<Vec<FoodEntry>> {
    let file = File::open(path)?;
    let entries: Vec<FoodEntry> = serde_json::from_reader(BufReader::new(file))?;

    if let Some(bad) = entries.iter().find(|e| !e.quantity.is_finite() || e.quantity <= 0.0) {
        return Err(Error::InvalidEntry(format!(
            "'{}': quantity must be positive, got {}",
            bad.name, bad.quantity
        )));
    }
    Ok(entries)
}

/// Load a food log, choosing the format from the file extension
pub fn load_entries(path: &Path, config: &ConversionConfig) -> Result<Vec<FoodEntry>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    let entries = match extension.as_deref() {
        Some("json") => read_json(path)?,
        Some("csv") => read_csv(path, config)?,
        _ => {
            return Err(Error::InvalidEntry(format!(
                "unsupported food log format: {} (expected .json or .csv)",
                path.display()
            )))
        }
    };

    tracing::info!("Loaded {} food entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_csv_rows_get_nutrition() {
        crate::logging::init_test();
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "day.csv",
            "name,quantity,unit,category,date,food_key\n\
             apple,1,piece,fruits,2024-03-01T08:00:00Z,\n\
             mom's stew,200,g,legumes,,lentils\n",
        );

        let entries = load_entries(&path, &ConversionConfig::default()).unwrap();
        assert_eq!(entries.len(), 2);

        // 1 apple = 182 g at 52 kcal/100 g
        assert!((entries[0].calories - 52.0 * 1.82).abs() < 1e-9);
        assert_eq!(entries[0].category, "fruits");
        assert_eq!(entries[0].date_added.to_rfc3339(), "2024-03-01T08:00:00+00:00");

        assert_eq!(entries[1].food_key.as_deref(), Some("lentils"));
        assert!((entries[1].calories - 232.0).abs() < 1e-9);
    }

    #[test]
    fn test_csv_optional_columns_may_be_missing() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "short.csv", "name,quantity,unit\nbanana,1,medium\n");

        let entries = load_entries(&path, &ConversionConfig::default()).unwrap();
        assert_eq!(entries[0].category, "other");
        assert!(entries[0].food_key.is_none());
    }

    #[test]
    fn test_csv_rejects_non_positive_quantity() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "name,quantity,unit\napple,0,piece\n");

        let err = load_entries(&path, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry(ref msg) if msg.contains("row 2")));
    }

    #[test]
    fn test_csv_rejects_bad_date() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bad_date.csv",
            "name,quantity,unit,category,date\napple,1,piece,fruits,yesterday\n",
        );

        let err = load_entries(&path, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry(_)));
    }

    #[test]
    fn test_json_entries_load() {
        let dir = TempDir::new().unwrap();
        let entry = nutrition::food_entry(
            &ConversionConfig::default(),
            "salmon",
            None,
            150.0,
            "g",
            "protein",
            Utc::now(),
        );
        let path = dir.path().join("day.json");
        fs::write(&path, serde_json::to_string(&vec![entry.clone()]).unwrap()).unwrap();

        let entries = load_entries(&path, &ConversionConfig::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, entry.name);
        assert_eq!(entries[0].date_added, entry.date_added);
        assert_eq!(entries[0].nutrients.len(), entry.nutrients.len());
        assert!((entries[0].calories - entry.calories).abs() < 1e-9);
    }

    #[test]
    fn test_json_missing_nutrients_defaults_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bare.json",
            r#"[{"name":"toast","quantity":2,"unit":"slice","calories":160,
                "category":"grains","date_added":"2024-03-01T08:00:00Z"}]"#,
        );

        let entries = load_entries(&path, &ConversionConfig::default()).unwrap();
        assert!(entries[0].nutrients.is_empty());
        assert_eq!(entries[0].carbs(), 0.0);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "day.txt", "apple");
        assert!(matches!(
            load_entries(&path, &ConversionConfig::default()),
            Err(Error::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            load_entries(&path, &ConversionConfig::default()),
            Err(Error::Io(_))
        ));
    }
}
