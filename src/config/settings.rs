//! User settings
//!
//! Simple key-value preferences persisted to `config.json`: preferred
//! currency, appearance and security toggles, and date formatting.

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::error::ExpenseError;
use crate::models::Currency;

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency used when an account is created without one
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub dark_mode: bool,

    #[serde(default)]
    pub biometric_auth: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether `init` has been run
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            dark_mode: false,
            biometric_auth: false,
            date_format: default_date_format(),
            onboarding_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Caller decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AppPaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Set a preference by its CLI key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ExpenseError> {
        match key {
            "currency" => {
                self.currency = value.parse().map_err(ExpenseError::Config)?;
            }
            "dark-mode" | "dark_mode" => self.dark_mode = parse_bool(key, value)?,
            "biometric-auth" | "biometric_auth" => self.biometric_auth = parse_bool(key, value)?,
            "date-format" | "date_format" => {
                if value.trim().is_empty() {
                    return Err(ExpenseError::Config("date-format cannot be empty".into()));
                }
                self.date_format = value.to_string();
            }
            other => {
                return Err(ExpenseError::Config(format!(
                    "Unknown setting '{}'. Valid: currency, dark-mode, biometric-auth, date-format",
                    other
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ExpenseError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ExpenseError::Config(format!(
            "Invalid value '{}' for {}: expected on/off",
            value, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency, Currency::Usd);
        assert!(!settings.dark_mode);
        assert!(!settings.biometric_auth);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency = Currency::Eur;
        settings.dark_mode = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency, Currency::Eur);
        assert!(loaded.dark_mode);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_set() {
        let mut settings = Settings::default();
        settings.set("currency", "gbp").unwrap();
        settings.set("dark-mode", "on").unwrap();
        settings.set("biometric-auth", "yes").unwrap();
        assert_eq!(settings.currency, Currency::Gbp);
        assert!(settings.dark_mode);
        assert!(settings.biometric_auth);

        assert!(settings.set("dark-mode", "maybe").is_err());
        assert!(settings.set("currency", "XYZ").is_err());
        assert!(settings.set("color", "blue").is_err());
    }
}
