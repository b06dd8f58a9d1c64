use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::MatcherOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
    #[serde(default)]
    pub runner: RunnerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// JSON snapshot holding slots and matches
    pub path: String,
    /// Where to write the updated snapshot; defaults to `path`
    pub output_path: Option<String>,
}

impl StoreSettings {
    pub fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSettings {
    #[serde(default)]
    pub delete_previous_matches: bool,
    /// Days after today to match; ignored when `date` is set
    #[serde(default = "default_day_offset")]
    pub day_offset: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            delete_previous_matches: false,
            day_offset: default_day_offset(),
            date: None,
        }
    }
}

fn default_day_offset() -> i64 { 1 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub verify_maximum: bool,
}

impl From<&MatchingSettings> for MatcherOptions {
    fn from(settings: &MatchingSettings) -> Self {
        MatcherOptions {
            verify_maximum: settings.verify_maximum,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local configuration file (config/local.toml)
    /// 4. Environment variables (prefixed with SLOTS)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SLOTS__STORE__PATH -> store.path
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SLOTS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_runner() {
        let runner = RunnerSettings::default();
        assert_eq!(runner.day_offset, 1);
        assert!(!runner.delete_previous_matches);
        assert!(runner.date.is_none());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [store]
                path = "data/slots.json"

                [runner]
                delete_previous_matches = true
                date = "2020-07-02"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.store.output_path(), "data/slots.json");
        assert!(settings.runner.delete_previous_matches);
        assert_eq!(settings.runner.date, NaiveDate::from_ymd_opt(2020, 7, 2));
        assert_eq!(settings.runner.day_offset, 1);
        assert!(!settings.matching.verify_maximum);
    }
}
