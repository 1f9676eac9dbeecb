//! Settings loaded from the process environment.
//!
//! | variable | default |
//! |---|---|
//! | `CATALOG_VALIDATION_ENABLED` | `true` |
//! | `CATALOG_LOG_FORMAT` | `json` |
//! | `CATALOG_LOG_LEVEL` | `info` |
//! | `CATALOG_SNAPSHOT_PATH` | unset |

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use catalog_observability::{LogFormat, ObservabilitySettings};

pub const VALIDATION_ENABLED: &str = "CATALOG_VALIDATION_ENABLED";
pub const LOG_FORMAT: &str = "CATALOG_LOG_FORMAT";
pub const LOG_LEVEL: &str = "CATALOG_LOG_LEVEL";
pub const SNAPSHOT_PATH: &str = "CATALOG_SNAPSHOT_PATH";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: expected a boolean, got '{value}'")]
    InvalidBool { key: &'static str, value: String },

    #[error("{key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run before-save hooks (variant validation) in the save pipeline.
    pub validation_enabled: bool,
    pub observability: ObservabilitySettings,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validation_enabled: true,
            observability: ObservabilitySettings::default(),
            snapshot_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key → value source. Unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(value) = get(VALIDATION_ENABLED) {
            settings.validation_enabled = parse_bool(VALIDATION_ENABLED, &value)?;
        }

        if let Some(value) = get(LOG_FORMAT) {
            settings.observability.format = value
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::InvalidValue { key: LOG_FORMAT, reason })?;
        }

        if let Some(value) = get(LOG_LEVEL) {
            settings.observability.default_filter = value.trim().to_string();
        }

        settings.snapshot_path = get(SNAPSHOT_PATH).map(PathBuf::from);

        Ok(settings)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.validation_enabled);
        assert_eq!(settings.observability.format, LogFormat::Json);
    }

    #[test]
    fn reads_every_key() {
        let settings = Settings::from_lookup(lookup(&[
            (VALIDATION_ENABLED, "off"),
            (LOG_FORMAT, "pretty"),
            (LOG_LEVEL, "catalog_products=debug"),
            (SNAPSHOT_PATH, "/tmp/catalog.json"),
        ]))
        .unwrap();

        assert!(!settings.validation_enabled);
        assert_eq!(settings.observability.format, LogFormat::Pretty);
        assert_eq!(settings.observability.default_filter, "catalog_products=debug");
        assert_eq!(settings.snapshot_path, Some(PathBuf::from("/tmp/catalog.json")));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let settings = Settings::from_lookup(lookup(&[(VALIDATION_ENABLED, "  "), (SNAPSHOT_PATH, "")])).unwrap();
        assert!(settings.validation_enabled);
        assert_eq!(settings.snapshot_path, None);
    }

    #[test]
    fn rejects_malformed_bool() {
        let err = Settings::from_lookup(lookup(&[(VALIDATION_ENABLED, "maybe")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBool {
                key: VALIDATION_ENABLED,
                value: "maybe".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = Settings::from_lookup(lookup(&[(LOG_FORMAT, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: LOG_FORMAT, .. }));
    }
}
