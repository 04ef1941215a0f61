//! Initial tariff configuration loading from config.toml
//!
//! The values defined here are used to seed the base configuration on first
//! run; after that, the database row is authoritative and the file is only
//! consulted again if the row is missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Initial tariff values
    pub tariff: TariffConfig,
}

/// Initial tariff values used to seed the base configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TariffConfig {
    /// On-peak rate in cents/kWh
    #[serde(default)]
    pub on_peak_rate: f64,
    /// Off-peak rate in cents/kWh
    #[serde(default)]
    pub off_peak_rate: f64,
    /// Optional time-of-use schedule identifier
    pub peak_schedule: Option<String>,
}

/// Loads tariff configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads tariff configuration from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_tariff_config() {
        let toml_str = r#"
            [tariff]
            on_peak_rate = 32.5
            off_peak_rate = 18.4
            peak_schedule = "summer-weekday"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tariff.on_peak_rate, 32.5);
        assert_eq!(config.tariff.off_peak_rate, 18.4);
        assert_eq!(config.tariff.peak_schedule.as_deref(), Some("summer-weekday"));
    }

    #[test]
    fn test_parse_tariff_config_defaults() {
        // Rates default to 0.0 and the schedule is optional
        let config: Config = toml::from_str("[tariff]\n").unwrap();
        assert_eq!(config.tariff.on_peak_rate, 0.0);
        assert_eq!(config.tariff.off_peak_rate, 0.0);
        assert!(config.tariff.peak_schedule.is_none());
    }
}
