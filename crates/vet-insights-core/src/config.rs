//! Analytics configuration.
//!
//! Defaults reproduce the fixed constants of the productivity model. A JSON
//! document may override any subset of fields:
//!
//! ```json
//! { "milk_price_per_liter": 140.0, "default_timeframe_days": 60 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable parameters for the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Milk price per litre, in the practice's single currency unit
    pub milk_price_per_liter: f64,
    /// Healthy cow yield (litres/day)
    pub cow_baseline_liters: f64,
    /// Healthy buffalo yield (litres/day)
    pub buffalo_baseline_liters: f64,
    /// Trailing window for productivity when the caller gives none
    pub default_timeframe_days: u32,
    /// Look-ahead window for vaccination reminders
    pub reminder_window_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            milk_price_per_liter: 120.0,
            cow_baseline_liters: 15.0,
            buffalo_baseline_liters: 12.0,
            default_timeframe_days: 90,
            reminder_window_days: 30,
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: AnalyticsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "loaded analytics config");
        Self::from_json(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("milk_price_per_liter", self.milk_price_per_liter),
            ("cow_baseline_liters", self.cow_baseline_liters),
            ("buffalo_baseline_liters", self.buffalo_baseline_liters),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        let windows = [
            ("default_timeframe_days", self.default_timeframe_days),
            ("reminder_window_days", self.reminder_window_days),
        ];
        for (name, days) in windows {
            if days == 0 {
                return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }
}
