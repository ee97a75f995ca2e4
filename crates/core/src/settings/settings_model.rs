//! Application settings.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_CURRENCY, DEFAULT_SNAPSHOT_MATERIALITY_THRESHOLD};
use crate::errors::{Error, Result};
use crate::utils::time_utils::DEFAULT_VALUATION_TZ;

pub const BASE_CURRENCY_KEY: &str = "base_currency";
pub const VALUATION_TIMEZONE_KEY: &str = "valuation_timezone";
pub const SNAPSHOT_THRESHOLD_KEY: &str = "snapshot_materiality_threshold";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_currency: String,
    /// IANA timezone name used for calendar-day logic
    pub valuation_timezone: String,
    /// Minimum net worth change that replaces a same-day snapshot
    pub snapshot_materiality_threshold: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            valuation_timezone: DEFAULT_VALUATION_TZ.name().to_string(),
            snapshot_materiality_threshold: DEFAULT_SNAPSHOT_MATERIALITY_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.base_currency.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "Base currency cannot be empty".to_string(),
            ));
        }
        if self.snapshot_materiality_threshold <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "Snapshot materiality threshold must be positive, got {}",
                self.snapshot_materiality_threshold
            )));
        }
        self.timezone()?;
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.valuation_timezone.parse::<Tz>().map_err(|_| {
            Error::InvalidConfigValue(format!(
                "Unknown valuation timezone '{}'",
                self.valuation_timezone
            ))
        })
    }

    /// Applies one stored key/value pair. Unknown keys are ignored; malformed
    /// values leave the current value in place.
    pub fn apply_stored_value(&mut self, key: &str, value: &str) {
        match key {
            BASE_CURRENCY_KEY => self.base_currency = value.to_string(),
            VALUATION_TIMEZONE_KEY => self.valuation_timezone = value.to_string(),
            SNAPSHOT_THRESHOLD_KEY => {
                if let Ok(threshold) = value.parse::<Decimal>() {
                    self.snapshot_materiality_threshold = threshold;
                }
            }
            _ => {}
        }
    }
}

/// Partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub base_currency: Option<String>,
    pub valuation_timezone: Option<String>,
    pub snapshot_materiality_threshold: Option<Decimal>,
}

impl SettingsUpdate {
    /// Returns the settings that would result from applying this update.
    pub fn apply_to(&self, settings: &Settings) -> Settings {
        let mut next = settings.clone();
        if let Some(ref base_currency) = self.base_currency {
            next.base_currency = base_currency.trim().to_uppercase();
        }
        if let Some(ref tz) = self.valuation_timezone {
            next.valuation_timezone = tz.trim().to_string();
        }
        if let Some(threshold) = self.snapshot_materiality_threshold {
            next.snapshot_materiality_threshold = threshold;
        }
        next
    }

    /// Key/value pairs to persist.
    pub fn to_key_values(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref base_currency) = self.base_currency {
            pairs.push((BASE_CURRENCY_KEY, base_currency.trim().to_uppercase()));
        }
        if let Some(ref tz) = self.valuation_timezone {
            pairs.push((VALUATION_TIMEZONE_KEY, tz.trim().to_string()));
        }
        if let Some(threshold) = self.snapshot_materiality_threshold {
            pairs.push((SNAPSHOT_THRESHOLD_KEY, threshold.to_string()));
        }
        pairs
    }
}
