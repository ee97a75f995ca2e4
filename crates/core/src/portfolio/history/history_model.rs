//! Historical net worth and chart series models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};
use crate::Result;

/// Earliest year accepted for a manually entered data point.
pub const MIN_HISTORICAL_YEAR: i32 = 1900;
/// Latest year accepted for a manually entered data point.
pub const MAX_HISTORICAL_YEAR: i32 = 9999;

/// Manually entered year-end net worth. Unique per owner and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataPoint {
    pub year: i32,
    pub net_worth: Decimal,
}

impl HistoricalDataPoint {
    pub fn new(year: i32, net_worth: Decimal) -> Self {
        Self { year, net_worth }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_HISTORICAL_YEAR..=MAX_HISTORICAL_YEAR).contains(&self.year) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Year must be between {} and {}, got {}",
                MIN_HISTORICAL_YEAR, MAX_HISTORICAL_YEAR, self.year
            ))));
        }
        Ok(())
    }
}

/// Chart time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeFrame {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

/// How snapshot points inside a window are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucketing {
    /// Every point is kept.
    None,
    /// Keyed by the Monday on or before the date.
    Weekly,
    /// Keyed by the 1st or the 15th of the month.
    BiWeekly,
    /// Keyed by the 1st of the month.
    Monthly,
}

impl TimeFrame {
    pub const ALL_FRAMES: [TimeFrame; 5] = [
        TimeFrame::OneMonth,
        TimeFrame::ThreeMonths,
        TimeFrame::SixMonths,
        TimeFrame::OneYear,
        TimeFrame::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::OneMonth => "1M",
            TimeFrame::ThreeMonths => "3M",
            TimeFrame::SixMonths => "6M",
            TimeFrame::OneYear => "1Y",
            TimeFrame::All => "ALL",
        }
    }

    /// Window length in months; `None` for the all-time window.
    pub fn months(&self) -> Option<u32> {
        match self {
            TimeFrame::OneMonth => Some(1),
            TimeFrame::ThreeMonths => Some(3),
            TimeFrame::SixMonths => Some(6),
            TimeFrame::OneYear => Some(12),
            TimeFrame::All => None,
        }
    }

    pub fn bucketing(&self) -> Bucketing {
        match self {
            TimeFrame::OneMonth => Bucketing::None,
            TimeFrame::ThreeMonths => Bucketing::Weekly,
            TimeFrame::SixMonths => Bucketing::BiWeekly,
            TimeFrame::OneYear | TimeFrame::All => Bucketing::Monthly,
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        TimeFrame::ALL_FRAMES
            .iter()
            .copied()
            .find(|tf| tf.as_str() == normalized)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unsupported time frame: {}",
                    s
                )))
            })
    }
}

/// One point of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    pub value: Decimal,
    /// True for manually entered year-end points.
    pub is_historical: bool,
}
