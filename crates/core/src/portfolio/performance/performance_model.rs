use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Change between the first and last point of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPerformance {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_value: Decimal,
    pub end_value: Decimal,
    /// end_value - start_value
    pub total_return: Decimal,
    /// Percent; 0 when the start value is 0
    pub percentage_change: Decimal,
}

/// Account-level percentage change.
///
/// Growing from a zero balance has no finite percentage and is reported as
/// `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PercentageChange {
    Finite(Decimal),
    Unbounded,
}

impl PercentageChange {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            PercentageChange::Finite(value) => Some(*value),
            PercentageChange::Unbounded => None,
        }
    }
}

impl fmt::Display for PercentageChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentageChange::Finite(value) => {
                let rounded = value.round_dp(DISPLAY_DECIMAL_PRECISION);
                write!(f, "{:.2}%", rounded)
            }
            PercentageChange::Unbounded => f.write_str("New+"),
        }
    }
}

/// Change between an account's latest balance and the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub previous_date: DateTime<Utc>,
    pub current_date: DateTime<Utc>,
    pub previous_balance: Decimal,
    pub current_balance: Decimal,
    pub amount: Decimal,
    pub percentage: PercentageChange,
}
