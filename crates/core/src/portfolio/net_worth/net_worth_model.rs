//! Net worth domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountType;

/// Aggregated totals across all accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthTotals {
    /// Sum of current balances of non-liability accounts
    pub total_assets: Decimal,
    /// Sum of current balances of liability accounts (positive magnitude)
    pub total_liabilities: Decimal,
    /// total_assets - total_liabilities
    pub net_worth: Decimal,
}

impl NetWorthTotals {
    pub fn new(total_assets: Decimal, total_liabilities: Decimal) -> Self {
        Self {
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
        }
    }
}

/// One slice of the asset allocation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationItem {
    pub account_type: AccountType,
    /// Display name of the group
    pub name: String,
    /// Value in base currency
    pub value: Decimal,
    /// Share of total assets, 0-100
    pub percentage: Decimal,
}
