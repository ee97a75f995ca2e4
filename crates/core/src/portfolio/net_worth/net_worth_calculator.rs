//! Net worth aggregation.
//!
//! Pure functions over the current balances of a set of accounts. Only
//! `AccountType::Liability` accounts are subtracted; every other type counts as
//! an asset.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::net_worth_model::{AllocationItem, NetWorthTotals};
use crate::accounts::{current_balance, Account, AccountType};
use crate::constants::DECIMAL_PRECISION;

/// Sums current balances into assets, liabilities and net worth.
///
/// Liability balances are stored as magnitudes and added to
/// `total_liabilities` as-is.
pub fn aggregate(accounts: &[Account]) -> NetWorthTotals {
    let (assets, liabilities) =
        accounts
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(assets, liabilities), account| {
                let balance = current_balance(account);
                if account.is_liability() {
                    (assets, liabilities + balance)
                } else {
                    (assets + balance, liabilities)
                }
            });

    NetWorthTotals::new(
        assets.round_dp(DECIMAL_PRECISION),
        liabilities.round_dp(DECIMAL_PRECISION),
    )
}

/// Breaks total assets down by account type.
///
/// Groups whose value is zero or negative are omitted. Returns an empty list
/// when there are no positive assets.
pub fn allocation(accounts: &[Account]) -> Vec<AllocationItem> {
    let mut by_type: BTreeMap<AccountType, Decimal> = BTreeMap::new();
    for account in accounts.iter().filter(|a| !a.is_liability()) {
        *by_type.entry(account.account_type).or_insert(Decimal::ZERO) += current_balance(account);
    }

    let groups: Vec<(AccountType, Decimal)> = by_type
        .into_iter()
        .filter(|(_, value)| *value > Decimal::ZERO)
        .collect();
    let total: Decimal = groups.iter().map(|(_, value)| *value).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut items: Vec<AllocationItem> = groups
        .into_iter()
        .map(|(account_type, value)| AllocationItem {
            account_type,
            name: account_type.default_group().to_string(),
            value: value.round_dp(DECIMAL_PRECISION),
            percentage: (value / total * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION),
        })
        .collect();
    items.sort_by(|a, b| b.value.cmp(&a.value));
    items
}
