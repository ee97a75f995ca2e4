//! Period performance over chart series and individual accounts.
//!
//! The two calculators treat a zero starting value differently: the portfolio
//! view reports 0%, the account view reports "New+".

use rust_decimal::Decimal;

use super::performance_model::{BalanceChange, PercentageChange, SeriesPerformance};
use crate::accounts::{latest_entry, previous_entry, Account};
use crate::constants::DECIMAL_PRECISION;
use crate::portfolio::history::ChartPoint;

/// Computes the change between the first and last point of `series`.
///
/// Returns `None` for fewer than two points. `series` is expected in
/// ascending date order, as produced by the series builder.
pub fn compute_performance(series: &[ChartPoint]) -> Option<SeriesPerformance> {
    if series.len() < 2 {
        return None;
    }
    let first = series.first()?;
    let last = series.last()?;

    let total_return = last.value - first.value;
    let percentage_change = if first.value.is_zero() {
        Decimal::ZERO
    } else {
        (total_return / first.value * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
    };

    Some(SeriesPerformance {
        start_date: first.date,
        end_date: last.date,
        start_value: first.value,
        end_value: last.value,
        total_return,
        percentage_change,
    })
}

/// Account-level percentage change from `previous` to `current`.
pub fn account_percentage_change(previous: Decimal, current: Decimal) -> PercentageChange {
    if previous.is_zero() {
        if current.is_zero() {
            PercentageChange::Finite(Decimal::ZERO)
        } else {
            PercentageChange::Unbounded
        }
    } else {
        PercentageChange::Finite(
            ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION),
        )
    }
}

/// Compares the latest balance entry with the one before it.
pub fn account_balance_change(account: &Account) -> Option<BalanceChange> {
    let current = latest_entry(account)?;
    let previous = previous_entry(account)?;

    Some(BalanceChange {
        previous_date: previous.date,
        current_date: current.date,
        previous_balance: previous.balance,
        current_balance: current.balance,
        amount: current.balance - previous.balance,
        percentage: account_percentage_change(previous.balance, current.balance),
    })
}
