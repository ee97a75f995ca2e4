//! Goals domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Error, ValidationError};
use crate::Result;

/// The owner's single net worth target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserGoal {
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
}

/// Input model for setting the goal
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct NewUserGoal {
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
}

impl NewUserGoal {
    pub fn validate(&self) -> Result<()> {
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal target amount must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }
}

impl From<NewUserGoal> for UserGoal {
    fn from(goal: NewUserGoal) -> Self {
        Self {
            target_amount: goal.target_amount,
            target_date: goal.target_date,
        }
    }
}

/// Progress towards the goal. Always derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub target_amount: Decimal,
    pub current_net_worth: Decimal,
    /// 0-100
    pub progress_percent: Decimal,
    pub remaining_amount: Decimal,
    pub days_remaining: i64,
    pub is_achieved: bool,
}

impl GoalProgress {
    pub fn compute(goal: &UserGoal, net_worth: Decimal, today: NaiveDate) -> Self {
        let progress_percent = if goal.target_amount > Decimal::ZERO {
            (net_worth / goal.target_amount * Decimal::ONE_HUNDRED)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                .round_dp(DECIMAL_PRECISION)
        } else {
            Decimal::ZERO
        };

        Self {
            target_amount: goal.target_amount,
            current_net_worth: net_worth,
            progress_percent,
            remaining_amount: (goal.target_amount - net_worth).max(Decimal::ZERO),
            days_remaining: (goal.target_date - today).num_days().max(0),
            is_achieved: net_worth >= goal.target_amount,
        }
    }
}
