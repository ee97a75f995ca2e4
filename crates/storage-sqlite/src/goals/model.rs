//! Database model for the net worth goal.

use diesel::prelude::*;

use crate::utils::{format_date, parse_date, parse_decimal};
use networth_core::errors::{Error, Result};
use networth_core::goals::UserGoal;

/// Database model for goals. One row per owner.
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserGoalDB {
    pub owner_id: String,
    pub target_amount: String,
    pub target_date: String,
    pub updated_at: String,
}

impl UserGoalDB {
    pub fn from_domain(owner: &str, goal: &UserGoal, updated_at: String) -> Self {
        Self {
            owner_id: owner.to_string(),
            target_amount: goal.target_amount.to_string(),
            target_date: format_date(goal.target_date),
            updated_at,
        }
    }
}

impl TryFrom<UserGoalDB> for UserGoal {
    type Error = Error;

    fn try_from(db: UserGoalDB) -> Result<Self> {
        Ok(Self {
            target_amount: parse_decimal(&db.target_amount, "target_amount")?,
            target_date: parse_date(&db.target_date, "target_date")?,
        })
    }
}
