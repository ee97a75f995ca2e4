//! Goals module - the net worth target and its progress.

mod goals_model;
mod goals_traits;

pub use goals_model::{GoalProgress, NewUserGoal, UserGoal};
pub use goals_traits::GoalRepositoryTrait;
