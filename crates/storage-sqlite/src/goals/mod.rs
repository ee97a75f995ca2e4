//! SQLite storage implementation for the net worth goal.

mod model;
mod repository;

pub use model::UserGoalDB;
pub use repository::GoalRepository;
