//! Net worth history - manual year-end points and the trend chart series.

mod history_model;
mod history_traits;
mod series_builder;

pub use history_model::*;
pub use history_traits::*;
pub use series_builder::*;
