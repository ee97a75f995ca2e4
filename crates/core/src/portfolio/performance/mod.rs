mod performance_calculator;
mod performance_model;

pub use performance_calculator::*;
pub use performance_model::*;
