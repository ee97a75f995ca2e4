//! Net worth calculation module.
//!
//! Aggregates current account balances into totals and an asset allocation
//! breakdown.

mod net_worth_calculator;
mod net_worth_model;

pub use net_worth_calculator::*;
pub use net_worth_model::*;
