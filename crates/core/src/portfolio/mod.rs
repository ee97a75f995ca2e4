//! Portfolio-level calculations: totals, snapshots, history and performance.

pub mod history;
pub mod net_worth;
pub mod performance;
pub mod snapshot;
