//! Net worth session state - reducer and store.

mod reducer;
mod state_model;
mod store;

pub use reducer::reduce;
pub use state_model::*;
pub use store::{NetWorthRepositories, NetWorthStore, NetWorthSummary};
