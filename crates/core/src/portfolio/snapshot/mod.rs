//! Net worth snapshot module - the snapshot log, its same-day rule, and storage.

mod local_snapshot_repository;
mod snapshot_model;
mod snapshot_planner;
mod snapshot_traits;

pub use local_snapshot_repository::LocalSnapshotRepository;
pub use snapshot_model::*;
pub use snapshot_planner::*;
pub use snapshot_traits::*;

#[cfg(test)]
mod snapshot_planner_tests;
