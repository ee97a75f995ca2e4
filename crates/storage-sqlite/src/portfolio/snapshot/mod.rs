//! SQLite storage implementation for net worth snapshots.

mod model;
mod repository;

pub use model::{SnapshotAccountBalanceDB, SnapshotDB};
pub use repository::SnapshotRepository;

// Re-export trait from core for convenience
pub use networth_core::portfolio::snapshot::SnapshotRepositoryTrait;
