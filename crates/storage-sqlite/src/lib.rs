//! SQLite storage implementation for the net worth tracker.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `networth-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for accounts, snapshots, history, goals and settings
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place where Diesel dependencies exist. The core crate
//! is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!   storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```
//!
//! All reads go through the r2d2 pool; all writes go through a single writer
//! task so that SQLite never sees concurrent writers.

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod accounts;
pub mod goals;
pub mod history;
pub mod portfolio;
pub mod settings;

use std::sync::Arc;

use networth_core::state::NetWorthRepositories;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accounts::AccountRepository;
pub use goals::GoalRepository;
pub use history::HistoricalDataRepository;
pub use portfolio::snapshot::SnapshotRepository;
pub use settings::SettingsRepository;

// Re-export from networth-core for convenience
pub use networth_core::errors::{DatabaseError, Error, Result};

/// Builds the remote repository set over one pool and writer.
pub fn repositories(pool: Arc<DbPool>, writer: WriteHandle) -> NetWorthRepositories {
    NetWorthRepositories {
        accounts: Arc::new(AccountRepository::new(pool.clone(), writer.clone())),
        snapshots: Arc::new(SnapshotRepository::new(pool.clone(), writer.clone())),
        historical: Arc::new(HistoricalDataRepository::new(pool.clone(), writer.clone())),
        goals: Arc::new(GoalRepository::new(pool, writer)),
    }
}
