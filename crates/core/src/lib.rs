//! Net worth tracker core - domain entities, calculators, and traits.
//!
//! This crate contains the account and balance history model, net worth
//! aggregation, the snapshot log, chart series bucketing, performance and
//! goal calculations, and the session store that ties them together.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod identity;
pub mod portfolio;
pub mod settings;
pub mod state;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
