//! SQLite storage implementation for historical net worth.

mod model;
mod repository;

pub use model::HistoricalNetWorthDB;
pub use repository::HistoricalDataRepository;
