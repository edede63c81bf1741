//! Dematfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Dematfolio: the
//! transaction ledger, the holdings aggregation engine and the reports built
//! on top of it. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod cash;
pub mod constants;
pub mod errors;
pub mod export;
pub mod portfolio;
pub mod prices;
pub mod transactions;
pub mod utils;
pub mod watchlist;

// Re-export common types from the portfolio module
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
