//! SQLite storage implementation for Dematfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `dematfolio-core` and contains:
//! - Database file setup and connection pooling
//! - Embedded Diesel migrations
//! - The single-writer actor every insert and delete goes through
//! - Repository implementations for the ledger, cash ledger and watchlist
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod cash;
pub mod transactions;
pub mod watchlist;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use cash::CashRepository;
pub use transactions::TransactionRepository;
pub use watchlist::WatchlistRepository;

// Re-export from dematfolio-core for convenience
pub use dematfolio_core::errors::{DatabaseError, Error, Result};
