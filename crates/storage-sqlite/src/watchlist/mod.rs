//! SQLite storage implementation for the watchlist.

mod model;
mod repository;

pub use model::{NewWatchlistItemDB, WatchlistItemDB};
pub use repository::WatchlistRepository;
