//! Watchlist - symbols followed without holding them.

mod watchlist_model;
mod watchlist_service;
mod watchlist_traits;

#[cfg(test)]
mod watchlist_service_tests;

pub use watchlist_model::{NewWatchlistItem, WatchlistItem};
pub use watchlist_service::WatchlistService;
pub use watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
