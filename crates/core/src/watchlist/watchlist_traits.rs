use crate::errors::Result;
use crate::watchlist::watchlist_model::{NewWatchlistItem, WatchlistItem};
use async_trait::async_trait;

#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<WatchlistItem>>;
    async fn add(&self, item: NewWatchlistItem) -> Result<WatchlistItem>;
    /// Returns the number of rows removed.
    async fn remove(&self, id: i32) -> Result<usize>;
}

#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    fn get_items(&self) -> Result<Vec<WatchlistItem>>;
    async fn add_item(&self, item: NewWatchlistItem) -> Result<WatchlistItem>;
    async fn remove_item(&self, id: i32) -> Result<()>;
}
