use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::errors::{DatabaseError, Error, Result};
use crate::watchlist::watchlist_model::{NewWatchlistItem, WatchlistItem};
use crate::watchlist::watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};

pub struct WatchlistService {
    watchlist_repository: Arc<dyn WatchlistRepositoryTrait>,
}

impl WatchlistService {
    pub fn new(watchlist_repository: Arc<dyn WatchlistRepositoryTrait>) -> Self {
        Self {
            watchlist_repository,
        }
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    fn get_items(&self) -> Result<Vec<WatchlistItem>> {
        self.watchlist_repository.list()
    }

    async fn add_item(&self, item: NewWatchlistItem) -> Result<WatchlistItem> {
        let item = item.validate()?;
        let created = self.watchlist_repository.add(item).await?;
        info!("Added {} to the watchlist", created.symbol);
        Ok(created)
    }

    async fn remove_item(&self, id: i32) -> Result<()> {
        match self.watchlist_repository.remove(id).await? {
            0 => Err(Error::Database(DatabaseError::NotFound(format!(
                "Watchlist item {} not found",
                id
            )))),
            _ => {
                info!("Removed watchlist item {}", id);
                Ok(())
            }
        }
    }
}
