use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use dematfolio_core::watchlist::{NewWatchlistItem, WatchlistItem, WatchlistRepositoryTrait};
use dematfolio_core::Result;

use super::model::{NewWatchlistItemDB, WatchlistItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::watchlist;

pub struct WatchlistRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    fn list(&self) -> Result<Vec<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = watchlist::table
            .select(WatchlistItemDB::as_select())
            .order(watchlist::id.asc())
            .load::<WatchlistItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(WatchlistItem::from).collect())
    }

    async fn add(&self, item: NewWatchlistItem) -> Result<WatchlistItem> {
        let row = NewWatchlistItemDB::from(item);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WatchlistItem> {
                let stored = diesel::insert_into(watchlist::table)
                    .values(&row)
                    .returning(WatchlistItemDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(WatchlistItem::from(stored))
            })
            .await
    }

    async fn remove(&self, id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(watchlist::table.find(id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
