//! Database models for the watchlist.

use diesel::prelude::*;

use dematfolio_core::watchlist::{NewWatchlistItem, WatchlistItem};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatchlistItemDB {
    pub id: i32,
    pub symbol: String,
    pub tag: String,
    pub note: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist)]
pub struct NewWatchlistItemDB {
    pub symbol: String,
    pub tag: String,
    pub note: String,
}

impl From<WatchlistItemDB> for WatchlistItem {
    fn from(db: WatchlistItemDB) -> Self {
        Self {
            id: db.id,
            symbol: db.symbol,
            tag: db.tag,
            note: db.note,
        }
    }
}

impl From<NewWatchlistItem> for NewWatchlistItemDB {
    fn from(item: NewWatchlistItem) -> Self {
        Self {
            symbol: item.symbol,
            tag: item.tag,
            note: item.note,
        }
    }
}
