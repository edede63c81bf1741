use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use dematfolio_core::cash::{CashEntry, CashRepositoryTrait, NewCashEntry};
use dematfolio_core::errors::{Error, ValidationError};
use dematfolio_core::Result;

use super::model::{CashEntryDB, NewCashEntryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::cash_ledger;

pub struct CashRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CashRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CashRepositoryTrait for CashRepository {
    fn list(&self) -> Result<Vec<CashEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = cash_ledger::table
            .select(CashEntryDB::as_select())
            .order((cash_ledger::date.asc(), cash_ledger::id.asc()))
            .load::<CashEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| CashEntry::try_from(row).map_err(Into::into))
            .collect()
    }

    async fn append(&self, entry: NewCashEntry) -> Result<CashEntry> {
        let date = entry.date.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("date".to_string()))
        })?;
        let row = NewCashEntryDB {
            date,
            account_id: entry.account_id,
            amount: entry.amount.to_string(),
            note: entry.note.unwrap_or_default(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CashEntry> {
                let stored = diesel::insert_into(cash_ledger::table)
                    .values(&row)
                    .returning(CashEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CashEntry::try_from(stored)?)
            })
            .await
    }
}
