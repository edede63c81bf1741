use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use dematfolio_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use dematfolio_core::Result;

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, account_id: Option<&str>) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .select(TransactionDB::as_select())
            .order(transactions::id.asc())
            .into_boxed();
        if let Some(account_id) = account_id {
            query = query.filter(transactions::account_id.eq(account_id.to_string()));
        }
        let rows = query.load::<TransactionDB>(&mut conn).map_err(StorageError::from)?;
        debug!("Loaded {} transactions", rows.len());

        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn fetch_all(&self) -> Result<Vec<Transaction>> {
        self.load(None)
    }

    fn fetch_by_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        self.load(Some(account_id))
    }

    async fn append(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let row = NewTransactionDB::from_domain(new_transaction, Utc::now().naive_utc());
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let stored = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(stored)?)
            })
            .await
    }
}
