//! Database models for the transaction ledger.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;

use dematfolio_core::transactions::{NewTransaction, Transaction, TransactionSide};

use crate::errors::StorageError;

/// Database model for a stored transaction
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i32,
    pub date: NaiveDate,
    pub account_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: String,
    pub side: String,
    pub strategy: String,
    pub created_at: NaiveDateTime,
}

/// Database model for appending a transaction
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub date: NaiveDate,
    pub account_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: String,
    pub side: String,
    pub strategy: String,
    pub created_at: NaiveDateTime,
}

impl NewTransactionDB {
    pub fn from_domain(new_transaction: NewTransaction, created_at: NaiveDateTime) -> Self {
        Self {
            date: new_transaction.date,
            account_id: new_transaction.account_id,
            symbol: new_transaction.symbol,
            quantity: new_transaction.quantity,
            price: new_transaction.price.to_string(),
            side: new_transaction.side.as_str().to_string(),
            strategy: new_transaction.strategy,
            created_at,
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&db.price).map_err(|e| {
            StorageError::CorruptRow(format!("transaction {} price '{}': {}", db.id, db.price, e))
        })?;
        let side = TransactionSide::from_str(&db.side).map_err(|e| {
            StorageError::CorruptRow(format!("transaction {}: {}", db.id, e))
        })?;
        Ok(Transaction {
            id: db.id,
            date: db.date,
            account_id: db.account_id,
            symbol: db.symbol,
            quantity: db.quantity,
            price,
            side,
            strategy: db.strategy,
            created_at: db.created_at,
        })
    }
}
