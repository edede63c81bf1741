//! Database models for the cash ledger.

use std::str::FromStr;

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;

use dematfolio_core::cash::CashEntry;

use crate::errors::StorageError;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::cash_ledger)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CashEntryDB {
    pub id: i32,
    pub date: NaiveDate,
    pub account_id: String,
    pub amount: String,
    pub note: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::cash_ledger)]
pub struct NewCashEntryDB {
    pub date: NaiveDate,
    pub account_id: String,
    pub amount: String,
    pub note: String,
}

impl TryFrom<CashEntryDB> for CashEntry {
    type Error = StorageError;

    fn try_from(db: CashEntryDB) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&db.amount).map_err(|e| {
            StorageError::CorruptRow(format!("cash entry {} amount '{}': {}", db.id, db.amount, e))
        })?;
        Ok(CashEntry {
            id: db.id,
            date: db.date,
            account_id: db.account_id,
            amount,
            note: db.note,
        })
    }
}
