//! Cash ledger domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A deposit (positive amount) or withdrawal (negative amount).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashEntry {
    pub id: i32,
    pub date: NaiveDate,
    pub account_id: String,
    pub amount: Decimal,
    pub note: String,
}

/// Input model for recording a cash movement
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCashEntry {
    pub date: Option<NaiveDate>,
    pub account_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewCashEntry {
    pub fn validate(mut self) -> Result<Self> {
        self.account_id = self.account_id.trim().to_string();
        self.note = self.note.map(|n| n.trim().to_string());
        if self.account_id.is_empty() {
            return Err(ValidationError::MissingField("accountId".to_string()).into());
        }
        if self.amount.is_zero() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be non-zero".to_string(),
            )));
        }
        Ok(self)
    }
}

/// Net cash per account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashBalance {
    pub account_id: String,
    pub balance: Decimal,
}
