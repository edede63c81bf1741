use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Direction of a trade. Only BUY and SELL exist; anything else is rejected
/// when the transaction is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl TransactionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSide::Buy => "BUY",
            TransactionSide::Sell => "SELL",
        }
    }

    /// Applies the side's sign to an unsigned quantity.
    pub fn signed_quantity(&self, quantity: i64) -> i64 {
        match self {
            TransactionSide::Buy => quantity,
            TransactionSide::Sell => -quantity,
        }
    }
}

impl fmt::Display for TransactionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionSide {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim();
        if normalized.eq_ignore_ascii_case("BUY") {
            Ok(TransactionSide::Buy)
        } else if normalized.eq_ignore_ascii_case("SELL") {
            Ok(TransactionSide::Sell)
        } else {
            Err(ValidationError::InvalidSide(s.to_string()))
        }
    }
}

/// A persisted buy/sell record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub date: NaiveDate,
    pub account_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    pub side: TransactionSide,
    pub strategy: String,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// Quantity with the side's sign applied (+ for BUY, - for SELL).
    pub fn signed_quantity(&self) -> i64 {
        self.side.signed_quantity(self.quantity)
    }
}

/// Payload for appending a transaction to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub account_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    pub side: TransactionSide,
    pub strategy: String,
}

impl NewTransaction {
    /// Checks the fields the aggregation engine relies on and trims the
    /// free-text identifiers.
    pub fn validate(mut self) -> Result<Self> {
        self.account_id = self.account_id.trim().to_string();
        self.symbol = self.symbol.trim().to_string();
        self.strategy = self.strategy.trim().to_string();

        if self.account_id.is_empty() {
            return Err(ValidationError::MissingField("accountId".to_string()).into());
        }
        if self.symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if self.strategy.is_empty() {
            return Err(ValidationError::MissingField("strategy".to_string()).into());
        }
        if self.quantity <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity must be a positive integer, got {}",
                self.quantity
            ))));
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Price must be positive, got {}",
                self.price
            ))));
        }
        Ok(self)
    }
}

/// Request body for a single manual insert. The side arrives as free text so
/// that an unrecognized value is reported as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub date: Option<NaiveDate>,
    pub account_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    pub side: String,
    pub strategy: String,
}

impl TransactionInput {
    pub fn into_new_transaction(self, default_date: NaiveDate) -> Result<NewTransaction> {
        let side = TransactionSide::from_str(&self.side)?;
        NewTransaction {
            date: self.date.unwrap_or(default_date),
            account_id: self.account_id,
            symbol: self.symbol,
            quantity: self.quantity,
            price: self.price,
            side,
            strategy: self.strategy,
        }
        .validate()
    }
}
