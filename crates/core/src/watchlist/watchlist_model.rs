use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A symbol being followed without a position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: i32,
    pub symbol: String,
    pub tag: String,
    pub note: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistItem {
    pub symbol: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub note: String,
}

impl NewWatchlistItem {
    pub fn validate(self) -> Result<Self> {
        let symbol = self.symbol.trim().to_string();
        if symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        Ok(Self {
            symbol,
            tag: self.tag.trim().to_string(),
            note: self.note.trim().to_string(),
        })
    }
}
