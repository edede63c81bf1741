use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use dematfolio_core::{
    errors::Error as CoreError,
    transactions::{ImportSummary, Transaction, TransactionInput, UploadKind, UploadOptions},
    utils::time_utils::today,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsQuery {
    account_id: Option<String>,
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TransactionsQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = match q.account_id.as_deref() {
        Some(account_id) => state
            .transaction_service
            .get_transactions_by_account(account_id)?,
        None => state.transaction_service.get_transactions()?,
    };
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TransactionInput>,
) -> ApiResult<Json<Transaction>> {
    let created = state.transaction_service.create_transaction(input).await?;
    Ok(Json(created))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportQuery {
    kind: String,
    file_name: String,
    account_id: Option<String>,
    strategy: Option<String>,
    date: Option<NaiveDate>,
}

impl ImportQuery {
    fn into_options(self) -> ApiResult<(String, UploadOptions)> {
        let kind: UploadKind = self.kind.parse().map_err(CoreError::from)?;
        let mut options = UploadOptions::new(kind, self.date.unwrap_or_else(today));
        if let Some(account_id) = self.account_id {
            options.account_id = account_id;
        }
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        Ok((self.file_name, options))
    }
}

/// Raw file upload; the body is the file content.
async fn import_transactions(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ImportQuery>,
    body: Bytes,
) -> ApiResult<Json<ImportSummary>> {
    let (file_name, options) = q.into_options()?;
    let summary = state
        .transaction_service
        .import_file(&file_name, &body, options)
        .await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/import", post(import_transactions))
}
