use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};
use dematfolio_core::cash::{CashBalance, CashEntry, NewCashEntry};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CashLedgerResponse {
    entries: Vec<CashEntry>,
    balances: Vec<CashBalance>,
}

async fn get_cash(State(state): State<Arc<AppState>>) -> ApiResult<Json<CashLedgerResponse>> {
    let entries = state.cash_service.get_entries()?;
    let balances = state.cash_service.get_balances()?;
    Ok(Json(CashLedgerResponse { entries, balances }))
}

async fn record_cash_entry(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewCashEntry>,
) -> ApiResult<Json<CashEntry>> {
    let created = state.cash_service.record_entry(entry).await?;
    Ok(Json(created))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/cash", get(get_cash).post(record_cash_entry))
}
