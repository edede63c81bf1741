use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use dematfolio_core::{export::export_workbook, utils::time_utils::today};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Ledger and holdings as one downloadable `.xlsx` workbook.
async fn export_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let snapshot = state.holdings_service.get_snapshot()?;
    let bytes = export_workbook(&snapshot.transactions, &snapshot.holdings)?;
    let disposition = format!(
        "attachment; filename=\"portfolio-{}.xlsx\"",
        today().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/export", get(export_portfolio))
}
