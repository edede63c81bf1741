use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use dematfolio_core::portfolio::{
    holdings::HoldingsFilter,
    reports::{with_allocation, AllocatedHolding},
};

/// Allocation is relative to the filtered set.
async fn get_holdings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<HoldingsFilter>,
) -> ApiResult<Json<Vec<AllocatedHolding>>> {
    let holdings = state.holdings_service.get_holdings(&filter)?;
    Ok(Json(with_allocation(&holdings)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/holdings", get(get_holdings))
}
