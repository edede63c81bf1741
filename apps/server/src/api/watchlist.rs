use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};
use dematfolio_core::watchlist::{NewWatchlistItem, WatchlistItem};

async fn get_watchlist(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<WatchlistItem>>> {
    let items = state.watchlist_service.get_items()?;
    Ok(Json(items))
}

async fn add_watchlist_item(
    State(state): State<Arc<AppState>>,
    Json(item): Json<NewWatchlistItem>,
) -> ApiResult<Json<WatchlistItem>> {
    let created = state.watchlist_service.add_item(item).await?;
    Ok(Json(created))
}

async fn remove_watchlist_item(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.watchlist_service.remove_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlist", get(get_watchlist).post(add_watchlist_item))
        .route("/watchlist/{id}", delete(remove_watchlist_item))
}
