use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use dematfolio_core::{
    constants::{DEFAULT_AVERAGING_THRESHOLD_PCT, GROUPED_TOP_N, OVERALL_TOP_N},
    portfolio::{
        holdings::HoldingsFilter,
        reports::{
            averaging_candidates, group_summary, portfolio_overview, top_performers,
            AveragingReport, GroupDimension, GroupSummary, PerformanceOrder, PerformerRow,
            PortfolioOverview,
        },
    },
};

fn parse_param<T>(name: &str, raw: &str) -> ApiResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| ApiError::BadRequest(format!("Invalid '{}': {}", name, e)))
}

async fn get_overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioOverview>> {
    let holdings = state
        .holdings_service
        .get_holdings(&HoldingsFilter::default())?;
    Ok(Json(portfolio_overview(&holdings)?))
}

#[derive(Deserialize)]
struct GroupsQuery {
    by: Option<String>,
}

async fn get_groups(
    State(state): State<Arc<AppState>>,
    Query(q): Query<GroupsQuery>,
) -> ApiResult<Json<Vec<GroupSummary>>> {
    let dimension = match q.by.as_deref() {
        Some(raw) => parse_param::<GroupDimension>("by", raw)?,
        None => GroupDimension::Strategy,
    };
    let holdings = state
        .holdings_service
        .get_holdings(&HoldingsFilter::default())?;
    Ok(Json(group_summary(&holdings, dimension)?))
}

#[derive(Deserialize)]
struct PerformersQuery {
    order: Option<String>,
    by: Option<String>,
    top: Option<usize>,
}

async fn get_performers(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PerformersQuery>,
) -> ApiResult<Json<Vec<PerformerRow>>> {
    let order = match q.order.as_deref() {
        Some(raw) => parse_param::<PerformanceOrder>("order", raw)?,
        None => PerformanceOrder::Winners,
    };
    let group_by = q
        .by
        .as_deref()
        .map(|raw| parse_param::<GroupDimension>("by", raw))
        .transpose()?;
    let top_n = q.top.unwrap_or(if group_by.is_some() {
        GROUPED_TOP_N
    } else {
        OVERALL_TOP_N
    });

    let holdings = state
        .holdings_service
        .get_holdings(&HoldingsFilter::default())?;
    Ok(Json(top_performers(&holdings, order, group_by, top_n)?))
}

#[derive(Deserialize)]
struct AveragingQuery {
    threshold: Option<u32>,
}

async fn get_averaging(
    State(state): State<Arc<AppState>>,
    Query(q): Query<AveragingQuery>,
) -> ApiResult<Json<AveragingReport>> {
    let holdings = state
        .holdings_service
        .get_holdings(&HoldingsFilter::default())?;
    let report = averaging_candidates(
        &holdings,
        q.threshold.unwrap_or(DEFAULT_AVERAGING_THRESHOLD_PCT),
    )?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/overview", get(get_overview))
        .route("/reports/groups", get(get_groups))
        .route("/reports/performers", get(get_performers))
        .route("/reports/averaging", get(get_averaging))
}
