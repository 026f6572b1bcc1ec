use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use voltmarket_core::portfolio::{
    metrics::PortfolioMetrics, rebalancing::RebalancingRecommendation, ItemStatus,
    NewPerformancePoint, NewPortfolio, NewPortfolioItem, PerformancePoint, Portfolio,
    PortfolioItem, PortfolioSummary,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValuationBody {
    current_value: Decimal,
}

#[derive(Deserialize)]
struct StatusBody {
    status: ItemStatus,
}

async fn list_portfolios(
    State(state): State<Arc<AppState>>,
    Query(q): Query<UserQuery>,
) -> ApiResult<Json<Vec<Portfolio>>> {
    let user_id = q
        .user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("userId query parameter is required".to_string()))?;
    let portfolios = state.portfolio_service.list_portfolios(&user_id)?;
    Ok(Json(portfolios))
}

async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPortfolio>,
) -> ApiResult<Json<Portfolio>> {
    let created = state.portfolio_service.create_portfolio(payload).await?;
    Ok(Json(created))
}

async fn get_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Portfolio>> {
    Ok(Json(state.portfolio_service.get_portfolio(&id)?))
}

async fn get_summary(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSummary>> {
    Ok(Json(state.portfolio_service.get_summary(&id)?))
}

async fn get_metrics(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioMetrics>> {
    Ok(Json(state.portfolio_service.calculate_metrics(&id)?))
}

async fn get_recommendations(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<RebalancingRecommendation>>> {
    Ok(Json(
        state.portfolio_service.get_rebalancing_recommendations(&id)?,
    ))
}

async fn list_items(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PortfolioItem>>> {
    Ok(Json(state.portfolio_service.list_items(&id)?))
}

async fn add_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPortfolioItem>,
) -> ApiResult<Json<PortfolioItem>> {
    let item = state.portfolio_service.add_item(&id, payload).await?;
    Ok(Json(item))
}

async fn refresh_valuation(
    Path((id, item_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValuationBody>,
) -> ApiResult<Json<PortfolioItem>> {
    let item = state
        .portfolio_service
        .refresh_item_valuation(&id, &item_id, body.current_value)
        .await?;
    Ok(Json(item))
}

async fn change_status(
    Path((id, item_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<PortfolioItem>> {
    let item = state
        .portfolio_service
        .change_item_status(&id, &item_id, body.status)
        .await?;
    Ok(Json(item))
}

async fn get_performance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PerformancePoint>>> {
    Ok(Json(state.portfolio_service.get_performance_history(&id)?))
}

async fn record_performance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPerformancePoint>,
) -> ApiResult<Json<PerformancePoint>> {
    let point = state
        .portfolio_service
        .record_performance(&id, payload)
        .await?;
    Ok(Json(point))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", get(list_portfolios).post(create_portfolio))
        .route("/portfolios/{id}", get(get_portfolio))
        .route("/portfolios/{id}/summary", get(get_summary))
        .route("/portfolios/{id}/metrics", get(get_metrics))
        .route("/portfolios/{id}/recommendations", get(get_recommendations))
        .route("/portfolios/{id}/items", get(list_items).post(add_item))
        .route(
            "/portfolios/{id}/items/{item_id}/valuation",
            put(refresh_valuation),
        )
        .route("/portfolios/{id}/items/{item_id}/status", put(change_status))
        .route(
            "/portfolios/{id}/performance",
            get(get_performance).post(record_performance),
        )
}
