use std::{collections::BTreeMap, sync::Arc};

use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voltmarket_core::{
    portfolio::{
        metrics::{calculate_portfolio_metrics, HoldingSnapshot, PeriodReturn, PortfolioMetrics},
        rebalancing::{recommend_rebalancing, RebalancingRecommendation},
    },
    Error as CoreError,
};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateMetricsBody {
    #[serde(default)]
    items: Vec<HoldingSnapshot>,
    #[serde(default)]
    performance_history: Vec<PeriodReturn>,
    #[serde(default)]
    target_allocation: BTreeMap<String, Decimal>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateMetricsResponse {
    metrics: PortfolioMetrics,
    recommendations: Vec<RebalancingRecommendation>,
}

/// Stateless calculation over posted items and history; nothing is stored.
async fn calculate_metrics(
    Json(body): Json<CalculateMetricsBody>,
) -> ApiResult<Json<CalculateMetricsResponse>> {
    let metrics = calculate_portfolio_metrics(&body.items, &body.performance_history)
        .map_err(CoreError::from)?;
    let recommendations = recommend_rebalancing(&body.items, &body.target_allocation)
        .map_err(CoreError::from)?;
    Ok(Json(CalculateMetricsResponse {
        metrics,
        recommendations,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/metrics/calculate", post(calculate_metrics))
}
