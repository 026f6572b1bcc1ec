use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use voltmarket_core::opportunities::{Opportunity, OpportunityQuery, OpportunityType};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpportunityParams {
    min_score: Option<Decimal>,
    #[serde(rename = "type")]
    opportunity_type: Option<String>,
    limit: Option<i64>,
}

async fn scan_opportunities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OpportunityParams>,
) -> ApiResult<Json<Vec<Opportunity>>> {
    let opportunity_type = params
        .opportunity_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::parse::<OpportunityType>)
        .transpose()?;
    let query = OpportunityQuery {
        min_score: params.min_score,
        opportunity_type,
        limit: params.limit,
    };
    Ok(Json(state.opportunity_scanner.scan(&query).await))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/opportunities", get(scan_opportunities))
}
