use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use voltmarket_core::capabilities::{Capability, LetterOfIntent, NewLetterOfIntent};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoiQuery {
    user_id: Option<String>,
}

async fn list_lois(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LoiQuery>,
) -> ApiResult<Json<Vec<LetterOfIntent>>> {
    state.capabilities.require(Capability::LettersOfIntent)?;
    let user_id = q
        .user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("userId query parameter is required".to_string()))?;
    Ok(Json(state.loi_service.list_for_user(&user_id)?))
}

async fn submit_loi(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLetterOfIntent>,
) -> ApiResult<Json<LetterOfIntent>> {
    state.capabilities.require(Capability::LettersOfIntent)?;
    Ok(Json(state.loi_service.submit(payload).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/lois", get(list_lois).post(submit_loi))
}
