use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use voltmarket_core::watchlist::{NewWatchlistEntry, WatchlistEntry, WatchlistItem};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistQuery {
    user_id: Option<String>,
    listing_id: Option<String>,
}

fn required(value: Option<String>, name: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} query parameter is required", name)))
}

async fn get_watchlist(
    State(state): State<Arc<AppState>>,
    Query(q): Query<WatchlistQuery>,
) -> ApiResult<Json<Vec<WatchlistItem>>> {
    let user_id = required(q.user_id, "userId")?;
    Ok(Json(state.watchlist_service.get_watchlist(&user_id)?))
}

async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewWatchlistEntry>,
) -> ApiResult<Json<WatchlistEntry>> {
    let entry = state.watchlist_service.add_to_watchlist(payload).await?;
    Ok(Json(entry))
}

async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Query(q): Query<WatchlistQuery>,
) -> ApiResult<StatusCode> {
    let user_id = required(q.user_id, "userId")?;
    let listing_id = required(q.listing_id, "listingId")?;
    state
        .watchlist_service
        .remove_from_watchlist(&user_id, &listing_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/watchlist",
        get(get_watchlist)
            .post(add_to_watchlist)
            .delete(remove_from_watchlist),
    )
}
