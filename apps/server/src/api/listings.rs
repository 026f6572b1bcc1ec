use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use voltmarket_core::listings::{Listing, ListingFilter, ListingStatus, NewListing};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct ListingStatusBody {
    status: ListingStatus,
}

async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ListingFilter>,
) -> ApiResult<Json<Vec<Listing>>> {
    Ok(Json(state.listing_service.list_listings(filter)?))
}

async fn create_listing(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewListing>,
) -> ApiResult<Json<Listing>> {
    let listing = state.listing_service.create_listing(payload).await?;
    Ok(Json(listing))
}

async fn get_listing(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Listing>> {
    Ok(Json(state.listing_service.get_listing(&id)?))
}

async fn update_listing_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ListingStatusBody>,
) -> ApiResult<Json<Listing>> {
    let listing = state
        .listing_service
        .update_listing_status(&id, body.status)
        .await?;
    Ok(Json(listing))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/listings", get(list_listings).post(create_listing))
        .route("/listings/{id}", get(get_listing))
        .route("/listings/{id}/status", put(update_listing_status))
}
