use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use voltmarket_core::notifications::{NewNotification, Notification};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationQuery {
    user_id: Option<String>,
    #[serde(default)]
    unread_only: bool,
    limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadAllQuery {
    user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadAllResponse {
    updated: usize,
}

fn required_user(user_id: Option<String>) -> ApiResult<String> {
    user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("userId query parameter is required".to_string()))
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(q): Query<NotificationQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let user_id = required_user(q.user_id)?;
    let notifications =
        state
            .notification_service
            .list_notifications(&user_id, q.unread_only, q.limit)?;
    Ok(Json(notifications))
}

async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewNotification>,
) -> ApiResult<Json<Notification>> {
    let notification = state.notification_service.notify(payload).await?;
    Ok(Json(notification))
}

async fn mark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Notification>> {
    Ok(Json(state.notification_service.mark_read(&id).await?))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ReadAllQuery>,
) -> ApiResult<Json<ReadAllResponse>> {
    let user_id = required_user(q.user_id)?;
    let updated = state.notification_service.mark_all_read(&user_id).await?;
    Ok(Json(ReadAllResponse { updated }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/notifications",
            get(list_notifications).post(create_notification),
        )
        .route("/notifications/read-all", put(mark_all_read))
        .route("/notifications/{id}/read", put(mark_read))
}
