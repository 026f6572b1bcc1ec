//! Serverless-function style endpoints kept at their original paths.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use voltmarket_core::map_config::resolve_map_config;

use crate::{
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
    models::{MapboxConfig, SendCodeBody, SendCodeResult, VerifyEmailBody, VerifyEmailResult},
};

#[utoipa::path(
    get,
    path = "/functions/v1/get-mapbox-config",
    responses(
        (status = 200, body = MapboxConfig),
        (status = 400, body = ErrorBody, description = "Token is not a public token"),
        (status = 500, body = ErrorBody, description = "Token not configured")
    )
)]
pub async fn get_mapbox_config(State(state): State<Arc<AppState>>) -> ApiResult<Json<MapboxConfig>> {
    let config = resolve_map_config(state.mapbox_token.as_deref())?;
    Ok(Json(config.into()))
}

#[utoipa::path(
    post,
    path = "/functions/v1/verify-email-code",
    request_body = VerifyEmailBody,
    responses(
        (status = 200, body = VerifyEmailResult),
        (status = 400, body = ErrorBody, description = "Missing fields or invalid/expired code"),
        (status = 405, body = ErrorBody)
    )
)]
pub async fn verify_email_code(
    State(state): State<Arc<AppState>>,
    body: Option<Json<VerifyEmailBody>>,
) -> ApiResult<Json<VerifyEmailResult>> {
    let body = body.map(|Json(inner)| inner).unwrap_or_default();
    let response = state.verification_service.verify(body.into()).await?;
    tracing::info!("Email verified for user {}", response.user_id);
    Ok(Json(response.into()))
}

#[utoipa::path(
    post,
    path = "/functions/v1/send-verification-code",
    request_body = SendCodeBody,
    responses(
        (status = 200, body = SendCodeResult),
        (status = 400, body = ErrorBody),
        (status = 405, body = ErrorBody)
    )
)]
pub async fn send_verification_code(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SendCodeBody>>,
) -> ApiResult<Json<SendCodeResult>> {
    let body = body.map(|Json(inner)| inner).unwrap_or_default();
    let issued = state.verification_service.issue_code(body.into()).await?;
    Ok(Json(issued.into()))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/get-mapbox-config",
            get(get_mapbox_config).fallback(method_not_allowed),
        )
        .route(
            "/verify-email-code",
            post(verify_email_code).fallback(method_not_allowed),
        )
        .route(
            "/send-verification-code",
            post(send_verification_code).fallback(method_not_allowed),
        )
}
