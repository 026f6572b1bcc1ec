use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use voltmarket_storage_sqlite::db;

use crate::{
    config::Config,
    error::ErrorBody,
    main_lib::AppState,
    models::{
        CapabilityEntry, MapboxConfig, SendCodeBody, SendCodeResult, VerifyEmailBody,
        VerifyEmailResult,
    },
};

mod capabilities;
mod documents;
mod functions;
mod listings;
mod lois;
mod metrics;
mod notifications;
mod opportunities;
mod portfolios;
mod realtime;
mod watchlist;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once a pooled database connection can be checked out.
#[utoipa::path(
    get,
    path = "/api/v1/readyz",
    responses(
        (status = 200, description = "Ready"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    db::get_connection(&state.pool).map(|_| "ok").map_err(|err| {
        tracing::warn!("Readiness check failed: {}", err);
        StatusCode::SERVICE_UNAVAILABLE
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        capabilities::get_capabilities,
        functions::get_mapbox_config,
        functions::verify_email_code,
        functions::send_verification_code
    ),
    components(schemas(
        CapabilityEntry,
        ErrorBody,
        MapboxConfig,
        SendCodeBody,
        SendCodeResult,
        VerifyEmailBody,
        VerifyEmailResult
    )),
    tags((name = "voltmarket"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(capabilities::router())
        .merge(portfolios::router())
        .merge(metrics::router())
        .merge(opportunities::router())
        .merge(listings::router())
        .merge(watchlist::router())
        .merge(notifications::router())
        .merge(documents::router())
        .merge(lois::router())
        .merge(realtime::router());

    Router::new()
        .nest("/api/v1", api)
        .nest("/functions/v1", functions::router())
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .nest_service("/storage", ServeDir::new(&config.storage_dir))
        .with_state(state)
        .layer(cors)
        // Outer layers run first: the id must be set before it is propagated.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
