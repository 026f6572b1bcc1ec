use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{main_lib::AppState, models::CapabilityEntry};

/// Reports which optional features are enabled in this deployment.
#[utoipa::path(get, path = "/api/v1/capabilities", responses((status = 200, body = [CapabilityEntry])))]
pub async fn get_capabilities(State(state): State<Arc<AppState>>) -> Json<Vec<CapabilityEntry>> {
    Json(
        state
            .capabilities
            .report()
            .into_iter()
            .map(CapabilityEntry::from)
            .collect(),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/capabilities", get(get_capabilities))
}
