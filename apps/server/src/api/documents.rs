use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use voltmarket_core::documents::{Document, DocumentUpload};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct UrlQuery {
    path: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicUrlResponse {
    public_url: String,
}

/// Accepts a `file` part and an optional `path` part; the file name is used
/// as the object path when no `path` is given.
async fn upload_document(
    Path(bucket): Path<String>,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<Document>> {
    let mut path: Option<String> = None;
    let mut file: Option<(Option<String>, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("path") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                path = Some(text.trim().to_string());
            }
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("Missing 'file' part".to_string()))?;
    let path = path
        .filter(|p| !p.is_empty())
        .or(file_name)
        .ok_or_else(|| ApiError::BadRequest("Missing object path".to_string()))?;

    let document = state
        .document_service
        .upload(DocumentUpload {
            bucket,
            path,
            content_type,
            bytes,
        })
        .await?;
    tracing::info!(
        "Uploaded document {}/{} ({} bytes)",
        document.bucket,
        document.path,
        document.size
    );
    Ok(Json(document))
}

async fn get_public_url(
    Path(bucket): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<UrlQuery>,
) -> ApiResult<Json<PublicUrlResponse>> {
    let path = q
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("path query parameter is required".to_string()))?;
    let public_url = state.document_service.public_url(&bucket, &path).await?;
    Ok(Json(PublicUrlResponse { public_url }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents/{bucket}", post(upload_document))
        .route("/documents/{bucket}/url", get(get_public_url))
}
