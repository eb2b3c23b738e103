use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::{models::auth::AdminUser, services::uploads::UploadService, AppState};

/// POST /uploads — admin only; multipart image upload for menu and
/// merchandise photos.
pub async fn upload_image(
    State(state): State<AppState>,
    _user: AdminUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    UploadService::store(&state.config.uploads_dir, multipart)
        .await
        .map(|stored| (StatusCode::CREATED, Json(serde_json::to_value(stored).unwrap())))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// GET /uploads/{*path} — public; serves stored images.
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, StatusCode> {
    let file_path = std::path::PathBuf::from(&state.config.uploads_dir).join(&path);

    // Security: ensure the path doesn't escape the uploads directory
    let canonical_root = std::fs::canonicalize(&state.config.uploads_dir)
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let canonical_file = std::fs::canonicalize(&file_path).map_err(|_| StatusCode::NOT_FOUND)?;
    if !canonical_file.starts_with(&canonical_root) {
        return Err(StatusCode::FORBIDDEN);
    }

    let bytes = tokio::fs::read(&canonical_file)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let content_type = mime_guess::from_path(&canonical_file)
        .first_raw()
        .unwrap_or("application/octet-stream");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
