//! Image upload handler.
//!
//! Accepts one multipart `file` field, requires an `image/*` content type,
//! persists the bytes under a generated name and answers with a data URI so
//! the admin UI can embed the image without a static file route.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::AppError, middleware::RequireAdminAuth, state::AppState};

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload_image))
}

/// Upload response: embeddable data URI plus the stored filename.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
}

/// Handle a multipart image upload.
pub async fn upload_image(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(ToString::to_string)
            .ok_or_else(|| AppError::BadRequest("File must be an image".to_string()))?;
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest("File must be an image".to_string()));
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let extension = original_name.rsplit('.').next().unwrap_or("bin");
        let filename = format!("{}.{extension}", Uuid::new_v4());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let path = state.config().uploads_dir.join(&filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

        let url = format!("data:{content_type};base64,{}", BASE64.encode(&data));
        return Ok(Json(UploadResponse { url, filename }));
    }

    Err(AppError::BadRequest("Missing file field".to_string()))
}
