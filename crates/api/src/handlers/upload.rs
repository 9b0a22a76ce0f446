//! Image upload to the configured media API.

use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
}

/// POST /api/v1/uploads
///
/// Accepts a multipart form with a required `file` field holding an image.
/// Responds with the public url the media API stored it under.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadedImage>> {
    let Some(media) = state.media.clone() else {
        return Err(AppError::InternalError("Media uploads are not configured".into()));
    };

    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((filename, content_type, data.to_vec()));
    }

    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest(format!(
            "Unsupported content type '{content_type}'; expected an image"
        )));
    }
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let size = data.len();
    let url = media
        .upload(data, &filename, &content_type)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(filename = %filename, size, url = %url, "Image uploaded");

    Ok(ApiResponse::created(UploadedImage { url }, "Image uploaded"))
}
