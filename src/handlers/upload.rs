use std::path::{Path, PathBuf};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    extract::AppMultipart,
    state::AppState,
};

/// Most files a single multipart request may carry.
const MAX_UPLOAD_FILES: usize = 5;

/// The response payload for a single-image upload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleUploadResponse {
    pub message: &'static str,
    pub image_url: String,
}

/// The response payload for a multi-image upload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiUploadResponse {
    pub message: &'static str,
    pub image_urls: Vec<String>,
}

/// Stores the first `image` field of the multipart body and returns
/// its public URL. Extra fields are ignored.
#[axum::debug_handler]
pub async fn upload_single(
    State(state): State<AppState>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Response> {
    tracing::info!("📦 Single image upload");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(format!("Parse error: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        // The filename must be read before the field body is consumed.
        let original_name = field.file_name().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(format!("image data: {}", e)))?;

        let image_url =
            save_upload(&state.config.upload_dir, original_name.as_deref(), &data).await?;

        let response = SingleUploadResponse {
            message: "Image uploaded",
            image_url,
        };

        return Ok((StatusCode::OK, Json(response)).into_response());
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// Stores every `images` field of the multipart body, up to
/// `MAX_UPLOAD_FILES`, and returns their public URLs.
#[axum::debug_handler]
pub async fn upload_multiple(
    State(state): State<AppState>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Response> {
    tracing::info!("📦 Multi image upload");

    let mut image_urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(format!("Parse error: {}", e)))?
    {
        if field.name() != Some("images") {
            continue;
        }

        if image_urls.len() >= MAX_UPLOAD_FILES {
            return Err(AppError::Validation(format!(
                "At most {} files can be uploaded at once",
                MAX_UPLOAD_FILES
            )));
        }

        let original_name = field.file_name().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(format!("image data: {}", e)))?;

        image_urls
            .push(save_upload(&state.config.upload_dir, original_name.as_deref(), &data).await?);
    }

    if image_urls.is_empty() {
        return Err(AppError::Validation("No file uploaded".to_string()));
    }

    let response = MultiUploadResponse {
        message: "Images uploaded",
        image_urls,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Writes an upload under the public upload directory and returns the
/// path it is served from.
async fn save_upload(upload_dir: &str, original_name: Option<&str>, data: &[u8]) -> Result<String> {
    if data.is_empty() {
        return Err(AppError::Validation("No file uploaded".to_string()));
    }

    tokio::fs::create_dir_all(upload_dir).await?;

    let filename = generate_filename(original_name);
    let path = PathBuf::from(upload_dir).join(&filename);
    tokio::fs::write(&path, data).await?;

    tracing::info!("📦 Stored upload: {} ({} bytes)", filename, data.len());

    Ok(format!("/uploads/{}", filename))
}

/// Builds a collision-free stored filename, keeping a short sanitized
/// extension from the client's name when one is usable.
fn generate_filename(original_name: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match original_name.and_then(sanitized_extension) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

/// Extracts the extension of an upload name when it is short and purely
/// alphanumeric. Anything else is dropped rather than stored.
fn sanitized_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    if ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ext)
}
