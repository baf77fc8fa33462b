//! Image Upload Handler
//!
//! Multipart alternative to the data-URI image field: upload first, then use
//! the returned URL as the recipe `image` value.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, image};

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub original_name: String,
    pub size: usize,
}

/// POST /api/upload/image - store a recipe image from a multipart form
pub async fn upload_image(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let format = image::format_from_filename(&original_name).unwrap_or_default();
        let data = field.bytes().await?;

        let url = image::store_image_bytes(&state.media_dir(), &data, &format)?;

        tracing::info!(
            user_id = current_user.id,
            size = data.len(),
            %url,
            "Image uploaded"
        );

        return Ok(Json(UploadResponse {
            url,
            original_name,
            size: data.len(),
        }));
    }

    Err(AppError::validation("image", "No image field in upload"))
}
