use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use gutty_core::UploadRejection;
use serde::Serialize;
use tracing::info;

use crate::{
    AppState,
    handlers::{ensure_record, parse_record_id},
    infra::errors::AppResult,
};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
}

/// POST /api/item/{id}/upload - Append one image to a record's folder.
pub async fn upload_image_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let id = parse_record_id(&raw_id)?;
    ensure_record(&state, id).await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        if original.trim().is_empty() {
            return Err(UploadRejection::EmptyFilename.into());
        }
        let bytes = field.bytes().await?;

        let stored = state.assets().save(id, &original, &bytes).await?;
        info!(
            record_id = id,
            original = %original,
            stored = %stored.filename,
            "image uploaded"
        );

        return Ok(Json(UploadResponse {
            success: true,
            filename: stored.filename,
            url: stored.url,
        }));
    }

    Err(UploadRejection::MissingFile.into())
}
