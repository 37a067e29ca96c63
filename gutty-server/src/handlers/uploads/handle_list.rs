use axum::{
    Json,
    extract::{Path, State},
};
use gutty_core::assets::StoredAsset;
use serde::Serialize;

use crate::{
    AppState,
    handlers::{ensure_record, parse_record_id},
    infra::errors::AppResult,
};

#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    pub images: Vec<StoredAsset>,
}

/// GET /api/item/{id}/images - Uploaded images in upload order.
pub async fn list_images_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ImageListResponse>> {
    let id = parse_record_id(&raw_id)?;
    ensure_record(&state, id).await?;

    let images = state.assets().list(id).await?;
    Ok(Json(ImageListResponse { images }))
}
