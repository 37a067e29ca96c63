use axum::{
    Json,
    extract::{Path, State},
};
use gutty_core::CatalogRecord;

use crate::{
    AppState,
    handlers::parse_record_id,
    infra::errors::{AppError, AppResult},
};

/// GET /api/item/{id}
pub async fn item_detail_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<CatalogRecord>> {
    let id = parse_record_id(&raw_id)?;

    state
        .catalog()
        .find_record(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Record {id} not found")))
}
