use axum::{Json, extract::State};
use gutty_core::stats::CatalogStats;

use crate::{AppState, infra::errors::AppResult};

/// GET /api/stats (also served at /stats)
pub async fn stats_handler(
    State(state): State<AppState>,
) -> AppResult<Json<CatalogStats>> {
    let stats = state.statistics().catalog_stats().await?;
    Ok(Json(stats))
}
