use axum::{Json, extract::State};
use gutty_core::stats::{CatalogSummary, FilterOptions};

use crate::{AppState, infra::errors::AppResult};

/// GET /api/filters - Distinct category values, computed per request.
pub async fn filter_options_handler(
    State(state): State<AppState>,
) -> AppResult<Json<FilterOptions>> {
    Ok(Json(state.catalog().filter_options().await?))
}

/// GET /api/summary
pub async fn summary_handler(
    State(state): State<AppState>,
) -> AppResult<Json<CatalogSummary>> {
    Ok(Json(state.catalog().summary().await?))
}
