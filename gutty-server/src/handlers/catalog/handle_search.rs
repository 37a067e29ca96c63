use axum::{
    Json,
    extract::{Query, State},
};
use gutty_core::query::{SearchPage, SearchParams};
use tracing::debug;

use crate::{AppState, infra::errors::AppResult};

/// GET /api/search - Filtered, sorted, paginated record summaries.
///
/// Malformed `min_value`, `max_value`, `page` or `per_page` are rejected
/// with 400; unknown `sort`/`order` values fall back to valuation
/// descending.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchPage>> {
    let query = params.into_query(&state.search_limits())?;
    debug!(?query, "search request");

    let page = state.catalog().search(&query).await?;
    Ok(Json(page))
}
