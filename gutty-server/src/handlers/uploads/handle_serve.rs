use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use gutty_core::assets::AssetStore;
use httpdate::{fmt_http_date, parse_http_date};
use tokio_util::io::ReaderStream;

use crate::{
    AppState,
    handlers::ensure_record,
    infra::errors::{AppError, AppResult},
};

/// Stored names are never rewritten, so responses can be cached forever.
const UPLOAD_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// GET /uploads/{folder}/{filename} - Stream a stored image.
pub async fn serve_upload_handler(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    let id = AssetStore::record_for_folder(&folder).ok_or_else(|| {
        AppError::not_found(format!("Upload folder {folder} not found"))
    })?;
    ensure_record(&state, id).await?;

    let asset = state.assets().open(id, &filename).await?;
    let last_modified = fmt_http_date(asset.modified);

    if let Some(if_modified_since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        && let Ok(since_time) = parse_http_date(if_modified_since)
        && asset.modified <= since_time
    {
        return Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .header(header::LAST_MODIFIED, last_modified)
            .header(header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
            .body(Body::empty())
            .map_err(|err| AppError::internal(err.to_string()));
    }

    let stream = ReaderStream::new(asset.file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.content_type)
        .header(header::CONTENT_LENGTH, asset.len.to_string())
        .header(header::LAST_MODIFIED, last_modified)
        .header(header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
        .body(Body::from_stream(stream))
        .map_err(|err| AppError::internal(err.to_string()))
}
