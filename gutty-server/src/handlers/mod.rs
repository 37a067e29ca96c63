//! HTTP request handlers organized by functionality

pub mod catalog;
pub mod health;
pub mod stats;
pub mod uploads;

use gutty_core::RecordId;

use crate::infra::errors::{AppError, AppResult};

/// Parse a record id path segment. Anything that is not an integer cannot
/// name a record, so it reports as not found.
pub(crate) fn parse_record_id(raw: &str) -> AppResult<RecordId> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::not_found(format!("Record {raw} not found")))
}

/// Fail with 404 unless the record exists.
pub(crate) async fn ensure_record(
    state: &crate::AppState,
    id: RecordId,
) -> AppResult<()> {
    if state.catalog().record_exists(id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("Record {id} not found")))
    }
}
