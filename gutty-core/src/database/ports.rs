use async_trait::async_trait;

use crate::{
    domain::{CatalogRecord, RecordId},
    error::Result,
    query::types::{SearchPage, SearchQuery},
    stats::{CatalogStats, CatalogSummary, FilterOptions},
};

/// Read access to catalog records.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Total matching count plus one sorted page of summaries.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;

    async fn find_record(&self, id: RecordId) -> Result<Option<CatalogRecord>>;

    async fn record_exists(&self, id: RecordId) -> Result<bool>;

    /// Distinct category values currently in the store.
    async fn filter_options(&self) -> Result<FilterOptions>;

    async fn summary(&self) -> Result<CatalogSummary>;
}

/// Grouped statistics over the record store.
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    async fn catalog_stats(&self) -> Result<CatalogStats>;
}
