use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::{
    database::ports::CatalogRepository,
    domain::{CatalogRecord, RarityTier, RecordId, RecordSummary},
    error::Result,
    query::{
        CategoryField,
        builder::RECORD_TABLE,
        types::{SearchPage, SearchQuery},
    },
    stats::{CatalogSummary, FilterOptions, distinct_values_statement},
};

#[derive(Clone, Debug)]
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct RecordSummaryRow {
    record_no: i64,
    ball_name: Option<String>,
    ball_name_format: Option<String>,
    era: Option<String>,
    era_start: Option<i64>,
    cover_pattern: Option<String>,
    manufacturer: Option<String>,
    value_mid: Option<f64>,
    currency: Option<String>,
    country: Option<String>,
    condition_grade: Option<String>,
    rarity_score: Option<f64>,
}

impl From<RecordSummaryRow> for RecordSummary {
    fn from(row: RecordSummaryRow) -> Self {
        RecordSummary {
            id: row.record_no,
            name: row.ball_name.unwrap_or_default(),
            name_formatted: row.ball_name_format.unwrap_or_default(),
            era: row.era,
            era_sort_key: row.era_start,
            cover_pattern: row.cover_pattern,
            manufacturer: row.manufacturer.unwrap_or_default(),
            value_estimate: row.value_mid,
            currency: row.currency.unwrap_or_default(),
            country: row.country,
            condition_grade: row.condition_grade,
            rarity_score: row.rarity_score,
            rarity_tier: row.rarity_score.map(RarityTier::from_score),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogRecordRow {
    record_no: i64,
    ball_name: Option<String>,
    ball_name_format: Option<String>,
    era: Option<String>,
    era_start: Option<i64>,
    cover_pattern: Option<String>,
    manufacturer: Option<String>,
    country: Option<String>,
    condition_grade: Option<String>,
    value_mid: Option<f64>,
    currency: Option<String>,
    rarity_score: Option<f64>,
    specs: Option<String>,
    auction_remarks: Option<String>,
}

impl From<CatalogRecordRow> for CatalogRecord {
    fn from(row: CatalogRecordRow) -> Self {
        CatalogRecord {
            id: row.record_no,
            name: row.ball_name.unwrap_or_default(),
            name_formatted: row.ball_name_format.unwrap_or_default(),
            era: row.era,
            era_sort_key: row.era_start,
            cover_pattern: row.cover_pattern,
            manufacturer: row.manufacturer.unwrap_or_default(),
            country: row.country,
            condition_grade: row.condition_grade,
            value_estimate: row.value_mid,
            currency: row.currency.unwrap_or_default(),
            rarity_score: row.rarity_score,
            specs: row.specs,
            auction_remarks: row.auction_remarks,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    total: i64,
    average_value: Option<f64>,
    max_value: Option<f64>,
    min_value: Option<f64>,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn distinct_values(&self, field: CategoryField) -> Result<Vec<String>> {
        let values = distinct_values_statement(field)
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await?;
        Ok(values)
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let total: i64 = query
            .count_statement()
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        let total = u64::try_from(total).unwrap_or_default();

        // Past the last page there is nothing to fetch.
        let rows = if query.pagination.offset() >= total {
            Vec::new()
        } else {
            query
                .page_statement()
                .build_query_as::<RecordSummaryRow>()
                .fetch_all(&self.pool)
                .await?
        };

        debug!(
            total,
            page = query.pagination.page,
            per_page = query.pagination.per_page,
            returned = rows.len(),
            "catalog search executed"
        );

        Ok(SearchPage::new(
            rows.into_iter().map(RecordSummary::from).collect(),
            total,
            query.pagination,
        ))
    }

    async fn find_record(&self, id: RecordId) -> Result<Option<CatalogRecord>> {
        let row = sqlx::query_as::<_, CatalogRecordRow>(&format!(
            "SELECT record_no, ball_name, ball_name_format, era, era_start, cover_pattern, \
             manufacturer, country, condition_grade, value_mid, currency, rarity_score, \
             specs, auction_remarks FROM {RECORD_TABLE} WHERE record_no = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CatalogRecord::from))
    }

    async fn record_exists(&self, id: RecordId) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {RECORD_TABLE} WHERE record_no = ?)"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        Ok(FilterOptions {
            eras: self.distinct_values(CategoryField::Era).await?,
            patterns: self.distinct_values(CategoryField::CoverPattern).await?,
            countries: self.distinct_values(CategoryField::Country).await?,
            conditions: self
                .distinct_values(CategoryField::ConditionGrade)
                .await?,
        })
    }

    async fn summary(&self) -> Result<CatalogSummary> {
        let row = sqlx::query_as::<_, SummaryRow>(&format!(
            "SELECT COUNT(*) AS total, AVG(value_mid) AS average_value, \
             MAX(value_mid) AS max_value, MIN(value_mid) AS min_value FROM {RECORD_TABLE}"
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogSummary {
            total: u64::try_from(row.total).unwrap_or_default(),
            average_value: row.average_value,
            max_value: row.max_value,
            min_value: row.min_value,
        })
    }
}
