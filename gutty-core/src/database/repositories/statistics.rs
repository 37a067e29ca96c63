use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::{
    database::ports::StatisticsRepository,
    error::Result,
    stats::{
        Breakdown, CatalogStats, GroupStat, TOP_VALUABLE_LIMIT, TopRecord,
        top_valuable_statement,
    },
};

#[derive(Clone, Debug)]
pub struct SqliteStatisticsRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    value: String,
    count: i64,
    average_value_estimate: Option<f64>,
}

impl From<GroupRow> for GroupStat {
    fn from(row: GroupRow) -> Self {
        GroupStat {
            value: row.value,
            count: u64::try_from(row.count).unwrap_or_default(),
            average_value_estimate: row.average_value_estimate,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TopRow {
    record_no: i64,
    ball_name: Option<String>,
    era: Option<String>,
    value_mid: Option<f64>,
    manufacturer: Option<String>,
    condition_grade: Option<String>,
}

impl From<TopRow> for TopRecord {
    fn from(row: TopRow) -> Self {
        TopRecord {
            id: row.record_no,
            name: row.ball_name.unwrap_or_default(),
            era: row.era,
            value_estimate: row.value_mid,
            manufacturer: row.manufacturer.unwrap_or_default(),
            condition_grade: row.condition_grade,
        }
    }
}

impl SqliteStatisticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn breakdown(&self, breakdown: Breakdown) -> Result<Vec<GroupStat>> {
        let rows = breakdown
            .statement()
            .build_query_as::<GroupRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(GroupStat::from).collect())
    }

    async fn top_valuable(&self, limit: i64) -> Result<Vec<TopRecord>> {
        let rows = top_valuable_statement(limit)
            .build_query_as::<TopRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TopRecord::from).collect())
    }
}

#[async_trait]
impl StatisticsRepository for SqliteStatisticsRepository {
    async fn catalog_stats(&self) -> Result<CatalogStats> {
        let stats = CatalogStats {
            by_pattern: self.breakdown(Breakdown::BY_PATTERN).await?,
            by_era: self.breakdown(Breakdown::BY_ERA).await?,
            by_country: self.breakdown(Breakdown::BY_COUNTRY).await?,
            by_condition: self.breakdown(Breakdown::BY_CONDITION).await?,
            top_valuable: self.top_valuable(TOP_VALUABLE_LIMIT).await?,
        };

        debug!(
            patterns = stats.by_pattern.len(),
            eras = stats.by_era.len(),
            countries = stats.by_country.len(),
            conditions = stats.by_condition.len(),
            "catalog statistics computed"
        );

        Ok(stats)
    }
}
