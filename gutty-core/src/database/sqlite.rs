use std::{fmt, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{info, warn};

use crate::{
    error::{CatalogError, Result},
    query::builder::RECORD_TABLE,
};

/// Connection pool tuning.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Create the database file when it does not exist yet
    pub create_if_missing: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: num_cpus::get().max(1) as u32,
            create_if_missing: false,
        }
    }
}

/// Result of a successful preflight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreflightReport {
    pub record_count: u64,
}

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
    max_connections: u32,
}

impl fmt::Debug for SqliteDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl SqliteDatabase {
    pub async fn connect(url: &str, settings: PoolSettings) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(settings.create_if_missing)
            .busy_timeout(Duration::from_secs(5));

        let max_connections = settings.max_connections.max(1);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| {
                CatalogError::Internal(format!(
                    "Database connection failed: {}",
                    e
                ))
            })?;

        info!(max_connections, "Database pool initialized");

        Ok(Self {
            pool,
            max_connections,
        })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        let max_connections = pool.options().get_max_connections();
        Self {
            pool,
            max_connections,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        super::MIGRATOR.run(&self.pool).await?;
        info!("Database schema initialized");
        Ok(())
    }

    /// Verify the record table exists and is readable.
    pub async fn preflight(&self) -> Result<PreflightReport> {
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(RECORD_TABLE)
        .fetch_one(&self.pool)
        .await?;

        if tables == 0 {
            warn!(table = RECORD_TABLE, "record table missing");
            return Err(CatalogError::NotFound(format!(
                "table `{RECORD_TABLE}` does not exist; run `db migrate` or point DATABASE_URL at a catalog"
            )));
        }

        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {RECORD_TABLE}"))
                .fetch_one(&self.pool)
                .await?;

        Ok(PreflightReport {
            record_count: u64::try_from(count).unwrap_or_default(),
        })
    }

    /// Cheap connectivity probe.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
