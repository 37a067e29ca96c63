use std::{fmt, sync::Arc};

use gutty_core::{
    assets::AssetStore,
    database::{
        CatalogRepository, SqliteCatalogRepository, SqliteDatabase,
        SqliteStatisticsRepository, StatisticsRepository,
    },
    query::SearchLimits,
};

use crate::infra::config::Config;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database: Arc<SqliteDatabase>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub statistics: Arc<dyn StatisticsRepository>,
    pub assets: Arc<AssetStore>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("database", &self.database)
            .field("assets", &self.assets)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the SQLite repositories and the asset store from configuration.
    pub fn new(config: Arc<Config>, database: SqliteDatabase) -> Self {
        let pool = database.pool().clone();
        let assets = AssetStore::new(config.uploads.root.clone());

        Self {
            catalog: Arc::new(SqliteCatalogRepository::new(pool.clone())),
            statistics: Arc::new(SqliteStatisticsRepository::new(pool)),
            assets: Arc::new(assets),
            database: Arc::new(database),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &dyn CatalogRepository {
        self.catalog.as_ref()
    }

    pub fn statistics(&self) -> &dyn StatisticsRepository {
        self.statistics.as_ref()
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn database(&self) -> &SqliteDatabase {
        &self.database
    }

    pub fn search_limits(&self) -> SearchLimits {
        self.config.search.limits()
    }
}
