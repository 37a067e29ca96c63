pub mod ports;
pub mod repositories;
pub mod sqlite;

pub use ports::{CatalogRepository, StatisticsRepository};
pub use repositories::{SqliteCatalogRepository, SqliteStatisticsRepository};
pub use sqlite::{PoolSettings, PreflightReport, SqliteDatabase};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
