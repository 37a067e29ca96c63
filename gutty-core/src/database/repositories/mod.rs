pub mod catalog;
pub mod statistics;

pub use catalog::SqliteCatalogRepository;
pub use statistics::SqliteStatisticsRepository;
