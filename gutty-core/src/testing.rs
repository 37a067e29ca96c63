//! Fixtures for tests that need a populated record store.
//!
//! [`TestCatalog`] owns a throwaway SQLite file with the schema applied;
//! [`sample_records`] is the shared eight-record catalog most tests seed.

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tempfile::TempDir;

use crate::{
    database::{SqliteCatalogRepository, SqliteDatabase, SqliteStatisticsRepository},
    domain::RecordId,
    error::Result,
};

/// One row to insert into the record table.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRecord {
    pub id: RecordId,
    pub name: String,
    pub name_formatted: String,
    pub era: Option<String>,
    pub era_sort_key: Option<i64>,
    pub cover_pattern: Option<String>,
    pub manufacturer: String,
    pub country: Option<String>,
    pub condition_grade: Option<String>,
    pub value_estimate: Option<f64>,
    pub currency: String,
    pub rarity_score: Option<f64>,
    pub specs: Option<String>,
    pub auction_remarks: Option<String>,
}

impl SeedRecord {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            name_formatted: name.to_uppercase(),
            name,
            era: None,
            era_sort_key: None,
            cover_pattern: None,
            manufacturer: String::new(),
            country: None,
            condition_grade: None,
            value_estimate: None,
            currency: "GBP".to_string(),
            rarity_score: None,
            specs: None,
            auction_remarks: None,
        }
    }

    /// Override the display name, which defaults to the uppercased name.
    pub fn formatted(mut self, name_formatted: impl Into<String>) -> Self {
        self.name_formatted = name_formatted.into();
        self
    }

    pub fn era(mut self, era: impl Into<String>, sort_key: i64) -> Self {
        self.era = Some(era.into());
        self.era_sort_key = Some(sort_key);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.cover_pattern = Some(pattern.into());
        self
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn condition(mut self, grade: impl Into<String>) -> Self {
        self.condition_grade = Some(grade.into());
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value_estimate = Some(value);
        self
    }

    pub fn rarity(mut self, score: f64) -> Self {
        self.rarity_score = Some(score);
        self
    }

    pub fn specs(mut self, specs: impl Into<String>) -> Self {
        self.specs = Some(specs.into());
        self
    }

    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.auction_remarks = Some(remarks.into());
        self
    }
}

/// Insert rows verbatim.
pub async fn insert_records(pool: &SqlitePool, records: &[SeedRecord]) -> Result<()> {
    let mut tx = pool.begin().await?;
    for record in records {
        sqlx::query(
            "INSERT INTO golf_balls (record_no, ball_name, ball_name_format, era, era_start, \
             cover_pattern, manufacturer, country, condition_grade, value_mid, currency, \
             rarity_score, specs, auction_remarks) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.name_formatted)
        .bind(&record.era)
        .bind(record.era_sort_key)
        .bind(&record.cover_pattern)
        .bind(&record.manufacturer)
        .bind(&record.country)
        .bind(&record.condition_grade)
        .bind(record.value_estimate)
        .bind(&record.currency)
        .bind(record.rarity_score)
        .bind(&record.specs)
        .bind(&record.auction_remarks)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Eight records spanning every era, a shared valuation tie (ids 5 and 8),
/// one unvalued record (6), one record without era or condition (8), and
/// free text reachable only through auction remarks (7).
pub fn sample_records() -> Vec<SeedRecord> {
    vec![
        SeedRecord::new(1, "Gourlay Featherie")
            .era("Featherie", 1618)
            .pattern("Smooth")
            .manufacturer("Gourlay")
            .country("Scotland")
            .condition("Good")
            .value(12_000.0)
            .rarity(6.5)
            .specs("Leather stuffed with boiled feathers")
            .remarks("Provenance: St Andrews clubhouse"),
        SeedRecord::new(2, "Allan Gutty")
            .era("Gutty", 1848)
            .pattern("Smooth")
            .manufacturer("Allan Robertson")
            .country("Scotland")
            .condition("Fair")
            .value(3_000.0)
            .rarity(5.2),
        SeedRecord::new(3, "Hand-Hammered Gutty")
            .era("Gutty", 1848)
            .pattern("Hand Hammered")
            .manufacturer("Forgan")
            .country("Scotland")
            .condition("Very Good")
            .value(1_500.0)
            .rarity(4.1)
            .remarks("Sold at auction in 2011"),
        SeedRecord::new(4, "Bramble Haskell")
            .era("Rubber Core", 1898)
            .pattern("Bramble")
            .manufacturer("Haskell")
            .country("USA")
            .condition("Good")
            .value(800.0)
            .rarity(3.0),
        SeedRecord::new(5, "Mesh Silver King")
            .era("Rubber Core", 1898)
            .pattern("Mesh")
            .manufacturer("Silvertown")
            .country("England")
            .condition("Excellent")
            .value(300.0)
            .rarity(2.0),
        SeedRecord::new(6, "Unvalued Mesh")
            .era("Rubber Core", 1898)
            .pattern("Mesh")
            .manufacturer("Unknown")
            .country("England")
            .condition("Good")
            .remarks("Rare 100% mesh marking"),
        SeedRecord::new(7, "Dimple Prototype")
            .era("Dimple", 1908)
            .pattern("Dimple")
            .manufacturer("Spalding")
            .country("USA")
            .condition("Good")
            .value(100.0)
            .rarity(1.0)
            .remarks("Only known example with the ZEBRA stamp"),
        SeedRecord::new(8, "Mesh Colonel")
            .pattern("Mesh")
            .manufacturer("St Mungo")
            .country("Scotland")
            .value(300.0)
            .rarity(3.5),
    ]
}

/// A migrated SQLite file in a temporary directory.
///
/// A file rather than `:memory:` so every pooled connection sees the
/// same data.
#[derive(Debug)]
pub struct TestCatalog {
    pub database: SqliteDatabase,
    dir: TempDir,
}

impl TestCatalog {
    pub async fn empty() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("catalog.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        let database = SqliteDatabase::from_pool(pool);
        database.initialize_schema().await?;
        Ok(Self { database, dir })
    }

    pub async fn with_records(records: &[SeedRecord]) -> Result<Self> {
        let catalog = Self::empty().await?;
        insert_records(catalog.pool(), records).await?;
        Ok(catalog)
    }

    pub async fn sample() -> Result<Self> {
        Self::with_records(&sample_records()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        self.database.pool()
    }

    pub fn catalog(&self) -> SqliteCatalogRepository {
        SqliteCatalogRepository::new(self.pool().clone())
    }

    pub fn statistics(&self) -> SqliteStatisticsRepository {
        SqliteStatisticsRepository::new(self.pool().clone())
    }

    /// Scratch directory that lives as long as the catalog.
    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}
