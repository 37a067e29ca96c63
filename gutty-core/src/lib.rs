//! # Gutty Core
//!
//! Core library for the Gutty catalog browser, a search front end for a
//! database of antique golf balls.
//!
//! ## Overview
//!
//! - **Record Store**: SQLite-backed catalog of records, accessed through the
//!   repository ports in [`database`]
//! - **Query Builder**: turns optional filter inputs into a parameterized,
//!   sorted and paginated search ([`query`])
//! - **Aggregation Engine**: grouped breakdowns and the top-valued list
//!   ([`stats`])
//! - **Asset Store**: append-only per-record image uploads ([`assets`])
//!
//! ## Feature Flags
//!
//! - `test-utils`: exposes [`testing`] fixtures for seeding a store
//!
//! ## Examples
//!
//! ```no_run
//! use gutty_core::{
//!     database::{CatalogRepository, SqliteCatalogRepository, SqliteDatabase},
//!     query::{SearchQueryBuilder, SortField, SortOrder},
//! };
//!
//! async fn cheapest_gutties(
//!     db: &SqliteDatabase,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = SqliteCatalogRepository::new(db.pool().clone());
//!     let query = SearchQueryBuilder::new()
//!         .era("Gutty")
//!         .sort_by(SortField::ValueEstimate, SortOrder::Ascending)
//!         .page(1, 10)
//!         .build();
//!
//!     let page = catalog.search(&query).await?;
//!     println!("{} of {} records", page.results.len(), page.total);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

/// Route constants shared by the server and its clients
pub mod api_routes;
/// Per-record image uploads
pub mod assets;
/// SQLite record store, ports and repositories
pub mod database;
/// Catalog domain types
pub mod domain;
pub mod error;
/// Search query model and SQL predicate assembly
pub mod query;
/// Grouped statistics over the record store
pub mod stats;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use database::MIGRATOR;
pub use domain::{CatalogRecord, RarityTier, RecordId, RecordSummary};
pub use error::{CatalogError, Result, UploadRejection};
