pub mod rarity;
pub mod record;

pub use rarity::RarityTier;
pub use record::{CatalogRecord, RecordId, RecordSummary};
