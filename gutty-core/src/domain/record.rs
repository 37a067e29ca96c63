use serde::{Deserialize, Serialize};

use super::rarity::RarityTier;

/// Stable catalog identifier (`record_no` in storage). Also keys the
/// record's upload folder.
pub type RecordId = i64;

/// A cataloged golf ball with every stored attribute, as returned by the
/// detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: RecordId,
    pub name: String,
    pub name_formatted: String,
    pub era: Option<String>,
    pub era_sort_key: Option<i64>,
    pub cover_pattern: Option<String>,
    pub manufacturer: String,
    pub country: Option<String>,
    pub condition_grade: Option<String>,
    /// Midpoint valuation. Never negative when present.
    pub value_estimate: Option<f64>,
    pub currency: String,
    pub rarity_score: Option<f64>,
    pub specs: Option<String>,
    pub auction_remarks: Option<String>,
}

/// Fixed projection used in search results. Free-text fields are
/// searchable but never listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: RecordId,
    pub name: String,
    pub name_formatted: String,
    pub era: Option<String>,
    pub era_sort_key: Option<i64>,
    pub cover_pattern: Option<String>,
    pub manufacturer: String,
    pub value_estimate: Option<f64>,
    pub currency: String,
    pub country: Option<String>,
    pub condition_grade: Option<String>,
    pub rarity_score: Option<f64>,
    pub rarity_tier: Option<RarityTier>,
}
