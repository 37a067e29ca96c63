use serde::{Deserialize, Serialize};

use crate::domain::RecordId;

/// Per-value breakdown of one category column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStat {
    pub value: String,
    /// Every record carrying `value`, including unvalued ones
    pub count: u64,
    /// Mean over the non-null valuations in the group; `None` when the
    /// group has none.
    pub average_value_estimate: Option<f64>,
}

/// Entry in the most-valuable list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRecord {
    pub id: RecordId,
    pub name: String,
    pub era: Option<String>,
    pub value_estimate: Option<f64>,
    pub manufacturer: String,
    pub condition_grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogStats {
    pub by_pattern: Vec<GroupStat>,
    pub by_era: Vec<GroupStat>,
    pub by_country: Vec<GroupStat>,
    pub by_condition: Vec<GroupStat>,
    pub top_valuable: Vec<TopRecord>,
}

/// Whole-store headline numbers for the landing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogSummary {
    pub total: u64,
    pub average_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_value: Option<f64>,
}

/// Distinct category values currently present in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterOptions {
    /// Chronological by era sort key
    pub eras: Vec<String>,
    pub patterns: Vec<String>,
    pub countries: Vec<String>,
    pub conditions: Vec<String>,
}
