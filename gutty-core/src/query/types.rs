use serde::{Deserialize, Serialize};

use crate::domain::RecordSummary;

/// Main search structure handed to the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    pub filters: SearchFilters,
    pub sort: SortCriteria,
    pub pagination: Pagination,
}

/// Optional, independently combinable filter inputs. A `None` (or blank)
/// input contributes no predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchFilters {
    pub text: Option<String>,
    pub era: Option<String>,
    pub cover_pattern: Option<String>,
    pub country: Option<String>,
    pub condition_grade: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// Sort criteria for searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SortCriteria {
    pub field: SortField,
    pub order: SortOrder,
}

/// Allow-listed sort columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    ValueEstimate,
    Name,
    EraSortKey,
    Id,
    ConditionGrade,
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// 1-based page window. Both values are at least 1 once built through
/// [`Pagination::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: u32 = 20;

    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page.max(1))
    }

    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.limit())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

/// Upper/default page sizes applied while parsing request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_per_page: Pagination::DEFAULT_PER_PAGE,
            max_per_page: 100,
        }
    }
}

/// One page of matching records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<RecordSummary>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u64,
}

impl SearchPage {
    pub fn new(
        results: Vec<RecordSummary>,
        total: u64,
        pagination: Pagination,
    ) -> Self {
        Self {
            results,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            pages: pagination.page_count(total),
        }
    }
}
