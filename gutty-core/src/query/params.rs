//! Raw request parameters and their validation into a [`SearchQuery`].

use serde::{Deserialize, Serialize};

use super::types::{
    Pagination, SearchFilters, SearchLimits, SearchQuery, SortCriteria,
    SortField, SortOrder,
};
use crate::error::{CatalogError, Result};

/// Query-string form of a search, exactly as received. Every value stays a
/// string so malformed numbers surface as bad input instead of a generic
/// extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub era: Option<String>,
    pub pattern: Option<String>,
    pub country: Option<String>,
    pub condition: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl SearchParams {
    pub fn into_query(self, limits: &SearchLimits) -> Result<SearchQuery> {
        let filters = SearchFilters {
            text: non_blank(self.q),
            era: category(self.era),
            cover_pattern: category(self.pattern),
            country: category(self.country),
            condition_grade: category(self.condition),
            min_value: parse_value_bound("min_value", self.min_value)?,
            max_value: parse_value_bound("max_value", self.max_value)?,
        };

        let sort = SortCriteria {
            field: self
                .sort
                .as_deref()
                .map(SortField::parse_lenient)
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .map(SortOrder::parse_lenient)
                .unwrap_or_default(),
        };

        let max_per_page = limits.max_per_page.max(1);
        let page = parse_count("page", self.page)?.unwrap_or(1);
        let per_page = parse_count("per_page", self.per_page)?
            .unwrap_or(i64::from(limits.default_per_page))
            .clamp(1, i64::from(max_per_page));

        let pagination = Pagination::new(
            page.clamp(1, i64::from(u32::MAX)) as u32,
            per_page as u32,
        );

        Ok(SearchQuery {
            filters,
            sort,
            pagination,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Category values are compared verbatim; only blank ones are dropped.
fn category(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_value_bound(name: &str, raw: Option<String>) -> Result<Option<f64>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(CatalogError::InvalidInput(format!(
            "{name} must be a number, got '{raw}'"
        ))),
    }
}

fn parse_count(name: &str, raw: Option<String>) -> Result<Option<i64>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };

    raw.parse::<i64>().map(Some).map_err(|_| {
        CatalogError::InvalidInput(format!(
            "{name} must be an integer, got '{raw}'"
        ))
    })
}
