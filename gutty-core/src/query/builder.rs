use sqlx::{QueryBuilder, Sqlite};

use super::{
    filtering::{Predicate, push_where_clause},
    types::*,
};

/// Columns selected for list results.
pub const SUMMARY_COLUMNS: &str = "record_no, ball_name, ball_name_format, era, era_start, \
     cover_pattern, manufacturer, value_mid, currency, country, condition_grade, rarity_score";

pub const RECORD_TABLE: &str = "golf_balls";

/// Fluent API for building searches
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // === Filter methods ===

    /// Substring match across names, manufacturer and free-text fields
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.query.filters.text = Some(text.into());
        self
    }

    pub fn era(mut self, era: impl Into<String>) -> Self {
        self.query.filters.era = Some(era.into());
        self
    }

    pub fn cover_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.query.filters.cover_pattern = Some(pattern.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.query.filters.country = Some(country.into());
        self
    }

    pub fn condition_grade(mut self, grade: impl Into<String>) -> Self {
        self.query.filters.condition_grade = Some(grade.into());
        self
    }

    /// Inclusive valuation bounds; either side may be open
    pub fn value_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.query.filters.min_value = min;
        self.query.filters.max_value = max;
        self
    }

    // === Sort methods ===

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.query.sort = SortCriteria { field, order };
        self
    }

    // === Pagination methods ===

    /// 1-based page; zero values are clamped to 1
    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.query.pagination = Pagination::new(page, per_page);
        self
    }

    pub fn build(self) -> SearchQuery {
        self.query
    }
}

impl SearchQuery {
    /// `SELECT COUNT(*)` under the query's filters.
    pub fn count_statement(&self) -> QueryBuilder<'static, Sqlite> {
        let predicates = self.filters.predicates();
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM ");
        builder.push(RECORD_TABLE);
        push_where_clause(&mut builder, &predicates);
        builder
    }

    /// Sorted, paginated page of summary rows under the query's filters.
    ///
    /// `record_no ASC` is always appended as a tie-breaker so equal sort
    /// keys paginate deterministically.
    pub fn page_statement(&self) -> QueryBuilder<'static, Sqlite> {
        let predicates: Vec<Predicate> = self.filters.predicates();
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(SUMMARY_COLUMNS);
        builder.push(" FROM ");
        builder.push(RECORD_TABLE);
        push_where_clause(&mut builder, &predicates);

        builder.push(" ORDER BY ");
        // Unvalued records trail in either direction.
        if self.sort.field == SortField::ValueEstimate {
            builder.push("value_mid IS NULL, ");
        }
        builder.push(self.sort.field.column());
        builder.push(" ");
        builder.push(self.sort.order.keyword());
        if self.sort.field != SortField::Id {
            builder.push(", record_no ASC");
        }

        builder.push(" LIMIT ");
        builder.push_bind(clamp_i64(self.pagination.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(clamp_i64(self.pagination.offset()));
        builder
    }
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_every_filter() {
        let query = SearchQueryBuilder::new()
            .text("feathery")
            .era("Feathery")
            .cover_pattern("Smooth")
            .country("Scotland")
            .condition_grade("Good")
            .value_range(Some(100.0), None)
            .sort_by(SortField::Name, SortOrder::Ascending)
            .page(2, 10)
            .build();

        assert_eq!(query.filters.text.as_deref(), Some("feathery"));
        assert_eq!(query.filters.min_value, Some(100.0));
        assert_eq!(query.filters.max_value, None);
        assert_eq!(query.sort.field, SortField::Name);
        assert_eq!(query.pagination, Pagination::new(2, 10));
    }

    #[test]
    fn count_statement_without_filters_counts_everything() {
        let statement = SearchQuery::default().count_statement();
        assert_eq!(statement.sql(), "SELECT COUNT(*) FROM golf_balls");
    }

    #[test]
    fn page_statement_orders_then_paginates() {
        let query = SearchQueryBuilder::new()
            .era("Gutty")
            .sort_by(SortField::EraSortKey, SortOrder::Ascending)
            .page(3, 25)
            .build();
        let sql = query.page_statement().sql().to_string();

        assert!(sql.starts_with("SELECT record_no, ball_name"), "{sql}");
        assert!(sql.contains(" WHERE era = ?"), "{sql}");
        assert!(
            sql.ends_with(" ORDER BY era_start ASC, record_no ASC LIMIT ? OFFSET ?"),
            "{sql}"
        );
    }

    #[test]
    fn value_sort_keeps_unvalued_records_last() {
        let query = SearchQueryBuilder::new()
            .sort_by(SortField::ValueEstimate, SortOrder::Ascending)
            .build();
        let sql = query.page_statement().sql().to_string();
        assert!(
            sql.contains(
                " ORDER BY value_mid IS NULL, value_mid ASC, record_no ASC LIMIT"
            ),
            "{sql}"
        );
    }

    #[test]
    fn id_sort_has_no_redundant_tie_breaker() {
        let query = SearchQueryBuilder::new()
            .sort_by(SortField::Id, SortOrder::Descending)
            .build();
        let sql = query.page_statement().sql().to_string();
        assert!(sql.contains("ORDER BY record_no DESC LIMIT"), "{sql}");
    }
}
