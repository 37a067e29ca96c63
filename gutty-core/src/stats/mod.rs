pub mod types;

pub use types::*;

use sqlx::{QueryBuilder, Sqlite};

use crate::query::{CategoryField, builder::RECORD_TABLE};

/// Size of the most-valuable list.
pub const TOP_VALUABLE_LIMIT: i64 = 20;

/// How a grouped breakdown is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrdering {
    /// Largest groups first
    CountDescending,
    /// Chronological by the group's era sort key; keyless groups last
    EraSortKey,
    /// Lexical by the grouped value
    ValueAscending,
}

/// One grouped breakdown: which column, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub field: CategoryField,
    pub ordering: GroupOrdering,
}

impl Breakdown {
    pub const BY_PATTERN: Breakdown = Breakdown {
        field: CategoryField::CoverPattern,
        ordering: GroupOrdering::CountDescending,
    };
    pub const BY_ERA: Breakdown = Breakdown {
        field: CategoryField::Era,
        ordering: GroupOrdering::EraSortKey,
    };
    pub const BY_COUNTRY: Breakdown = Breakdown {
        field: CategoryField::Country,
        ordering: GroupOrdering::CountDescending,
    };
    pub const BY_CONDITION: Breakdown = Breakdown {
        field: CategoryField::ConditionGrade,
        ordering: GroupOrdering::ValueAscending,
    };

    /// Grouped count/average over non-null values of the column.
    ///
    /// `AVG` skips null valuations while `COUNT(*)` keeps them, which is
    /// exactly the per-group contract.
    pub fn statement(&self) -> QueryBuilder<'static, Sqlite> {
        let column = self.field.column();
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(column);
        builder.push(" AS value, COUNT(*) AS count, AVG(value_mid) AS average_value_estimate FROM ");
        builder.push(RECORD_TABLE);
        builder.push(" WHERE ");
        builder.push(column);
        builder.push(" IS NOT NULL GROUP BY ");
        builder.push(column);
        builder.push(" ORDER BY ");
        builder.push(self.ordering.order_clause(column));
        builder
    }
}

impl GroupOrdering {
    fn order_clause(self, column: &str) -> String {
        match self {
            GroupOrdering::CountDescending => {
                format!("COUNT(*) DESC, {column} ASC")
            }
            GroupOrdering::EraSortKey => format!(
                "MIN(era_start) IS NULL, MIN(era_start) ASC, {column} ASC"
            ),
            GroupOrdering::ValueAscending => format!("{column} ASC"),
        }
    }
}

/// Top records by valuation, unvalued records last.
pub fn top_valuable_statement(limit: i64) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(
        "SELECT record_no, ball_name, era, value_mid, manufacturer, condition_grade FROM ",
    );
    builder.push(RECORD_TABLE);
    builder.push(" ORDER BY value_mid IS NULL, value_mid DESC, record_no ASC LIMIT ");
    builder.push_bind(limit);
    builder
}

/// Distinct non-null values of a category column, ordered like its
/// breakdown would be (eras chronologically, everything else lexically).
pub fn distinct_values_statement(
    field: CategoryField,
) -> QueryBuilder<'static, Sqlite> {
    let column = field.column();
    let ordering = match field {
        CategoryField::Era => GroupOrdering::EraSortKey,
        _ => GroupOrdering::ValueAscending,
    };

    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(column);
    builder.push(" FROM ");
    builder.push(RECORD_TABLE);
    builder.push(" WHERE ");
    builder.push(column);
    builder.push(" IS NOT NULL GROUP BY ");
    builder.push(column);
    builder.push(" ORDER BY ");
    builder.push(ordering.order_clause(column));
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_breakdown_orders_by_sort_key() {
        let sql = Breakdown::BY_ERA.statement().sql().to_string();
        assert!(sql.contains("WHERE era IS NOT NULL GROUP BY era"), "{sql}");
        assert!(
            sql.ends_with("ORDER BY MIN(era_start) IS NULL, MIN(era_start) ASC, era ASC"),
            "{sql}"
        );
    }

    #[test]
    fn pattern_breakdown_orders_by_count() {
        let sql = Breakdown::BY_PATTERN.statement().sql().to_string();
        assert!(sql.ends_with("ORDER BY COUNT(*) DESC, cover_pattern ASC"), "{sql}");
    }

    #[test]
    fn condition_breakdown_orders_by_grade() {
        let sql = Breakdown::BY_CONDITION.statement().sql().to_string();
        assert!(sql.ends_with("ORDER BY condition_grade ASC"), "{sql}");
    }

    #[test]
    fn distinct_countries_are_lexical() {
        let sql = distinct_values_statement(CategoryField::Country)
            .sql()
            .to_string();
        assert_eq!(
            sql,
            "SELECT country FROM golf_balls WHERE country IS NOT NULL \
             GROUP BY country ORDER BY country ASC"
        );
    }
}
