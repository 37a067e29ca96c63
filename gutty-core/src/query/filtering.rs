//! Filter predicates as data.
//!
//! Each active filter becomes one [`Predicate`], a static SQL fragment plus
//! the values it binds. Assembly only ever pushes allow-listed column names
//! into the query text; request input travels exclusively through
//! `push_bind`.

use sqlx::{QueryBuilder, Sqlite};

use super::types::SearchFilters;

/// Columns searched by the free-text filter.
pub const SEARCHABLE_COLUMNS: [&str; 5] = [
    "ball_name",
    "manufacturer",
    "ball_name_format",
    "specs",
    "auction_remarks",
];

/// Category columns with exact-match filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Era,
    CoverPattern,
    Country,
    ConditionGrade,
}

impl CategoryField {
    pub const ALL: [CategoryField; 4] = [
        CategoryField::Era,
        CategoryField::CoverPattern,
        CategoryField::Country,
        CategoryField::ConditionGrade,
    ];

    pub fn column(self) -> &'static str {
        match self {
            CategoryField::Era => "era",
            CategoryField::CoverPattern => "cover_pattern",
            CategoryField::Country => "country",
            CategoryField::ConditionGrade => "condition_grade",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match against any searchable column.
    /// Holds the already-escaped LIKE pattern.
    TextMatch(String),
    Equals(CategoryField, String),
    ValueAtLeast(f64),
    ValueAtMost(f64),
}

impl Predicate {
    pub fn text(term: &str) -> Self {
        Predicate::TextMatch(format!("%{}%", escape_like_literal(term)))
    }

    /// Append this predicate's SQL and bound values.
    pub fn push_onto(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Predicate::TextMatch(pattern) => {
                builder.push("(");
                for (idx, column) in SEARCHABLE_COLUMNS.iter().enumerate() {
                    if idx > 0 {
                        builder.push(" OR ");
                    }
                    builder.push(*column);
                    builder.push(" LIKE ");
                    builder.push_bind(pattern.clone());
                    builder.push(" ESCAPE '\\'");
                }
                builder.push(")");
            }
            Predicate::Equals(field, value) => {
                builder.push(field.column());
                builder.push(" = ");
                builder.push_bind(value.clone());
            }
            Predicate::ValueAtLeast(bound) => {
                builder.push("value_mid >= ");
                builder.push_bind(*bound);
            }
            Predicate::ValueAtMost(bound) => {
                builder.push("value_mid <= ");
                builder.push_bind(*bound);
            }
        }
    }
}

impl SearchFilters {
    /// Active predicates, in a fixed order. Empty means match-all.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(text) = active(&self.text) {
            predicates.push(Predicate::text(text));
        }

        let categories = [
            (CategoryField::Era, &self.era),
            (CategoryField::CoverPattern, &self.cover_pattern),
            (CategoryField::Country, &self.country),
            (CategoryField::ConditionGrade, &self.condition_grade),
        ];
        for (field, value) in categories {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                predicates.push(Predicate::Equals(field, value.to_string()));
            }
        }

        if let Some(min) = self.min_value {
            predicates.push(Predicate::ValueAtLeast(min));
        }
        if let Some(max) = self.max_value {
            predicates.push(Predicate::ValueAtMost(max));
        }

        predicates
    }
}

/// Append a WHERE clause joining `predicates` with AND. Pushes nothing when
/// the list is empty.
pub fn push_where_clause(
    builder: &mut QueryBuilder<'_, Sqlite>,
    predicates: &[Predicate],
) {
    for (idx, predicate) in predicates.iter().enumerate() {
        builder.push(if idx == 0 { " WHERE " } else { " AND " });
        predicate.push_onto(builder);
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn escape_like_literal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            other => out.push(other),
        }
    }
    out
}
