use super::types::{SortField, SortOrder};

impl SortField {
    /// Parse a request value. Unknown values fall back to the valuation
    /// sort rather than erroring, since ordering is presentation only.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "value" | "valueestimate" | "value_estimate" | "value_mid" => {
                SortField::ValueEstimate
            }
            "name" | "ball_name" => SortField::Name,
            "era" | "erasortkey" | "era_sort_key" | "era_start" => {
                SortField::EraSortKey
            }
            "id" | "record_no" => SortField::Id,
            "condition" | "conditiongrade" | "condition_grade" => {
                SortField::ConditionGrade
            }
            _ => SortField::ValueEstimate,
        }
    }

    /// Storage column for ORDER BY. Only these static names ever reach the
    /// query text.
    pub fn column(self) -> &'static str {
        match self {
            SortField::ValueEstimate => "value_mid",
            SortField::Name => "ball_name",
            SortField::EraSortKey => "era_start",
            SortField::Id => "record_no",
            SortField::ConditionGrade => "condition_grade",
        }
    }
}

impl SortOrder {
    /// `asc` in any case selects ascending; everything else is descending.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}
