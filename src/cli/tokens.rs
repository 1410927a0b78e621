//! Vocabulary listings for the tds CLI

use super::CliError;
use crate::{
    builder::accessor,
    request::{AggregationFunction, ColumnType, FilterOperation, SortOrder},
};

/// Token vocabularies a request is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    ColumnTypes,
    FilterOperations,
    SortOrders,
    Aggregations,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 4] = [
        Vocabulary::ColumnTypes,
        Vocabulary::FilterOperations,
        Vocabulary::SortOrders,
        Vocabulary::Aggregations,
    ];

    /// Parse vocabulary name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "column_types" | "columns" | "types" => Some(Self::ColumnTypes),
            "filter_operations" | "filters" | "operations" | "ops" => Some(Self::FilterOperations),
            "sort_orders" | "sorts" | "orders" => Some(Self::SortOrders),
            "aggregations" | "aggregation_functions" | "aggs" => Some(Self::Aggregations),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Vocabulary::ColumnTypes => "column-types",
            Vocabulary::FilterOperations => "filter-operations",
            Vocabulary::SortOrders => "sort-orders",
            Vocabulary::Aggregations => "aggregations",
        }
    }

    /// One `token  description` line per entry
    pub fn render(&self) -> String {
        let lines: Vec<String> = match self {
            Vocabulary::ColumnTypes => ColumnType::ALL
                .iter()
                .map(|t| format!("  {:<18}read with {}", t.token(), accessor(*t)))
                .collect(),
            Vocabulary::FilterOperations => FilterOperation::ALL
                .iter()
                .map(|op| format!("  {:<18}{}", op.token(), describe_operation(*op)))
                .collect(),
            Vocabulary::SortOrders => SortOrder::ALL
                .iter()
                .map(|o| format!("  {}", o.token()))
                .collect(),
            Vocabulary::Aggregations => AggregationFunction::ALL
                .iter()
                .map(|f| format!("  {}", f.token()))
                .collect(),
        };
        format!("{}\n\n{}\n", self.name().to_uppercase(), lines.join("\n"))
    }
}

fn describe_operation(op: FilterOperation) -> &'static str {
    match op {
        FilterOperation::Equals
        | FilterOperation::GreaterThan
        | FilterOperation::GreaterThanOrEqual
        | FilterOperation::LessThan
        | FilterOperation::LessThanOrEqual
        | FilterOperation::Blank => "op(column, value)",
        FilterOperation::NotEqual => "not(equal(value, column))",
        FilterOperation::NotBlank => "not(isEmpty(column), value)",
    }
}

/// Get every vocabulary listing
pub fn get_tokens_overview() -> String {
    Vocabulary::ALL
        .iter()
        .map(|v| v.render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Get the listing for one vocabulary
pub fn get_vocabulary(name: &str) -> Result<String, CliError> {
    Vocabulary::from_name(name)
        .map(|v| v.render())
        .ok_or_else(|| CliError::UnknownVocabulary(name.to_string()))
}
