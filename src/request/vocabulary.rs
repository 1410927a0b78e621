use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TdsError;

/// Declared type of a grid column.
///
/// The token of each variant is its name, as the grid sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Boolean,
    Number,
    Integer,
    Float,
    Decimal,
    Date,
    DateTime,
    StrictDate,
}

impl ColumnType {
    pub const ALL: [ColumnType; 9] = [
        ColumnType::String,
        ColumnType::Boolean,
        ColumnType::Number,
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Decimal,
        ColumnType::Date,
        ColumnType::DateTime,
        ColumnType::StrictDate,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Boolean => "Boolean",
            ColumnType::Number => "Number",
            ColumnType::Integer => "Integer",
            ColumnType::Float => "Float",
            ColumnType::Decimal => "Decimal",
            ColumnType::Date => "Date",
            ColumnType::DateTime => "DateTime",
            ColumnType::StrictDate => "StrictDate",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ColumnType {
    type Err = TdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|t| t.token() == s)
            .ok_or_else(|| TdsError::UnknownToken {
                vocabulary: "column type",
                token: s.to_string(),
            })
    }
}

/// Comparison applied by a column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperation {
    #[serde(rename = "equal")]
    Equals,
    #[serde(rename = "notEqual")]
    NotEqual,
    #[serde(rename = "greaterThan")]
    GreaterThan,
    #[serde(rename = "greaterThanEqual")]
    GreaterThanOrEqual,
    #[serde(rename = "lessThan")]
    LessThan,
    #[serde(rename = "lessThanEqual")]
    LessThanOrEqual,
    #[serde(rename = "isEmpty")]
    Blank,
    #[serde(rename = "isNotEmpty")]
    NotBlank,
}

impl FilterOperation {
    pub const ALL: [FilterOperation; 8] = [
        FilterOperation::Equals,
        FilterOperation::NotEqual,
        FilterOperation::GreaterThan,
        FilterOperation::GreaterThanOrEqual,
        FilterOperation::LessThan,
        FilterOperation::LessThanOrEqual,
        FilterOperation::Blank,
        FilterOperation::NotBlank,
    ];

    /// Name of the function the operation compiles to.
    pub fn token(&self) -> &'static str {
        match self {
            FilterOperation::Equals => "equal",
            FilterOperation::NotEqual => "notEqual",
            FilterOperation::GreaterThan => "greaterThan",
            FilterOperation::GreaterThanOrEqual => "greaterThanEqual",
            FilterOperation::LessThan => "lessThan",
            FilterOperation::LessThanOrEqual => "lessThanEqual",
            FilterOperation::Blank => "isEmpty",
            FilterOperation::NotBlank => "isNotEmpty",
        }
    }

    /// Blank checks are the only operations the grid may send without a value.
    pub fn is_blank_check(&self) -> bool {
        matches!(self, FilterOperation::Blank | FilterOperation::NotBlank)
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for FilterOperation {
    type Err = TdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperation::ALL
            .into_iter()
            .find(|op| op.token() == s)
            .ok_or_else(|| TdsError::UnsupportedOperation(format!("filter operation '{}'", s)))
    }
}

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

    pub fn token(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SortOrder {
    type Err = TdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.token() == s)
            .ok_or_else(|| TdsError::UnknownToken {
                vocabulary: "sort order",
                token: s.to_string(),
            })
    }
}

/// Reducer applied to a column when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationFunction {
    #[serde(rename = "sum")]
    Sum,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "average")]
    Average,
}

impl AggregationFunction {
    pub const ALL: [AggregationFunction; 5] = [
        AggregationFunction::Sum,
        AggregationFunction::Min,
        AggregationFunction::Max,
        AggregationFunction::Count,
        AggregationFunction::Average,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            AggregationFunction::Sum => "sum",
            AggregationFunction::Min => "min",
            AggregationFunction::Max => "max",
            AggregationFunction::Count => "count",
            AggregationFunction::Average => "average",
        }
    }
}

impl fmt::Display for AggregationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AggregationFunction {
    type Err = TdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationFunction::ALL
            .into_iter()
            .find(|agg| agg.token() == s)
            .ok_or_else(|| TdsError::UnsupportedOperation(format!("aggregation function '{}'", s)))
    }
}
