use serde::Deserialize;

use crate::request::{AggregationFunction, ColumnType};

/// Row grouping requested by the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsGroupBy {
    /// Grouping columns, in order
    pub columns: Vec<String>,

    /// Group values the grid has already expanded.
    ///
    /// When this is as long as `columns`, the grouping was materialized by an
    /// earlier round-trip and the rows under one group are being fetched.
    #[serde(default)]
    pub group_keys: Option<Vec<String>>,

    #[serde(default)]
    pub aggregations: Vec<TdsAggregation>,
}

impl TdsGroupBy {
    pub fn new(columns: Vec<String>) -> Self {
        TdsGroupBy {
            columns,
            ..Default::default()
        }
    }

    pub fn with_group_keys(mut self, keys: Vec<String>) -> Self {
        self.group_keys = Some(keys);
        self
    }

    pub fn with_aggregation(mut self, aggregation: TdsAggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    /// True once every grouping column has a key applied upstream.
    pub fn keys_applied(&self) -> bool {
        self.group_keys
            .as_ref()
            .is_some_and(|keys| keys.len() == self.columns.len())
    }
}

/// An aggregation over one column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsAggregation {
    pub column: String,
    pub column_type: ColumnType,
    pub function: AggregationFunction,
}

impl TdsAggregation {
    pub fn new(
        column: impl Into<String>,
        column_type: ColumnType,
        function: AggregationFunction,
    ) -> Self {
        TdsAggregation {
            column: column.into(),
            column_type,
            function,
        }
    }
}
