//! # Tabular display requests
//!
//! The request side of the builder: what a data grid asks for when the user
//! filters, groups or sorts a tabular result.
//!
//! - **[vocabulary]** - fixed token vocabularies (column types, operations, orders, reducers)
//! - **[filter]** - column filters with typed comparison values
//! - **[group_by]** - single-column grouping and aggregations
//! - **[sort]** - column sorts
//!
//! Requests arrive as camelCase JSON:
//!
//! ```text
//! {
//!   "columns": ["trader", "qty"],
//!   "filter": [{"column": "qty", "columnType": "Integer", "operation": "greaterThan", "value": 10}],
//!   "sort": [{"column": "trader", "order": "asc"}],
//!   "groupBy": {"columns": ["trader"], "groupKeys": [], "aggregations": []}
//! }
//! ```
pub mod filter;
pub mod group_by;
pub mod sort;
pub mod vocabulary;

use serde::Deserialize;

pub use filter::Filter;
pub use group_by::{TdsAggregation, TdsGroupBy};
pub use sort::TdsSort;
pub use vocabulary::{AggregationFunction, ColumnType, FilterOperation, SortOrder};

/// A complete grid request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsRequest {
    /// Displayed columns, in display order
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub filter: Vec<Filter>,

    #[serde(default)]
    pub sort: Vec<TdsSort>,

    #[serde(default)]
    pub group_by: Option<TdsGroupBy>,
}

impl TdsRequest {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        TdsRequest {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: TdsSort) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn with_group_by(mut self, group_by: TdsGroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    /// True when the request asks for no filter, grouping or sort.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.sort.is_empty()
            && self.group_by.as_ref().is_none_or(|g| g.columns.is_empty())
    }
}
