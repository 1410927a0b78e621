pub mod ast;
pub mod builder;
pub mod cli;
pub mod error;
pub mod output;
pub mod request;
pub mod value;

pub use ast::{Expression, Literal, LiteralKind, Multiplicity, Variable};
pub use builder::{accessor, build_lambda_expressions, wrap, LambdaBuilder};
pub use error::TdsError;
pub use output::{to_json, to_json_pretty, to_pure};
pub use request::{
    AggregationFunction, ColumnType, Filter, FilterOperation, SortOrder, TdsAggregation,
    TdsGroupBy, TdsRequest, TdsSort,
};
pub use value::TypedValue;
