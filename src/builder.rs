//! # Lambda builder
//!
//! Compiles a [`TdsRequest`] into the body of a query lambda. Each request
//! part becomes one pipeline stage wrapped around the current anchor
//! expression, always in the order filter, groupBy, sort:
//!
//! ```text
//! sort(groupBy(filter(<anchor>, {x|...}), [keys], [aggs]), [orders])
//! ```
//!
//! A stage whose part of the request is empty leaves the anchor untouched.

use std::iter;

use tracing::{debug, instrument, trace};

use crate::{
    ast::{Expression, Multiplicity, Variable},
    error::{Result, TdsError},
    request::{ColumnType, Filter, FilterOperation, TdsAggregation, TdsGroupBy, TdsRequest, TdsSort},
};

pub const FILTER_FUNCTION: &str = "filter";
pub const GROUP_BY_FUNCTION: &str = "groupBy";
pub const SORT_FUNCTION: &str = "sort";
pub const AND_FUNCTION: &str = "and";
pub const NOT_FUNCTION: &str = "not";
pub const AGG_FUNCTION: &str = "agg";

pub const DEFAULT_ROW_VARIABLE: &str = "x";
pub const DEFAULT_AGGREGATION_VARIABLE: &str = "agg";

/// Accessor used to read a column of the given type off a row.
pub fn accessor(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::String => "getString",
        ColumnType::Boolean => "getBoolean",
        ColumnType::Number => "getNumber",
        ColumnType::Integer => "getInteger",
        ColumnType::Float => "getFloat",
        ColumnType::Decimal => "getDecimal",
        ColumnType::Date => "getDate",
        ColumnType::DateTime => "getDateTime",
        ColumnType::StrictDate => "getStrictDate",
    }
}

/// Applies `function` to the anchor followed by `children`.
///
/// This is the only way a stage changes the pipeline.
pub fn wrap(anchor: Expression, function: &str, children: Vec<Expression>) -> Expression {
    Expression::function(function, iter::once(anchor).chain(children).collect())
}

/// Builds query lambdas from grid requests.
///
/// The variable names bound by generated lambdas are configurable; the
/// defaults are `x` for rows and `agg` for aggregated values.
///
/// # Examples
///
/// ```
/// use tds_lambda::{Expression, LambdaBuilder, SortOrder, TdsRequest, TdsSort};
///
/// let request = TdsRequest::new(["trader"]).with_sort(TdsSort::new("trader", SortOrder::Ascending));
/// let body = LambdaBuilder::default()
///     .build(vec![Expression::var("data")], &request)
///     .unwrap();
///
/// assert_eq!(body[0].function_name(), Some("sort"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaBuilder {
    pub row_variable: String,
    pub aggregation_variable: String,
}

impl Default for LambdaBuilder {
    fn default() -> Self {
        LambdaBuilder {
            row_variable: DEFAULT_ROW_VARIABLE.to_string(),
            aggregation_variable: DEFAULT_AGGREGATION_VARIABLE.to_string(),
        }
    }
}

impl LambdaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_variable(mut self, name: impl Into<String>) -> Self {
        self.row_variable = name.into();
        self
    }

    pub fn with_aggregation_variable(mut self, name: impl Into<String>) -> Self {
        self.aggregation_variable = name.into();
        self
    }

    /// Composes the request onto the first expression of `body`.
    ///
    /// Every expression after the first is returned as it was given. A
    /// request with no operations returns `body` unchanged, even when it is
    /// empty; otherwise an empty body is a [`TdsError::MissingAnchor`].
    #[instrument(name = "builder::build", level = "debug", skip_all, fields(body = body.len()))]
    pub fn build(&self, mut body: Vec<Expression>, request: &TdsRequest) -> Result<Vec<Expression>> {
        if request.is_empty() {
            debug!("request has no operations, body left unchanged");
            return Ok(body);
        }
        if body.is_empty() {
            return Err(TdsError::MissingAnchor);
        }

        let anchor = body.remove(0);
        let anchor = self.compile_filter(anchor, &request.filter);
        let anchor = self.compile_group_by(anchor, request.group_by.as_ref(), &request.columns)?;
        let anchor = self.compile_sort(anchor, &request.sort);
        body.insert(0, anchor);

        Ok(body)
    }

    /// Wraps the anchor in `filter(anchor, {x|predicate})`.
    ///
    /// Predicates are conjoined as they are added, so three filters give
    /// `and(and(p1, p2), p3)`.
    #[instrument(name = "builder::filter", level = "debug", skip_all, fields(filters = filters.len()))]
    pub fn compile_filter(&self, anchor: Expression, filters: &[Filter]) -> Expression {
        if filters.is_empty() {
            return anchor;
        }

        let mut body = Vec::with_capacity(1);
        for filter in filters {
            trace!(column = %filter.column, operation = %filter.operation, "filter predicate");
            body.push(self.predicate(filter));
            if body.len() > 1 {
                body = vec![Expression::function_one(AND_FUNCTION, body)];
            }
        }

        let multiplicity = if filters.len() == 1 {
            Multiplicity::PureOne
        } else {
            Multiplicity::PureMany
        };
        let lambda = Expression::lambda(vec![self.row()], body, Some(multiplicity));

        debug!("filter stage composed");
        wrap(anchor, FILTER_FUNCTION, vec![lambda])
    }

    /// Wraps the anchor in `groupBy(anchor, [keys], [aggregations])`.
    ///
    /// Only single-column grouping is supported. Grouping keys are emitted
    /// while the grid has not yet expanded a group; once it has, and
    /// aggregations are requested, the non-aggregated display columns are
    /// projected instead.
    #[instrument(name = "builder::group_by", level = "debug", skip_all)]
    pub fn compile_group_by(
        &self,
        anchor: Expression,
        group_by: Option<&TdsGroupBy>,
        columns: &[String],
    ) -> Result<Expression> {
        let Some(group_by) = group_by.filter(|g| !g.columns.is_empty()) else {
            return Ok(anchor);
        };
        if group_by.columns.len() > 1 {
            return Err(TdsError::UnsupportedShape(format!(
                "grouping on {} columns; only a single grouping column is supported",
                group_by.columns.len()
            )));
        }

        let keys_applied = group_by.keys_applied();
        let mut keys = Vec::new();

        if !keys_applied {
            keys.extend(group_by.columns.iter().map(Expression::string));
        }

        // Once a group is expanded the aggregation alone would drop every other column
        if keys_applied && !group_by.aggregations.is_empty() {
            keys.extend(
                columns
                    .iter()
                    .filter(|column| !group_by.aggregations.iter().any(|agg| &agg.column == *column))
                    .map(Expression::string),
            );
        }

        let aggregations: Vec<Expression> = group_by
            .aggregations
            .iter()
            .map(|agg| self.aggregation(agg))
            .collect();

        if keys.is_empty() && aggregations.is_empty() {
            debug!("group keys already applied and no aggregations, groupBy skipped");
            return Ok(anchor);
        }

        debug!(keys = keys.len(), aggregations = aggregations.len(), "groupBy stage composed");
        Ok(wrap(
            anchor,
            GROUP_BY_FUNCTION,
            vec![Expression::collection(keys), Expression::collection(aggregations)],
        ))
    }

    /// Wraps the anchor in `sort(anchor, [order('column'), ...])`, keeping sort order.
    #[instrument(name = "builder::sort", level = "debug", skip_all, fields(sorts = sorts.len()))]
    pub fn compile_sort(&self, anchor: Expression, sorts: &[TdsSort]) -> Expression {
        if sorts.is_empty() {
            return anchor;
        }

        let orders = sorts
            .iter()
            .map(|sort| {
                Expression::function_one(sort.order.token(), vec![Expression::string(&sort.column)])
            })
            .collect();

        debug!("sort stage composed");
        wrap(anchor, SORT_FUNCTION, vec![Expression::collection(orders)])
    }

    fn row(&self) -> Variable {
        Variable::new(&self.row_variable)
    }

    /// `$x.<accessor>('column')`
    fn column_property(&self, column_type: ColumnType, column: &str) -> Expression {
        Expression::property(
            accessor(column_type),
            column_type.token(),
            vec![self.row().into(), Expression::string(column)],
        )
    }

    fn predicate(&self, filter: &Filter) -> Expression {
        let property = self.column_property(filter.column_type(), &filter.column);
        let value = Expression::literal(filter.literal());

        match filter.operation {
            FilterOperation::Equals
            | FilterOperation::GreaterThan
            | FilterOperation::GreaterThanOrEqual
            | FilterOperation::LessThan
            | FilterOperation::LessThanOrEqual
            | FilterOperation::Blank => {
                Expression::function_one(filter.operation.token(), vec![property, value])
            }
            FilterOperation::NotEqual => Expression::function_one(
                NOT_FUNCTION,
                vec![Expression::function_one(
                    FilterOperation::Equals.token(),
                    vec![value, property],
                )],
            ),
            // The value is a sibling of the blank check, not an argument of it
            FilterOperation::NotBlank => Expression::function_one(
                NOT_FUNCTION,
                vec![
                    Expression::function_one(FilterOperation::Blank.token(), vec![property]),
                    value,
                ],
            ),
        }
    }

    /// `agg('column', {x|$x.<accessor>('column')}, {agg|<reducer>($agg)})`
    fn aggregation(&self, aggregation: &TdsAggregation) -> Expression {
        trace!(column = %aggregation.column, function = %aggregation.function, "aggregation");

        let extract = Expression::lambda(
            vec![self.row()],
            vec![self.column_property(aggregation.column_type, &aggregation.column)],
            Some(Multiplicity::PureOne),
        );
        let reduce = Expression::lambda(
            vec![Variable::new(&self.aggregation_variable)],
            vec![Expression::function(
                aggregation.function.token(),
                vec![Expression::var(&self.aggregation_variable)],
            )],
            Some(Multiplicity::PureOne),
        );

        Expression::function_one(
            AGG_FUNCTION,
            vec![Expression::string(&aggregation.column), extract, reduce],
        )
    }
}

/// Composes `request` onto `body` with the default variable names.
///
/// See [`LambdaBuilder::build`].
pub fn build_lambda_expressions(body: Vec<Expression>, request: &TdsRequest) -> Result<Vec<Expression>> {
    LambdaBuilder::default().build(body, request)
}
