use serde::Deserialize;

use crate::{
    ast::{Literal, LiteralKind},
    error::{Result, TdsError},
    request::{ColumnType, FilterOperation},
    value::TypedValue,
};

/// A single column filter.
///
/// The declared column type is carried by the value itself, so a filter can
/// never hold a value of the wrong kind. Deserializing from the grid's JSON
/// checks the payload against `columnType` and fails fast on a mismatch.
///
/// Blank checks may come without a value; they still compile with a
/// payload-less literal of the column's kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawFilter")]
pub struct Filter {
    pub column: String,
    pub operation: FilterOperation,
    column_type: ColumnType,
    value: Option<TypedValue>,
}

impl Filter {
    pub fn new(column: impl Into<String>, operation: FilterOperation, value: TypedValue) -> Self {
        Filter {
            column: column.into(),
            operation,
            column_type: value.column_type(),
            value: Some(value),
        }
    }

    /// A blank check with no comparison value.
    ///
    /// Every other operation compares against something and is rejected.
    pub fn without_value(
        column: impl Into<String>,
        column_type: ColumnType,
        operation: FilterOperation,
    ) -> Result<Self> {
        let column = column.into();
        if !operation.is_blank_check() {
            return Err(TdsError::UnsupportedShape(format!(
                "{} filter on '{}' needs a value",
                operation, column
            )));
        }

        Ok(Filter {
            column,
            operation,
            column_type,
            value: None,
        })
    }

    /// Builds a filter from an untyped JSON payload, checking it against `column_type`.
    ///
    /// `null` is accepted for blank checks only.
    pub fn from_json(
        column: impl Into<String>,
        column_type: ColumnType,
        operation: FilterOperation,
        value: serde_json::Value,
    ) -> Result<Self> {
        if value.is_null() && operation.is_blank_check() {
            return Filter::without_value(column, column_type, operation);
        }
        Ok(Filter::new(column, operation, TypedValue::from_json(column_type, value)?))
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn value(&self) -> Option<&TypedValue> {
        self.value.as_ref()
    }

    /// The literal the filter compares against.
    pub fn literal(&self) -> Literal {
        match &self.value {
            Some(value) => value.clone().into(),
            None => Literal::Null(LiteralKind::from(self.column_type)),
        }
    }
}

/// Filter as it arrives over the wire, before its value has been checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFilter {
    column: String,
    column_type: ColumnType,
    operation: FilterOperation,
    #[serde(default)]
    value: serde_json::Value,
}

impl TryFrom<RawFilter> for Filter {
    type Error = TdsError;

    fn try_from(raw: RawFilter) -> Result<Self> {
        Filter::from_json(raw.column, raw.column_type, raw.operation, raw.value)
    }
}
