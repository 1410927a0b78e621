use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    error::{Result, TdsError},
    request::ColumnType,
};

/// A request-supplied comparison value, tagged by the column type it belongs to.
///
/// The grid sends values as plain JSON, so the only point where the runtime
/// representation is checked against the declared column type is
/// [`TypedValue::from_json`]. Once a `TypedValue` exists, turning it into a
/// literal cannot fail.
///
/// # Examples
///
/// ```
/// use tds_lambda::{ColumnType, TypedValue};
/// use serde_json::json;
///
/// let value = TypedValue::from_json(ColumnType::Integer, json!(42)).unwrap();
/// assert_eq!(value, TypedValue::Integer(42));
///
/// assert!(TypedValue::from_json(ColumnType::Boolean, json!("yes")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Boolean(bool),
    /// Arbitrary-precision number
    Number(Decimal),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    /// Pre-formatted date, passed through untouched
    Date(String),
    /// Pre-formatted date-time, passed through untouched
    DateTime(String),
    /// Pre-formatted strict date, passed through untouched
    StrictDate(String),
}

impl TypedValue {
    /// Checks a JSON payload against a column type and wraps it.
    ///
    /// `null` is never accepted, whatever the column type.
    pub fn from_json(column_type: ColumnType, value: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        let mismatch = |expected: &'static str, found: &Json| TdsError::TypeMismatch {
            column_type,
            expected,
            found: json_kind(found).to_string(),
        };

        match (column_type, value) {
            (ColumnType::String, Json::String(s)) => Ok(TypedValue::String(s)),
            (ColumnType::Boolean, Json::Bool(b)) => Ok(TypedValue::Boolean(b)),
            (ColumnType::Number, Json::Number(n)) => Ok(TypedValue::Number(
                to_decimal(&n).ok_or_else(|| mismatch("a decimal", &Json::Number(n)))?,
            )),
            (ColumnType::Decimal, Json::Number(n)) => Ok(TypedValue::Decimal(
                to_decimal(&n).ok_or_else(|| mismatch("a decimal", &Json::Number(n)))?,
            )),
            (ColumnType::Integer, Json::Number(n)) => match n.as_i64() {
                Some(i) => Ok(TypedValue::Integer(i)),
                None => Err(mismatch("a 64-bit integer", &Json::Number(n))),
            },
            (ColumnType::Float, Json::Number(n)) => match n.as_f64() {
                Some(f) => Ok(TypedValue::Float(f)),
                None => Err(mismatch("a 64-bit float", &Json::Number(n))),
            },
            (ColumnType::Date, Json::String(s)) => Ok(TypedValue::Date(s)),
            (ColumnType::DateTime, Json::String(s)) => Ok(TypedValue::DateTime(s)),
            (ColumnType::StrictDate, Json::String(s)) => Ok(TypedValue::StrictDate(s)),
            (column_type, other) => Err(mismatch(expected_kind(column_type), &other)),
        }
    }

    /// The column type this value was checked against.
    pub fn column_type(&self) -> ColumnType {
        match self {
            TypedValue::String(_) => ColumnType::String,
            TypedValue::Boolean(_) => ColumnType::Boolean,
            TypedValue::Number(_) => ColumnType::Number,
            TypedValue::Integer(_) => ColumnType::Integer,
            TypedValue::Float(_) => ColumnType::Float,
            TypedValue::Decimal(_) => ColumnType::Decimal,
            TypedValue::Date(_) => ColumnType::Date,
            TypedValue::DateTime(_) => ColumnType::DateTime,
            TypedValue::StrictDate(_) => ColumnType::StrictDate,
        }
    }
}

fn expected_kind(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::String => "a string",
        ColumnType::Boolean => "a boolean",
        ColumnType::Number | ColumnType::Decimal => "a decimal",
        ColumnType::Integer => "a 64-bit integer",
        ColumnType::Float => "a 64-bit float",
        ColumnType::Date | ColumnType::DateTime | ColumnType::StrictDate => {
            "a pre-formatted date string"
        }
    }
}

/// Returns a human-readable kind name for a JSON value
fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        serde_json::Value::Number(_) => "float",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Exact decimal for a JSON number.
///
/// `serde_json` keeps the number's source text, so no digit is lost to an
/// intermediate float.
pub(crate) fn to_decimal(n: &serde_json::Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
