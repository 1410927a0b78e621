use std::fmt;

use rust_decimal::Decimal;

use crate::{request::ColumnType, value::TypedValue};

/// Typed constant embedded in an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Boolean(bool),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
    Integer(i64),
    Float(f64),
    /// Pre-formatted date-time text
    DateTime(String),
    /// Pre-formatted date text
    StrictDate(String),
    /// A literal of the given kind with no payload, sent as `"value": null`
    Null(LiteralKind),
}

/// Kinds of literal the evaluator understands; each is one `_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Boolean,
    Decimal,
    Integer,
    Float,
    DateTime,
    StrictDate,
}

impl LiteralKind {
    pub const ALL: [LiteralKind; 7] = [
        LiteralKind::String,
        LiteralKind::Boolean,
        LiteralKind::Decimal,
        LiteralKind::Integer,
        LiteralKind::Float,
        LiteralKind::DateTime,
        LiteralKind::StrictDate,
    ];

    pub fn token(self) -> &'static str {
        match self {
            LiteralKind::String => "string",
            LiteralKind::Boolean => "boolean",
            LiteralKind::Decimal => "decimal",
            LiteralKind::Integer => "integer",
            LiteralKind::Float => "float",
            LiteralKind::DateTime => "dateTime",
            LiteralKind::StrictDate => "strictDate",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        LiteralKind::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Literal kind used for values of a column type.
///
/// Numbers and decimals share the decimal literal; plain dates are embedded
/// as date-times.
impl From<ColumnType> for LiteralKind {
    fn from(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::String => LiteralKind::String,
            ColumnType::Boolean => LiteralKind::Boolean,
            ColumnType::Number | ColumnType::Decimal => LiteralKind::Decimal,
            ColumnType::Integer => LiteralKind::Integer,
            ColumnType::Float => LiteralKind::Float,
            ColumnType::Date | ColumnType::DateTime => LiteralKind::DateTime,
            ColumnType::StrictDate => LiteralKind::StrictDate,
        }
    }
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::String(_) => LiteralKind::String,
            Literal::Boolean(_) => LiteralKind::Boolean,
            Literal::Decimal(_) => LiteralKind::Decimal,
            Literal::Integer(_) => LiteralKind::Integer,
            Literal::Float(_) => LiteralKind::Float,
            Literal::DateTime(_) => LiteralKind::DateTime,
            Literal::StrictDate(_) => LiteralKind::StrictDate,
            Literal::Null(kind) => *kind,
        }
    }
}

/// Literal construction rule for each column type, matching [`LiteralKind::from`].
impl From<TypedValue> for Literal {
    fn from(value: TypedValue) -> Self {
        match value {
            TypedValue::String(s) => Literal::String(s),
            TypedValue::Boolean(b) => Literal::Boolean(b),
            TypedValue::Number(d) | TypedValue::Decimal(d) => Literal::Decimal(d),
            TypedValue::Integer(i) => Literal::Integer(i),
            TypedValue::Float(f) => Literal::Float(f),
            TypedValue::Date(s) | TypedValue::DateTime(s) => Literal::DateTime(s),
            TypedValue::StrictDate(s) => Literal::StrictDate(s),
        }
    }
}
