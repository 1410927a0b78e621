//! JSON protocol of the expression tree.
//!
//! Nodes are internally tagged by `_type`; literals are flattened into
//! `{"_type": "<kind>", "value": ...}` so the tree reads the way the
//! evaluator expects it. Decimals travel as JSON numbers with every digit
//! kept, and a literal without a payload carries `"value": null`.
//!
//! Reading goes through `serde_json::Value` rather than a derived tagged
//! enum: serde buffers tagged content, and a buffered number can no longer
//! be read back exactly.

use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value as Json};

use crate::{
    ast::{AppliedFunction, AppliedProperty, Collection, Expression, Lambda, Literal, LiteralKind, Variable},
    value::to_decimal,
};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "_type")]
pub(crate) enum WireExpression {
    #[serde(rename = "var")]
    Variable(Variable),
    #[serde(rename = "string")]
    String { value: Option<String> },
    #[serde(rename = "boolean")]
    Boolean { value: Option<bool> },
    #[serde(rename = "decimal")]
    Decimal {
        #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision_option::serialize")]
        value: Option<Decimal>,
    },
    #[serde(rename = "integer")]
    Integer { value: Option<i64> },
    #[serde(rename = "float")]
    Float { value: Option<f64> },
    #[serde(rename = "dateTime")]
    DateTime { value: Option<String> },
    #[serde(rename = "strictDate")]
    StrictDate { value: Option<String> },
    #[serde(rename = "property")]
    Property(AppliedProperty),
    #[serde(rename = "func")]
    Function(AppliedFunction),
    #[serde(rename = "lambda")]
    Lambda(Lambda),
    #[serde(rename = "collection")]
    Collection(Collection),
}

impl From<Expression> for WireExpression {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Variable(v) => WireExpression::Variable(v),
            Expression::Literal(literal) => literal.into(),
            Expression::Property(p) => WireExpression::Property(p),
            Expression::Function(f) => WireExpression::Function(f),
            Expression::Lambda(l) => WireExpression::Lambda(l),
            Expression::Collection(c) => WireExpression::Collection(c),
        }
    }
}

impl From<Literal> for WireExpression {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::String(s) => WireExpression::String { value: Some(s) },
            Literal::Boolean(b) => WireExpression::Boolean { value: Some(b) },
            Literal::Decimal(d) => WireExpression::Decimal { value: Some(d) },
            Literal::Integer(i) => WireExpression::Integer { value: Some(i) },
            Literal::Float(f) => WireExpression::Float { value: Some(f) },
            Literal::DateTime(s) => WireExpression::DateTime { value: Some(s) },
            Literal::StrictDate(s) => WireExpression::StrictDate { value: Some(s) },
            Literal::Null(kind) => match kind {
                LiteralKind::String => WireExpression::String { value: None },
                LiteralKind::Boolean => WireExpression::Boolean { value: None },
                LiteralKind::Decimal => WireExpression::Decimal { value: None },
                LiteralKind::Integer => WireExpression::Integer { value: None },
                LiteralKind::Float => WireExpression::Float { value: None },
                LiteralKind::DateTime => WireExpression::DateTime { value: None },
                LiteralKind::StrictDate => WireExpression::StrictDate { value: None },
            },
        }
    }
}

impl TryFrom<Json> for Expression {
    type Error = String;

    fn try_from(json: Json) -> Result<Self, String> {
        let mut node = match json {
            Json::Object(node) => node,
            other => return Err(format!("expected an expression node, found {}", other)),
        };
        let tag = match node.remove("_type") {
            Some(Json::String(tag)) => tag,
            _ => return Err("expression node without a `_type` tag".to_string()),
        };

        match tag.as_str() {
            "var" => decode(node).map(Expression::Variable),
            "property" => decode(node).map(Expression::Property),
            "func" => decode(node).map(Expression::Function),
            "lambda" => decode(node).map(Expression::Lambda),
            "collection" => decode(node).map(Expression::Collection),
            other => match LiteralKind::from_token(other) {
                Some(kind) => {
                    let value = node.remove("value").unwrap_or(Json::Null);
                    read_literal(kind, value).map(Expression::Literal)
                }
                None => Err(format!("unknown expression type `{}`", other)),
            },
        }
    }
}

fn decode<T: DeserializeOwned>(node: Map<String, Json>) -> Result<T, String> {
    serde_json::from_value(Json::Object(node)).map_err(|e| e.to_string())
}

fn read_literal(kind: LiteralKind, value: Json) -> Result<Literal, String> {
    let invalid = |value: &Json| format!("invalid {} literal: {}", kind, value);

    match (kind, value) {
        (kind, Json::Null) => Ok(Literal::Null(kind)),
        (LiteralKind::String, Json::String(s)) => Ok(Literal::String(s)),
        (LiteralKind::Boolean, Json::Bool(b)) => Ok(Literal::Boolean(b)),
        (LiteralKind::Decimal, Json::Number(n)) => {
            to_decimal(&n).map(Literal::Decimal).ok_or_else(|| invalid(&Json::Number(n)))
        }
        (LiteralKind::Integer, Json::Number(n)) => {
            n.as_i64().map(Literal::Integer).ok_or_else(|| invalid(&Json::Number(n)))
        }
        (LiteralKind::Float, Json::Number(n)) => {
            n.as_f64().map(Literal::Float).ok_or_else(|| invalid(&Json::Number(n)))
        }
        (LiteralKind::DateTime, Json::String(s)) => Ok(Literal::DateTime(s)),
        (LiteralKind::StrictDate, Json::String(s)) => Ok(Literal::StrictDate(s)),
        (_, other) => Err(invalid(&other)),
    }
}

/// Lambda parameters travel as full `var` nodes.
pub(crate) mod lambda_parameters {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    use crate::ast::{Expression, Variable};

    pub fn serialize<S: Serializer>(params: &[Variable], serializer: S) -> Result<S::Ok, S::Error> {
        params
            .iter()
            .cloned()
            .map(Expression::Variable)
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Variable>, D::Error> {
        Vec::<Expression>::deserialize(deserializer)?
            .into_iter()
            .map(|expr| match expr {
                Expression::Variable(v) => Ok(v),
                other => Err(D::Error::custom(format!(
                    "lambda parameter must be a variable, found {:?}",
                    other
                ))),
            })
            .collect()
    }
}
