use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;
use tds_lambda::output::{to_pure, to_pure_pretty};
use tds_lambda::*;

fn sample_request() -> TdsRequest {
    TdsRequest::new(["trader", "qty"])
        .with_filter(Filter::new("qty", FilterOperation::GreaterThan, TypedValue::Integer(10)))
        .with_group_by(
            TdsGroupBy::new(vec!["trader".into()])
                .with_aggregation(TdsAggregation::new("qty", ColumnType::Integer, AggregationFunction::Sum)),
        )
        .with_sort(TdsSort::new("trader", SortOrder::Ascending))
}

// ========================================================================
// Pure text
// ========================================================================

#[test]
fn test_pipeline_as_pure() {
    let body = build_lambda_expressions(vec![Expression::var("data")], &sample_request()).unwrap();

    assert_eq!(
        to_pure(&body[0]),
        "sort(groupBy(filter($data, {x|greaterThan($x.getInteger('qty'), 10)}), ['trader'], \
         [agg('qty', {x|$x.getInteger('qty')}, {agg|sum($agg)})]), [asc('trader')])"
    );
}

#[test]
fn test_literals_as_pure() {
    let cases = [
        (Literal::String("it's".into()), r"'it\'s'"),
        (Literal::Boolean(true), "true"),
        (Literal::Decimal(Decimal::new(15, 1)), "1.5D"),
        (Literal::Integer(-3), "-3"),
        (Literal::Float(2.0), "2.0"),
        (Literal::Float(2.5), "2.5"),
        (Literal::DateTime("2024-01-01T10:00:00".into()), "%2024-01-01T10:00:00"),
        (Literal::Null(LiteralKind::String), "[]"),
        (Literal::StrictDate("2024-01-01".into()), "%2024-01-01"),
    ];

    for (literal, text) in cases {
        assert_eq!(to_pure(&Expression::literal(literal)), text);
    }
}

#[test]
fn test_pretty_pure_breaks_arguments() {
    let expr = Expression::function("f", vec![Expression::var("a"), Expression::var("b")]);
    assert_eq!(to_pure_pretty(&expr), "f(\n  $a,\n  $b\n)");

    // Single arguments stay inline
    let expr = Expression::function("g", vec![Expression::var("a")]);
    assert_eq!(to_pure_pretty(&expr), "g($a)");
}

// ========================================================================
// Protocol JSON
// ========================================================================

#[test]
fn test_sort_json_shape() {
    let body = build_lambda_expressions(
        vec![Expression::var("data")],
        &TdsRequest::new(["a"]).with_sort(TdsSort::new("a", SortOrder::Descending)),
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&to_json(&body).unwrap()).unwrap();
    assert_eq!(
        value,
        json!([{
            "_type": "func",
            "function": "sort",
            "parameters": [
                {"_type": "var", "name": "data"},
                {"_type": "collection", "values": [{
                    "_type": "func",
                    "function": "desc",
                    "parameters": [{"_type": "string", "value": "a"}],
                    "multiplicity": {"lowerBound": 1, "upperBound": 1}
                }]}
            ]
        }])
    );
}

#[test]
fn test_filter_lambda_json_shape() {
    let body = build_lambda_expressions(
        vec![Expression::var("data")],
        &TdsRequest::new(["a", "b"])
            .with_filter(Filter::new("a", FilterOperation::Equals, TypedValue::Boolean(true)))
            .with_filter(Filter::new("b", FilterOperation::Equals, TypedValue::Boolean(false))),
    )
    .unwrap();

    let value = serde_json::to_value(&body[0]).unwrap();
    let lambda = &value["parameters"][1];

    assert_eq!(lambda["_type"], "lambda");
    assert_eq!(lambda["parameters"], json!([{"_type": "var", "name": "x"}]));
    assert_eq!(lambda["multiplicity"], json!({"lowerBound": 0}));
    assert_eq!(lambda["body"][0]["function"], "and");
    assert_eq!(
        lambda["body"][0]["parameters"][0]["parameters"][0],
        json!({
            "_type": "property",
            "property": "getBoolean",
            "class": "Boolean",
            "parameters": [{"_type": "var", "name": "x"}, {"_type": "string", "value": "a"}]
        })
    );
}

#[test]
fn test_decimal_literal_is_a_json_number() {
    let price = Expression::literal(Literal::Decimal(Decimal::new(1999, 2)));
    assert_eq!(to_json(&price).unwrap(), r#"{"_type":"decimal","value":19.99}"#);

    let wide = Expression::literal(Literal::Decimal(Decimal::from_str("12345678901234567.89").unwrap()));
    let json = to_json(&wide).unwrap();
    assert_eq!(json, r#"{"_type":"decimal","value":12345678901234567.89}"#);
    assert_eq!(serde_json::from_str::<Expression>(&json).unwrap(), wide);
}

#[test]
fn test_null_literal_json_shape() {
    let blank = Expression::literal(Literal::Null(LiteralKind::String));
    assert_eq!(to_json(&blank).unwrap(), r#"{"_type":"string","value":null}"#);

    let missing: Expression = serde_json::from_str(r#"{"_type":"integer"}"#).unwrap();
    assert_eq!(missing, Expression::literal(Literal::Null(LiteralKind::Integer)));
}

#[test]
fn test_literal_payload_must_match_its_kind() {
    let result = serde_json::from_str::<Expression>(r#"{"_type":"boolean","value":"yes"}"#);
    assert!(result.is_err());

    let result = serde_json::from_str::<Expression>(r#"{"_type":"timestamp","value":"2024"}"#);
    assert!(result.is_err());
}

#[test]
fn test_composed_tree_survives_round_trip() {
    let mut request = sample_request();
    request.filter.push(Filter::new(
        "price",
        FilterOperation::NotEqual,
        TypedValue::Number(Decimal::new(1999, 2)),
    ));
    request
        .filter
        .push(Filter::without_value("trader", ColumnType::String, FilterOperation::NotBlank).unwrap());
    let body = build_lambda_expressions(vec![Expression::var("data"), Expression::string("tail")], &request)
        .unwrap();

    let json = to_json_pretty(&body).unwrap();
    let back: Vec<Expression> = serde_json::from_str(&json).unwrap();

    assert_eq!(back, body);
}

#[test]
fn test_lambda_parameters_must_be_variables() {
    let result = serde_json::from_value::<Expression>(json!({
        "_type": "lambda",
        "parameters": [{"_type": "string", "value": "x"}],
        "body": []
    }));
    assert!(result.is_err());
}

#[test]
fn test_unsupported_multiplicity_is_rejected() {
    let result = serde_json::from_value::<Expression>(json!({
        "_type": "collection",
        "values": [],
        "multiplicity": {"lowerBound": 2, "upperBound": 5}
    }));
    assert!(result.is_err());
}
