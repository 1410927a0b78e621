use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;
use tds_lambda::*;

fn parse(value: serde_json::Value) -> Result<TdsRequest, serde_json::Error> {
    serde_json::from_value(value)
}

// ========================================================================
// Request deserialization
// ========================================================================

#[test]
fn test_full_request() {
    let request = parse(json!({
        "columns": ["trader", "qty", "price"],
        "filter": [
            {"column": "qty", "columnType": "Integer", "operation": "greaterThan", "value": 10},
            {"column": "price", "columnType": "Decimal", "operation": "lessThan", "value": 99.5}
        ],
        "sort": [{"column": "trader", "order": "desc"}],
        "groupBy": {
            "columns": ["trader"],
            "groupKeys": null,
            "aggregations": [{"column": "qty", "columnType": "Integer", "function": "sum"}]
        }
    }))
    .unwrap();

    assert_eq!(request.columns, vec!["trader", "qty", "price"]);
    assert_eq!(
        request.filter,
        vec![
            Filter::new("qty", FilterOperation::GreaterThan, TypedValue::Integer(10)),
            Filter::new("price", FilterOperation::LessThan, TypedValue::Decimal(Decimal::new(995, 1))),
        ]
    );
    assert_eq!(request.sort, vec![TdsSort::new("trader", SortOrder::Descending)]);

    let group_by = request.group_by.unwrap();
    assert_eq!(group_by.columns, vec!["trader"]);
    assert_eq!(group_by.group_keys, None);
    assert_eq!(
        group_by.aggregations,
        vec![TdsAggregation::new("qty", ColumnType::Integer, AggregationFunction::Sum)]
    );
}

#[test]
fn test_missing_sections_default_to_empty() {
    let request = parse(json!({"columns": ["a"]})).unwrap();

    assert!(request.filter.is_empty());
    assert!(request.sort.is_empty());
    assert!(request.group_by.is_none());
    assert!(request.is_empty());
}

#[test]
fn test_group_by_without_columns_counts_as_empty() {
    let request = parse(json!({"columns": ["a"], "groupBy": {"columns": []}})).unwrap();
    assert!(request.is_empty());
}

#[test]
fn test_mismatched_filter_value_fails_deserialization() {
    let err = parse(json!({
        "columns": ["flag"],
        "filter": [{"column": "flag", "columnType": "Boolean", "operation": "equal", "value": "true"}]
    }))
    .unwrap_err();

    assert!(err.to_string().contains("Type mismatch"), "{}", err);
}

#[test]
fn test_unknown_operation_token_is_rejected() {
    let result = parse(json!({
        "filter": [{"column": "a", "columnType": "String", "operation": "contains", "value": "x"}]
    }));
    assert!(result.is_err());
}

#[test]
fn test_group_keys_applied() {
    let group_by = TdsGroupBy::new(vec!["a".into()]);
    assert!(!group_by.keys_applied());
    assert!(!group_by.clone().with_group_keys(vec![]).keys_applied());
    assert!(group_by.with_group_keys(vec!["k".into()]).keys_applied());
}

// ========================================================================
// Vocabulary tokens
// ========================================================================

#[test]
fn test_tokens_parse_back() {
    for op in FilterOperation::ALL {
        assert_eq!(op.token().parse::<FilterOperation>().unwrap(), op);
    }
    for t in ColumnType::ALL {
        assert_eq!(t.to_string().parse::<ColumnType>().unwrap(), t);
    }
    for o in SortOrder::ALL {
        assert_eq!(o.token().parse::<SortOrder>().unwrap(), o);
    }
    for f in AggregationFunction::ALL {
        assert_eq!(f.token().parse::<AggregationFunction>().unwrap(), f);
    }
}

#[test]
fn test_unknown_filter_operation_is_unsupported() {
    let err = "between".parse::<FilterOperation>().unwrap_err();
    assert!(matches!(err, TdsError::UnsupportedOperation(_)));

    let err = "median".parse::<AggregationFunction>().unwrap_err();
    assert!(matches!(err, TdsError::UnsupportedOperation(_)));
}

#[test]
fn test_unknown_sort_order_token() {
    let err = "up".parse::<SortOrder>().unwrap_err();
    assert_eq!(
        err,
        TdsError::UnknownToken {
            vocabulary: "sort order",
            token: "up".into()
        }
    );
}

#[test]
fn test_serde_tokens_match_token_method() {
    assert_eq!(serde_json::to_value(FilterOperation::NotBlank).unwrap(), json!("isNotEmpty"));
    assert_eq!(serde_json::to_value(SortOrder::Ascending).unwrap(), json!("asc"));
    assert_eq!(serde_json::to_value(AggregationFunction::Average).unwrap(), json!("average"));
    assert_eq!(serde_json::to_value(ColumnType::StrictDate).unwrap(), json!("StrictDate"));
}

// ========================================================================
// Typed values
// ========================================================================

#[test]
fn test_typed_values_accept_matching_json() {
    let cases = [
        (ColumnType::String, json!("abc"), TypedValue::String("abc".into())),
        (ColumnType::Boolean, json!(false), TypedValue::Boolean(false)),
        (ColumnType::Number, json!(12.25), TypedValue::Number(Decimal::new(1225, 2))),
        (ColumnType::Decimal, json!(7), TypedValue::Decimal(Decimal::new(7, 0))),
        (ColumnType::Integer, json!(-4), TypedValue::Integer(-4)),
        (ColumnType::Float, json!(3), TypedValue::Float(3.0)),
        (ColumnType::Date, json!("2024-01-01"), TypedValue::Date("2024-01-01".into())),
        (
            ColumnType::DateTime,
            json!("2024-01-01T00:00:00"),
            TypedValue::DateTime("2024-01-01T00:00:00".into()),
        ),
        (ColumnType::StrictDate, json!("2024-01-01"), TypedValue::StrictDate("2024-01-01".into())),
    ];

    for (column_type, raw, expected) in cases {
        let value = TypedValue::from_json(column_type, raw).unwrap();
        assert_eq!(value, expected);
        assert_eq!(value.column_type(), column_type);
    }
}

#[test]
fn test_integer_rejects_fraction() {
    let err = TypedValue::from_json(ColumnType::Integer, json!(1.5)).unwrap_err();
    assert_eq!(
        err,
        TdsError::TypeMismatch {
            column_type: ColumnType::Integer,
            expected: "a 64-bit integer",
            found: "float".into(),
        }
    );
}

#[test]
fn test_integer_rejects_out_of_range() {
    let err = TypedValue::from_json(ColumnType::Integer, json!(u64::MAX)).unwrap_err();
    assert!(matches!(err, TdsError::TypeMismatch { .. }));
}

#[test]
fn test_null_is_not_a_typed_value() {
    for column_type in ColumnType::ALL {
        let err = TypedValue::from_json(column_type, serde_json::Value::Null).unwrap_err();
        match err {
            TdsError::TypeMismatch { found, .. } => assert_eq!(found, "null"),
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }
}

#[test]
fn test_decimal_keeps_every_digit() {
    let request: TdsRequest = serde_json::from_str(
        r#"{
            "columns": ["price", "notional"],
            "filter": [
                {"column": "price", "columnType": "Decimal", "operation": "equal", "value": 12345678901234567.89},
                {"column": "notional", "columnType": "Number", "operation": "lessThan", "value": 0.12345678901234567891}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(
        request.filter[0].value(),
        Some(&TypedValue::Decimal(Decimal::from_str("12345678901234567.89").unwrap()))
    );
    assert_eq!(
        request.filter[1].value(),
        Some(&TypedValue::Number(Decimal::from_str("0.12345678901234567891").unwrap()))
    );
}

// ========================================================================
// Filters without a value
// ========================================================================

#[test]
fn test_blank_checks_accept_missing_value() {
    let request = parse(json!({
        "columns": ["name", "qty"],
        "filter": [
            {"column": "name", "columnType": "String", "operation": "isEmpty"},
            {"column": "qty", "columnType": "Integer", "operation": "isNotEmpty", "value": null}
        ]
    }))
    .unwrap();

    let blank = &request.filter[0];
    assert_eq!(blank.operation, FilterOperation::Blank);
    assert_eq!(blank.column_type(), ColumnType::String);
    assert_eq!(blank.value(), None);
    assert_eq!(blank.literal(), Literal::Null(LiteralKind::String));

    let not_blank = &request.filter[1];
    assert_eq!(not_blank.operation, FilterOperation::NotBlank);
    assert_eq!(not_blank.column_type(), ColumnType::Integer);
    assert_eq!(not_blank.value(), None);
    assert_eq!(not_blank.literal(), Literal::Null(LiteralKind::Integer));
}

#[test]
fn test_blank_check_with_value_keeps_it() {
    let filter = Filter::from_json("name", ColumnType::String, FilterOperation::Blank, json!("")).unwrap();

    assert_eq!(filter.value(), Some(&TypedValue::String(String::new())));
    assert_eq!(filter.literal(), Literal::String(String::new()));
}

#[test]
fn test_comparisons_still_require_a_value() {
    let err = parse(json!({
        "columns": ["qty"],
        "filter": [{"column": "qty", "columnType": "Integer", "operation": "equal"}]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("found null"), "{}", err);

    let err = Filter::without_value("qty", ColumnType::Integer, FilterOperation::GreaterThan).unwrap_err();
    assert!(matches!(err, TdsError::UnsupportedShape(_)));
}

#[test]
fn test_null_literal_kind_follows_column_type() {
    let cases = [
        (ColumnType::Number, LiteralKind::Decimal),
        (ColumnType::Decimal, LiteralKind::Decimal),
        (ColumnType::Float, LiteralKind::Float),
        (ColumnType::Date, LiteralKind::DateTime),
        (ColumnType::StrictDate, LiteralKind::StrictDate),
        (ColumnType::Boolean, LiteralKind::Boolean),
    ];

    for (column_type, kind) in cases {
        let filter = Filter::without_value("c", column_type, FilterOperation::Blank).unwrap();
        assert_eq!(filter.literal(), Literal::Null(kind));
    }
}

#[test]
fn test_dates_require_strings() {
    assert!(TypedValue::from_json(ColumnType::StrictDate, json!(20240101)).is_err());
    assert!(TypedValue::from_json(ColumnType::String, json!(["a"])).is_err());
}
