use tabular_ingest::ingestion::json::{DEFAULT_SEPARATOR, ingest_json_from_path, ingest_json_from_str};
use tabular_ingest::types::{DataType, Schema, Value};
use tabular_ingest::ErrorKind;

#[test]
fn ingest_json_array_from_path_happy_path() {
    let table = ingest_json_from_path("tests/fixtures/people.json", DEFAULT_SEPARATOR).unwrap();

    assert_eq!(
        table.columns,
        vec!["id", "user.name", "user.lang", "score", "active", "tags"]
    );
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.get(0, "user.name"), Some(&Value::Utf8("Ada".to_string())));
    assert_eq!(table.get(1, "user.name"), Some(&Value::Utf8("Grace".to_string())));
    assert_eq!(table.get(1, "user.lang"), Some(&Value::Null));
    assert_eq!(
        table.get(0, "tags"),
        Some(&Value::Utf8(r#"["math","engines"]"#.to_string()))
    );

    let schema = Schema::infer(&table);
    assert_eq!(schema.data_type_of("id"), Some(DataType::Int64));
    assert_eq!(schema.data_type_of("score"), Some(DataType::Float64));
    assert_eq!(schema.data_type_of("active"), Some(DataType::Bool));
    assert_eq!(schema.data_type_of("tags"), Some(DataType::Utf8));
}

#[test]
fn ingest_json_flattening_example() {
    let table = ingest_json_from_str(r#"[{"a": 1, "b": {"c": 2}}, {"a": 3}]"#, DEFAULT_SEPARATOR).unwrap();
    assert_eq!(table.columns, vec!["a", "b.c"]);
    assert_eq!(
        table.rows,
        vec![
            vec![Value::Int64(1), Value::Int64(2)],
            vec![Value::Int64(3), Value::Null],
        ]
    );
    assert_eq!(Schema::infer(&table).data_type_of("a"), Some(DataType::Int64));
}

#[test]
fn ingest_json_single_object_is_one_row() {
    let table = ingest_json_from_str(r#"{"id": 7, "meta": {"ok": true}}"#, DEFAULT_SEPARATOR).unwrap();
    assert_eq!(table.columns, vec!["id", "meta.ok"]);
    assert_eq!(table.rows, vec![vec![Value::Int64(7), Value::Bool(true)]]);
}

#[test]
fn ingest_json_strings_are_not_coerced() {
    let table = ingest_json_from_str(r#"[{"n": "30"}, {"n": 30}]"#, DEFAULT_SEPARATOR).unwrap();
    assert_eq!(table.rows[0][0], Value::Utf8("30".to_string()));
    assert_eq!(Schema::infer(&table).data_type_of("n"), Some(DataType::Utf8));
}

#[test]
fn ingest_json_empty_array_is_empty_table() {
    let table = ingest_json_from_str("[]", DEFAULT_SEPARATOR).unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 0);
}

#[test]
fn ingest_json_errors_on_truncated_input() {
    let err = ingest_json_from_str(r#"[{"a": 1}, {"a":"#, DEFAULT_SEPARATOR).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("json error"));
}

#[test]
fn ingest_json_errors_on_scalar_records() {
    let err = ingest_json_from_str("[1, 2]", DEFAULT_SEPARATOR).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("record 1 is not a json object"));
}
