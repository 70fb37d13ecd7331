use tabular_ingest::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader};
use tabular_ingest::types::{DataType, Schema, Value};
use tabular_ingest::ErrorKind;

fn from_str(input: &str) -> tabular_ingest::IngestionResult<tabular_ingest::types::Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr)
}

#[test]
fn ingest_csv_from_path_happy_path() {
    let table = ingest_csv_from_path("tests/fixtures/people.csv").unwrap();

    assert_eq!(table.columns, vec!["id", "name", "score", "active"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
        ]
    );
}

#[test]
fn ingest_csv_name_age_example() {
    let table = from_str("name,age\nAlice,30\nBob,25\n").unwrap();
    assert_eq!(
        table.rows,
        vec![
            vec![Value::Utf8("Alice".to_string()), Value::Int64(30)],
            vec![Value::Utf8("Bob".to_string()), Value::Int64(25)],
        ]
    );

    let schema = Schema::infer(&table);
    assert_eq!(schema.data_type_of("name"), Some(DataType::Utf8));
    assert_eq!(schema.data_type_of("age"), Some(DataType::Int64));
}

#[test]
fn ingest_csv_widens_mixed_numbers_to_float() {
    let table = from_str("x\n1\n2.5\n").unwrap();
    assert_eq!(
        table.rows,
        vec![vec![Value::Float64(1.0)], vec![Value::Float64(2.5)]]
    );
}

#[test]
fn ingest_csv_missing_tokens_become_null() {
    let table = from_str("x,y\n1,NA\n,b\nnull,\n").unwrap();
    assert_eq!(
        table.rows,
        vec![
            vec![Value::Int64(1), Value::Null],
            vec![Value::Null, Value::Utf8("b".to_string())],
            vec![Value::Null, Value::Null],
        ]
    );
}

#[test]
fn ingest_csv_keeps_non_numeric_columns_as_text() {
    let table = from_str("code\n007\nA1\n").unwrap();
    assert_eq!(
        table.rows,
        vec![
            vec![Value::Utf8("007".to_string())],
            vec![Value::Utf8("A1".to_string())],
        ]
    );
}

#[test]
fn ingest_csv_parses_booleans_case_insensitively() {
    let table = from_str("flag\nTrue\nFALSE\n").unwrap();
    assert_eq!(table.rows, vec![vec![Value::Bool(true)], vec![Value::Bool(false)]]);
}

#[test]
fn ingest_csv_quoted_fields_with_commas() {
    let table = from_str("name,city\n\"Lovelace, Ada\",London\n").unwrap();
    assert_eq!(table.rows[0][0], Value::Utf8("Lovelace, Ada".to_string()));
}

#[test]
fn ingest_csv_renames_duplicate_and_blank_headers() {
    let table = from_str("a,,a\n1,2,3\n").unwrap();
    assert_eq!(table.columns, vec!["a", "Unnamed: 1", "a.1"]);
}

#[test]
fn ingest_csv_header_only_gives_empty_null_typed_columns() {
    let table = from_str("a,b\n").unwrap();
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 0);
    let schema = Schema::infer(&table);
    assert!(schema.fields.iter().all(|f| f.data_type == DataType::Null));
}

#[test]
fn ingest_csv_errors_on_ragged_rows() {
    let err = from_str("a,b\n1,2\n3\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("csv error"));
}

#[test]
fn ingest_csv_keeps_text_cells_verbatim() {
    let table = from_str("name,note\n  Alice  ,   \n").unwrap();
    assert_eq!(
        table.rows,
        vec![vec![
            Value::Utf8("  Alice  ".to_string()),
            Value::Utf8("   ".to_string()),
        ]]
    );
}

#[test]
fn ingest_csv_padded_numbers_still_parse() {
    let table = from_str("n\n 30 \n25\n").unwrap();
    assert_eq!(table.rows, vec![vec![Value::Int64(30)], vec![Value::Int64(25)]]);
}

#[test]
fn ingest_csv_nan_spellings_become_null_and_compare_equal() {
    let input = "x\n1.5\nNAN\n+nan\n";
    let first = from_str(input).unwrap();
    let second = from_str(input).unwrap();
    assert_eq!(
        first.rows,
        vec![vec![Value::Float64(1.5)], vec![Value::Null], vec![Value::Null]]
    );
    assert_eq!(first, second);
}
