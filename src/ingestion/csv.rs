//! CSV ingestion implementation.

use std::collections::HashSet;
use std::path::Path;

use crate::error::IngestionResult;
use crate::types::{DataType, Table, Value};

/// Cell contents treated as missing, in addition to empty cells. Matched exactly.
pub const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The first record is the header. Empty header cells become `Unnamed: <index>` and repeated
///   names get `.1`, `.2`, ... suffixes so column names stay unique.
/// - Every record must have as many fields as the header.
/// - Each column's type is inferred from all of its cells (see [`infer_column_type`]) and every
///   cell is converted to that type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Table> {
    let headers = rdr.headers()?.clone();
    let columns = unique_column_names(headers.iter());

    // Column-major so each column can be typed as a whole.
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); columns.len()];
    for result in rdr.records() {
        let record = result?;
        for (cells, cell) in raw.iter_mut().zip(record.iter()) {
            cells.push(cell.to_owned());
        }
    }

    let row_count = raw.first().map_or(0, Vec::len);
    let mut rows: Vec<Vec<Value>> = (0..row_count)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for cells in &raw {
        let data_type = infer_column_type(cells.iter().map(String::as_str));
        for (row, cell) in rows.iter_mut().zip(cells) {
            row.push(convert_cell(data_type, cell));
        }
    }

    Ok(Table::new(columns, rows))
}

/// Infer the type of a CSV column from its raw cells.
///
/// Missing cells are ignored. Surrounding whitespace is ignored when testing whether a cell
/// parses. If every remaining cell parses as `i64` the column is `Int64`, otherwise if every cell
/// parses as `f64` it is `Float64`, otherwise if every cell is `true`/`false` (any case) it is
/// `Bool`. Anything else is `Utf8`; a column with no values at all is `Null`.
pub fn infer_column_type<'a>(cells: impl IntoIterator<Item = &'a str>) -> DataType {
    let mut seen = false;
    let (mut all_int, mut all_float, mut all_bool) = (true, true, true);
    for cell in cells {
        if is_missing(cell) {
            continue;
        }
        seen = true;
        let cell = cell.trim();
        all_int = all_int && cell.parse::<i64>().is_ok();
        all_float = all_float && cell.parse::<f64>().is_ok();
        all_bool = all_bool && parse_bool(cell).is_some();
        if !(all_int || all_float || all_bool) {
            return DataType::Utf8;
        }
    }

    if !seen {
        DataType::Null
    } else if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else if all_bool {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

/// Whether a raw cell denotes a missing value: exactly empty, or one of [`MISSING_TOKENS`].
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

fn convert_cell(data_type: DataType, raw: &str) -> Value {
    if is_missing(raw) {
        return Value::Null;
    }

    // The column type was chosen so that every non-missing cell parses. Text is kept verbatim.
    let trimmed = raw.trim();
    match data_type {
        DataType::Null => Value::Null,
        DataType::Int64 => trimmed.parse().map_or(Value::Null, Value::Int64),
        // Any NaN spelling (`NAN`, `+nan`, ...) is a missing value, never `Float64(NaN)`.
        DataType::Float64 => match trimmed.parse::<f64>() {
            Ok(v) if !v.is_nan() => Value::Float64(v),
            _ => Value::Null,
        },
        DataType::Bool => parse_bool(trimmed).map_or(Value::Null, Value::Bool),
        DataType::Utf8 => Value::Utf8(raw.to_owned()),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn unique_column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<String> = headers
        .enumerate()
        .map(|(idx, h)| {
            if h.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                h.to_owned()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
