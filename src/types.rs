//! Core data model types for ingestion.
//!
//! Ingestion produces a [`Table`] of tagged [`Value`]s, and a [`Schema`] derived from it (a list
//! of typed [`Field`]s, one per column). The two are returned together as [`Ingested`].

use std::fmt;

use serde::Serialize;

/// Logical data type inferred for a column.
///
/// The serialized and displayed labels are stable: `null`, `int64`, `float64`, `bool`, `utf8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Column holds no values at all (every cell missing, or no rows).
    Null,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string. Also used for columns mixing incompatible types.
    Utf8,
}

impl DataType {
    /// Stable label for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
        }
    }

    /// The type of a single value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Int64(_) => Self::Int64,
            Value::Float64(_) => Self::Float64,
            Value::Bool(_) => Self::Bool,
            Value::Utf8(_) => Self::Utf8,
        }
    }

    /// Smallest type able to describe both `self` and `other`.
    ///
    /// `Null` is the identity, `Int64` and `Float64` widen to `Float64`, and every other mix
    /// falls back to `Utf8`. The operation is commutative and associative, so folding a column in
    /// any order gives the same answer.
    pub fn unify(self, other: Self) -> Self {
        match (self, other) {
            (Self::Null, t) | (t, Self::Null) => t,
            (a, b) if a == b => a,
            (Self::Int64, Self::Float64) | (Self::Float64, Self::Int64) => Self::Float64,
            _ => Self::Utf8,
        }
    }

    /// Infer the type of a column from its values.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        values
            .into_iter()
            .fold(Self::Null, |acc, v| acc.unify(Self::of(v)))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Column name -> inferred type, in table column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Derive a schema from a table: one field per column, in column order.
    pub fn infer(table: &Table) -> Self {
        let fields = table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| Field::new(name.clone(), DataType::infer(table.column_values(idx))))
            .collect();
        Self { fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the data type of a field by name, if present.
    pub fn data_type_of(&self, name: &str) -> Option<DataType> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.data_type)
    }
}

/// A single typed value in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Whether this is the missing marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Build a text value.
    pub fn utf8(s: impl Into<String>) -> Self {
        Self::Utf8(s.into())
    }
}

/// In-memory tabular data.
///
/// Rows are stored as `Vec<Vec<Value>>`; every row has exactly one value per entry of
/// [`Table::columns`], in the same order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Unique column names in order.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and rows.
    ///
    /// # Panics
    ///
    /// Panics if a row's length differs from the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        for (idx, row) in rows.iter().enumerate() {
            assert!(
                row.len() == width,
                "row {idx} has {} values but table has {width} columns",
                row.len()
            );
        }
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the values of column `idx`, top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Look up one cell by row number and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }
}

/// Result of a successful ingestion: the parsed table and its inferred schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    /// Parsed data.
    pub table: Table,
    /// One entry per table column, same order.
    pub schema: Schema,
}

impl Ingested {
    /// Pair a table with the schema inferred from it.
    pub fn from_table(table: Table) -> Self {
        let schema = Schema::infer(&table);
        Self { table, schema }
    }
}
