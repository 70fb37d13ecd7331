//! `tabular-ingest` loads CSV, JSON, or XML files into an in-memory [`types::Table`] and reports
//! an inferred type for every column as a [`types::Schema`].
//!
//! The primary entrypoint is [`ingestion::ingest`] (or [`ingestion::ingest_from_path`] with
//! [`ingestion::IngestionOptions`]). The format is chosen from the file extension.
//!
//! ## Formats
//!
//! - **CSV** (`.csv`): first line is the header. Column types are inferred from the cells, so a
//!   column of whole numbers becomes [`types::DataType::Int64`], and so on.
//! - **JSON** (`.json`): an array of objects (one row each) or a single object. Nested objects are
//!   flattened into dotted column names (`{"b": {"c": 2}}` -> `b.c`); arrays are kept as JSON text.
//! - **XML** (`.xml`): each child of the root element is a row; each grandchild is a cell named by
//!   its tag. Cell values are text.
//!
//! For JSON and XML, the columns are the union of keys across records; a record without a key
//! gets [`types::Value::Null`] in that column.
//!
//! ## Types
//!
//! Cells are tagged [`types::Value`]s. A column's [`types::DataType`] is a fold over its values:
//! missing values are ignored, integers mixed with floats widen to `float64`, and any other mix
//! is `utf8`. Labels are `null`, `int64`, `float64`, `bool`, `utf8`.
//!
//! ## Quick example
//!
//! ```no_run
//! use tabular_ingest::ingestion::ingest;
//!
//! # fn main() -> Result<(), tabular_ingest::IngestionError> {
//! let out = ingest("people.csv")?;
//! println!("rows={}", out.table.row_count());
//! for field in &out.schema.fields {
//!     println!("{}: {}", field.name, field.data_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified entrypoints and format-specific implementations
//! - [`types`]: table, value and schema types
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{ErrorKind, IngestionError, IngestionResult};
