//! Assemble a [`Table`] from flat per-record mappings.
//!
//! JSON and XML ingestion both reduce their input to a list of [`FlatRecord`]s. The table's
//! columns are the union of keys in first-seen order; a record lacking a key contributes
//! [`Value::Null`] for that column.

use indexmap::{IndexMap, IndexSet};

use crate::types::{Table, Value};

/// One record: column name -> value, in insertion order.
///
/// Inserting an existing key replaces the value but keeps the key's original position.
pub type FlatRecord = IndexMap<String, Value>;

/// Build a rectangular table from records.
pub fn table_from_records(records: Vec<FlatRecord>) -> Table {
    let mut columns: IndexSet<String> = IndexSet::new();
    for record in &records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.insert(key.clone());
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|mut record| {
            columns
                .iter()
                .map(|c| record.swap_remove(c).unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Table::new(columns.into_iter().collect(), rows)
}
