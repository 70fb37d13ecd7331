//! XML ingestion implementation.
//!
//! The document is read as a two-level record list:
//!
//! ```xml
//! <root>
//!   <item><x>1</x><y>hi</y></item>   <!-- record 1: x="1", y="hi" -->
//!   <item><x>2</x></item>            <!-- record 2: x="2", y missing -->
//! </root>
//! ```
//!
//! Every direct child of the root element is a record and every direct child of a record is a
//! field named by its tag. A field's value is the text it holds before its first child element
//! (entities unescaped, CDATA included, whitespace kept). A field with no text is missing.
//! Values are always [`Value::Utf8`]. If a tag repeats inside one record the later value wins.
//! Record attributes, record text, comments and processing instructions are ignored.

use std::io::BufRead;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Table, Value};

use super::IngestionFormat;
use super::records::{FlatRecord, table_from_records};

/// Ingest an XML file into an in-memory [`Table`].
pub fn ingest_xml_from_path(path: impl AsRef<Path>) -> IngestionResult<Table> {
    let mut reader = Reader::from_file(path)?;
    ingest_xml_from_reader(&mut reader)
}

/// Ingest XML from an in-memory string into a [`Table`].
pub fn ingest_xml_from_str(input: &str) -> IngestionResult<Table> {
    let mut reader = Reader::from_reader(input.as_bytes());
    ingest_xml_from_reader(&mut reader)
}

/// A field element currently open at depth 3.
struct OpenField {
    tag: String,
    text: Option<String>,
    /// Cleared once the field's first child element starts.
    collecting: bool,
}

impl OpenField {
    fn push_text(&mut self, s: &str) {
        if self.collecting {
            self.text.get_or_insert_with(String::new).push_str(s);
        }
    }
}

/// Ingest XML from an existing `quick_xml` reader.
///
/// Column names are the tags exactly as written in the document. Namespaces are not resolved:
/// `<p:v xmlns:p="urn:x">` yields column `p:v`, never the `{urn:x}v` form.
pub fn ingest_xml_from_reader<R: BufRead>(reader: &mut Reader<R>) -> IngestionResult<Table> {
    reader.trim_text(false);
    reader.check_end_names(true);

    let mut buf = Vec::new();
    let mut depth: usize = 0;
    let mut seen_root = false;
    let mut records: Vec<FlatRecord> = Vec::new();
    let mut field: Option<OpenField> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                open_element(depth, tag, &mut seen_root, &mut records, &mut field, false)?;
                depth += 1;
            }
            Event::Empty(e) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                open_element(depth, tag, &mut seen_root, &mut records, &mut field, true)?;
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    IngestionError::malformed(IngestionFormat::Xml, "unexpected closing tag")
                })?;
                if depth == 2 {
                    if let (Some(f), Some(record)) = (field.take(), records.last_mut()) {
                        record.insert(f.tag, f.text.map_or(Value::Null, Value::Utf8));
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(IngestionError::malformed(
                        IngestionFormat::Xml,
                        "text outside the root element",
                    ));
                }
                if depth == 3 {
                    if let Some(f) = field.as_mut() {
                        f.push_text(&text);
                    }
                }
            }
            Event::CData(c) => {
                if depth == 0 {
                    return Err(IngestionError::malformed(
                        IngestionFormat::Xml,
                        "CDATA outside the root element",
                    ));
                }
                if depth == 3 {
                    let bytes = c.into_inner();
                    let text = reader.decoder().decode(&bytes)?;
                    if let Some(f) = field.as_mut() {
                        f.push_text(&text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(IngestionError::malformed(
            IngestionFormat::Xml,
            format!("document ended with {depth} unclosed element(s)"),
        ));
    }
    if !seen_root {
        return Err(IngestionError::malformed(IngestionFormat::Xml, "no root element"));
    }

    Ok(table_from_records(records))
}

/// Handle a start (or self-closing) tag found at `depth`.
fn open_element(
    depth: usize,
    tag: String,
    seen_root: &mut bool,
    records: &mut Vec<FlatRecord>,
    field: &mut Option<OpenField>,
    self_closing: bool,
) -> IngestionResult<()> {
    match depth {
        0 => {
            if *seen_root {
                return Err(IngestionError::malformed(
                    IngestionFormat::Xml,
                    format!("more than one root element (second is <{tag}>)"),
                ));
            }
            *seen_root = true;
        }
        1 => records.push(FlatRecord::new()),
        2 if self_closing => {
            if let Some(record) = records.last_mut() {
                record.insert(tag, Value::Null);
            }
        }
        2 => {
            *field = Some(OpenField {
                tag,
                text: None,
                collecting: true,
            });
        }
        3 => {
            if let Some(f) = field.as_mut() {
                f.collecting = false;
            }
        }
        _ => {}
    }
    Ok(())
}
