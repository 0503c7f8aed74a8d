//! CSV encoding of the client table.
//!
//! Files are UTF-8 with a leading byte-order mark, comma-delimited, with a
//! header row of column labels. On read the BOM is optional, header order
//! does not matter, and unrecognized headers are ignored.

use clientdesk_core::client::ClientRecord;
use clientdesk_core::columns::{Column, RawRow};
use clientdesk_core::normalize::encode_row;

use crate::error::StoreError;

/// UTF-8 byte-order mark written at the start of every table.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A decoded table before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Recognized columns present in the header, in header order.
    pub columns: Vec<Column>,
    /// Headers that did not match any recognized column.
    pub ignored_headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }
}

/// Parse table bytes into raw rows.
///
/// Rows shorter than the header are allowed (the missing cells are
/// absent); rows longer than the header are rejected.
pub fn decode_table(bytes: &[u8]) -> Result<Table, StoreError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| StoreError::Parse(format!("header: {e}")))?
        .clone();

    let mapping: Vec<Option<Column>> = headers.iter().map(Column::parse).collect();

    let mut table = Table::default();
    for (header, column) in headers.iter().zip(&mapping) {
        match column {
            Some(c) if !table.columns.contains(c) => table.columns.push(*c),
            Some(_) => {}
            None if header.trim().is_empty() => {}
            None => table.ignored_headers.push(header.to_string()),
        }
    }

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let record = result.map_err(|e| StoreError::Parse(format!("line {line}: {e}")))?;
        if record.len() > headers.len() {
            return Err(StoreError::Parse(format!(
                "line {line}: expected at most {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }
        let row: RawRow = mapping
            .iter()
            .zip(record.iter())
            .filter_map(|(column, value)| column.map(|c| (c, value.to_string())))
            .collect();
        table.rows.push(row);
    }

    Ok(table)
}

/// Serialize records, with the derived progress column, into table bytes.
pub fn encode_table(records: &[ClientRecord]) -> Result<Vec<u8>, StoreError> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer
            .write_record(Column::ALL.iter().map(Column::header))
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        for record in records {
            let row = encode_row(record);
            writer
                .write_record(
                    Column::ALL
                        .iter()
                        .map(|c| row.get(c).map(String::as_str).unwrap_or("")),
                )
                .map_err(|e| StoreError::Encode(e.to_string()))?;
        }
        writer.flush()?;
    }
    Ok(buf)
}
