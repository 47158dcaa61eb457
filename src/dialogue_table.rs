use std::io::Read;
use log::trace;
use crate::errors::TableError;

// @module: Delimited dialogue table reader

// @struct: One row of the dialogue table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueRow {
    // @field: 1-based record number, for diagnostics
    pub row_number: usize,

    // @field: Style/speaker tag
    pub tag: String,

    // @field: Raw `MM:SS` or `HH:MM:SS` text
    pub timestamp: String,

    // @field: Dialogue text
    pub text: String,
}

impl DialogueRow {
    pub fn new(row_number: usize, tag: &str, timestamp: &str, text: &str) -> Self {
        DialogueRow {
            row_number,
            tag: tag.to_string(),
            timestamp: timestamp.to_string(),
            text: text.to_string(),
        }
    }
}

impl std::fmt::Display for DialogueRow {
    /// Row as it appeared in the table, for log messages
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{},{}", self.tag, self.timestamp, self.text)
    }
}

/// Read every row of a delimited table.
///
/// There is no header row, records may have any length of at least three
/// fields (extra fields are ignored), and blank lines are skipped.
pub fn read_rows<R: Read>(reader: R, delimiter: char) -> Result<Vec<DialogueRow>, TableError> {
    if !delimiter.is_ascii() {
        return Err(TableError::Delimiter(delimiter));
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| TableError::Read(e.to_string()))?;
        let row_number = index + 1;

        if record.len() < 3 {
            return Err(TableError::ShortRow {
                row: row_number,
                found: record.len(),
            });
        }

        let row = DialogueRow::new(row_number, &record[0], &record[1], &record[2]);
        trace!("Read row {}: {}", row_number, row);
        rows.push(row);
    }

    Ok(rows)
}

/// Read rows from in-memory text
pub fn parse_rows(content: &str, delimiter: char) -> Result<Vec<DialogueRow>, TableError> {
    read_rows(content.as_bytes(), delimiter)
}
