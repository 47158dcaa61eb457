/*!
 * Error types for the aegiscript application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when parsing a dialogue timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The text has neither one nor two colon separators
    #[error("Timestamp '{text}' has {colons} colon(s), expected 1 (MM:SS) or 2 (HH:MM:SS)")]
    FieldCount {
        text: String,
        colons: usize,
    },

    /// A field is empty, too long or not made of digits
    #[error("Timestamp '{text}' has a non-numeric {field} field")]
    NotANumber {
        text: String,
        field: &'static str,
    },

    /// A field parsed but is outside its clock range
    #[error("Timestamp '{text}' has {field} {value}, maximum is {max}")]
    OutOfRange {
        text: String,
        field: &'static str,
        value: u32,
        max: u32,
    },
}

/// Errors that can occur when loading or querying the style table
#[derive(Error, Debug)]
pub enum StyleError {
    /// The mandatory fallback style is not defined
    #[error("Style table has no \"default\" entry")]
    MissingDefault,

    /// A style record does not have the fixed number of fields
    #[error("Style '{tag}' has {found} fields, expected {expected}")]
    WrongFieldCount {
        tag: String,
        expected: usize,
        found: usize,
    },

    /// The style file is not valid JSON of the expected shape
    #[error("Failed to parse style table: {0}")]
    Parse(String),

    /// A tag could not be resolved, not even through the fallback
    #[error("No style found for tag '{0}'")]
    UnknownTag(String),
}

/// Errors that can occur while reading the dialogue table
#[derive(Error, Debug)]
pub enum TableError {
    /// A row carries fewer than the three required fields
    #[error("Row {row} has {found} field(s), expected at least 3 (tag, timestamp, text)")]
    ShortRow {
        row: usize,
        found: usize,
    },

    /// The configured delimiter cannot be used for delimited input
    #[error("Unsupported delimiter: {0:?}")]
    Delimiter(char),

    /// The underlying reader failed
    #[error("Failed to read dialogue table: {0}")]
    Read(String),
}

/// Errors that can occur while assembling or post-processing a script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The script has no `[Events]` section
    #[error("Script has no [Events] section header")]
    MissingEventsHeader,

    /// The template lacks one of its substitution points
    #[error("Template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the style table
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    /// Error from the dialogue table
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Error from script assembly or layer duplication
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
