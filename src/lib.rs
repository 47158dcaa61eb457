/*!
 * # aegiscript - dialogue tables to Aegisub scripts
 *
 * A Rust library for turning a timestamped dialogue table into an `.ass`
 * (Advanced SubStation Alpha) script, and for adding a second rendering layer
 * to an existing script.
 *
 * ## Features
 *
 * - Convert `tag,timestamp,text` rows into `Dialogue:`/`Comment:` events
 * - Per-tag styles from a JSON style table, with a `default` fallback
 * - Configurable delimiter, comment tag, outline colour and script template
 * - Duplicate each dialogue line onto layer 2, keeping only its `\pos`
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Run configuration
 * - `style_table`: Style records keyed by row tag
 * - `timestamp`: `MM:SS` / `HH:MM:SS` parsing
 * - `dialogue_table`: Delimited row reading
 * - `row_converter`: Row → event line conversion
 * - `override_block`: Parsing and rewriting of `{\...}` blocks
 * - `script_assembler`: Template filling
 * - `layer_duplicator`: Second-layer post-processing
 * - `file_utils`: File system operations
 * - `app_controller`: Pipeline selection and I/O
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod style_table;
pub mod timestamp;
pub mod dialogue_table;
pub mod row_converter;
pub mod override_block;
pub mod script_assembler;
pub mod layer_duplicator;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, Outcome};
pub use style_table::{StyleRecord, StyleTable};
pub use timestamp::{EventTime, Timestamp};
pub use dialogue_table::DialogueRow;
pub use row_converter::{RowConverter, ScriptLine};
pub use layer_duplicator::{duplicate_layers, LayeredScript};
pub use errors::{AppError, ScriptError, StyleError, TableError, TimestampError};
