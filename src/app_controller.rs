use log::{error, info, debug};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::dialogue_table;
use crate::errors::{AppError, StyleError};
use crate::file_utils::{FileManager, InputKind};
use crate::layer_duplicator;
use crate::row_converter::RowConverter;
use crate::script_assembler;
use crate::style_table::StyleTable;

// @module: Application controller for script generation

/// What a run did with its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A dialogue table was converted into a new script
    Converted {
        output: PathBuf,
        events: usize,
    },
    /// A script received second-layer copies
    Layered {
        output: PathBuf,
        duplicated: usize,
    },
    /// The input extension is not handled; nothing was written
    Skipped {
        extension: String,
    },
}

/// Main application controller; owns the run configuration and style table
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Loaded once, read-only afterwards
    styles: StyleTable,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, styles: StyleTable) -> Self {
        Self { config, styles }
    }

    /// Load the style table named by the configuration and build a controller
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let styles = StyleTable::load(&config.styles_path).map_err(|e| match e.downcast::<StyleError>() {
            Ok(style_error) => AppError::Style(style_error),
            Err(e) => file_error(e),
        })?;
        Ok(Self::with_config(config, styles))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Run the pipeline selected by the input's extension
    pub fn run(&self, input_file: &Path, output_file: Option<PathBuf>) -> Result<Outcome, AppError> {
        let start_time = std::time::Instant::now();
        let kind = FileManager::detect_input_kind(input_file);

        let output_file = match (&kind, output_file) {
            (InputKind::Unknown(ext), _) => {
                error!("Input file format .{} is not recognized!", ext);
                return Ok(Outcome::Skipped { extension: ext.clone() });
            }
            (_, Some(output_file)) => output_file,
            (kind, None) => FileManager::default_output_path(input_file, kind)
                .ok_or_else(|| AppError::File(format!("Cannot derive output path for {:?}", input_file)))?,
        };

        let content = FileManager::read_to_string(input_file).map_err(file_error)?;

        let outcome = match kind {
            InputKind::DialogueTable => {
                let (script, events) = self.convert_table(&content)?;
                FileManager::write_to_file(&output_file, &script).map_err(file_error)?;
                info!("Successfully wrote Aegisub file to {}", output_file.display());
                Outcome::Converted { output: output_file, events }
            }
            InputKind::Script => {
                let layered = self.duplicate_layers(&content)?;
                FileManager::write_to_file(&output_file, &layered.content).map_err(file_error)?;
                info!("Successfully wrote Aegisub file to {}", output_file.display());
                Outcome::Layered { output: output_file, duplicated: layered.duplicated }
            }
            InputKind::Unknown(extension) => Outcome::Skipped { extension },
        };

        debug!("Finished in {}", Self::format_duration(start_time.elapsed()));
        Ok(outcome)
    }

    /// Convert dialogue table text into a complete script.
    ///
    /// Returns the script and the number of event lines it holds.
    pub fn convert_table(&self, content: &str) -> Result<(String, usize), AppError> {
        let rows = dialogue_table::parse_rows(content, self.config.delimiter)?;
        debug!("Read {} row(s) from dialogue table", rows.len());

        let converter = RowConverter::new(&self.styles, &self.config);
        let lines = converter.convert_all(&rows)?;

        let fallbacks = lines.iter().filter(|line| line.start.is_fallback()).count();
        if fallbacks > 0 {
            info!("{} row(s) were placed at 0:00:00.00 because of unreadable timestamps", fallbacks);
        }

        let script = script_assembler::assemble_script(&self.config.template, &self.styles, &lines)?;
        Ok((script, lines.len()))
    }

    /// Add second-layer copies to script text
    pub fn duplicate_layers(&self, content: &str) -> Result<layer_duplicator::LayeredScript, AppError> {
        let layered = layer_duplicator::duplicate_layers(content)?;
        debug!("Duplicated {} dialogue line(s)", layered.duplicated);
        Ok(layered)
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let millis = duration.as_millis();
        if millis < 1000 {
            format!("{}ms", millis)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}

fn file_error(error: anyhow::Error) -> AppError {
    AppError::File(format!("{:#}", error))
}
