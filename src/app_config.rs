use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the run configuration: where the style table lives,
/// how the dialogue table is delimited, and the script template.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path to the JSON style table
    #[serde(default = "default_styles_path")]
    pub styles_path: PathBuf,

    /// Field delimiter of the dialogue table
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Rows carrying this tag become `Comment:` events; `null` disables comments
    #[serde(default = "default_comment_tag")]
    pub comment_tag: Option<String>,

    /// Colour written into the `\3c` override of every dialogue line
    #[serde(default = "default_outline_colour")]
    pub outline_colour: String,

    /// Script template with `{styles}` and `{events}` placeholders
    #[serde(default = "default_template")]
    pub template: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Placeholder replaced by the `Style:` lines
pub const STYLES_PLACEHOLDER: &str = "{styles}";

/// Placeholder replaced by the event lines
pub const EVENTS_PLACEHOLDER: &str = "{events}";

/// Built-in Aegisub script template
pub const DEFAULT_TEMPLATE: &str = "[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
{styles}

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
{events}";

fn default_styles_path() -> PathBuf {
    PathBuf::from("styles.json")
}

fn default_delimiter() -> char {
    ','
}

fn default_comment_tag() -> Option<String> {
    Some("comm".to_string())
}

fn default_outline_colour() -> String {
    "&H000000&".to_string()
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

/// Parse a delimiter given on the command line.
///
/// Accepts a single character, or the escapes `\t`, `tab`, `\\` for
/// delimiters that are awkward to type in a shell.
pub fn parse_delimiter(text: &str) -> Result<char, String> {
    match text {
        "\\t" | "tab" | "TAB" => return Ok('\t'),
        "\\\\" => return Ok('\\'),
        _ => {}
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(format!("expected a single character or \\t, got '{}'", text)),
    }
}

impl Config {

    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.template.contains(STYLES_PLACEHOLDER) {
            return Err(anyhow!("Template is missing the {} placeholder", STYLES_PLACEHOLDER));
        }
        if !self.template.contains(EVENTS_PLACEHOLDER) {
            return Err(anyhow!("Template is missing the {} placeholder", EVENTS_PLACEHOLDER));
        }

        // The table reader works on single bytes
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(anyhow!("Unsupported delimiter: {:?}", self.delimiter));
        }

        if let Some(tag) = &self.comment_tag {
            if tag.is_empty() {
                return Err(anyhow!("Comment tag must not be empty, use null to disable comments"));
            }
        }

        Ok(())
    }

    /// Whether rows with `tag` are emitted as comments
    pub fn is_comment_tag(&self, tag: &str) -> bool {
        self.comment_tag.as_deref() == Some(tag)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            styles_path: default_styles_path(),
            delimiter: default_delimiter(),
            comment_tag: default_comment_tag(),
            outline_colour: default_outline_colour(),
            template: default_template(),
            log_level: LogLevel::default(),
        }
    }
}
