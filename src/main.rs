// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use aegiscript::app_config::{self, Config};
use aegiscript::file_utils::FileManager;
use aegiscript::{Controller, Outcome};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for aegiscript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// aegiscript - dialogue tables to Aegisub scripts
///
/// Converts a `tag,timestamp,text` table into an .ass script, or adds a
/// second text layer to every dialogue line of an existing .ass script.
#[derive(Parser, Debug)]
#[command(name = "aegiscript")]
#[command(version)]
#[command(about = "Dialogue table to Aegisub script converter")]
#[command(long_about = "aegiscript converts dialogue tables into Aegisub (.ass) scripts and post-processes scripts with a second text layer.

The input extension selects the pipeline:
    .csv    convert the table into <name>_out.ass
    .ass    duplicate dialogue lines onto layer 2 into <name>_processed.ass

EXAMPLES:
    aegiscript lines.csv                       # Convert using ./styles.json
    aegiscript lines.csv episode1.ass          # Choose the output file
    aegiscript -s show_styles.json lines.csv   # Use another style table
    aegiscript timed.ass                       # Add the second layer
    aegiscript                                 # Pick the input interactively
    aegiscript completions bash > aegiscript.bash

CONFIGURATION:
    Settings are read from conf.json (see --config); a default file is written
    when it does not exist. Keys: styles_path, delimiter, comment_tag,
    outline_colour, template and log_level.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .csv dialogue table or .ass script
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output .ass file
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Path to the JSON style table
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Configuration file path, created with defaults if missing
    #[arg(short, long = "config", value_name = "CONFIG_PATH", default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Field delimiter of the dialogue table (a single character, or \t for tab)
    #[arg(short, long, value_parser = app_config::parse_delimiter)]
    delimiter: Option<char>,

    /// Emit every row as dialogue, even rows carrying the comment tag
    #[arg(long)]
    no_comments: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself lets everything through; set_max_level filters
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and marker for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", ""),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {}{}\x1B[0m",
                colour, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "aegiscript", &mut std::io::stdout());
        return Ok(());
    }

    run(cli)
}

fn run(options: CommandLineOptions) -> Result<()> {
    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let input_path = match options.input_path {
        Some(path) => path,
        None => pick_input_file(Path::new("."))?,
    };

    let controller = Controller::from_config(config)?;
    debug!("Using {} style(s)", controller.styles().len());

    match controller.run(&input_path, options.output_path)? {
        Outcome::Converted { events, .. } => debug!("Converted {} row(s)", events),
        Outcome::Layered { duplicated, .. } => debug!("Added {} second-layer line(s)", duplicated),
        Outcome::Skipped { .. } => {}
    }

    Ok(())
}

/// Load (or create) the configuration file and apply command line overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(style) = &options.style {
        config.styles_path = style.clone();
    }

    if let Some(delimiter) = options.delimiter {
        config.delimiter = delimiter;
    }

    if options.no_comments {
        config.comment_tag = None;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Let the user choose a dialogue table or script from `dir`
fn pick_input_file(dir: &Path) -> Result<PathBuf> {
    let candidates = FileManager::find_candidates(dir)?;
    if candidates.is_empty() {
        return Err(anyhow!("No .csv or .ass files found in {:?} and no INPUT_PATH given", dir));
    }

    let labels: Vec<String> = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    let selection = dialoguer::Select::new()
        .with_prompt("Input file")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Failed to show selection dialog")?;

    match selection {
        Some(index) => {
            info!("Selected {}", labels[index]);
            Ok(candidates[index].clone())
        }
        None => Err(anyhow!("No input file selected")),
    }
}
