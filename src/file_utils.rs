use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extension of dialogue tables
pub const TABLE_EXTENSION: &str = "csv";

/// Extension of subtitle scripts
pub const SCRIPT_EXTENSION: &str = "ass";

/// Enum representing the input kinds this tool accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Delimited dialogue table, converted into a script
    DialogueTable,
    /// Assembled script, post-processed with a second layer
    Script,
    /// Anything else, with the extension that was found
    Unknown(String),
}

impl InputKind {
    /// Suffix appended to the input stem when no output path is given
    pub fn output_suffix(&self) -> Option<&'static str> {
        match self {
            InputKind::DialogueTable => Some("_out"),
            InputKind::Script => Some("_processed"),
            InputKind::Unknown(_) => None,
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Classify an input file by its extension (case-sensitive, like the
    /// pipelines' own naming)
    pub fn detect_input_kind<P: AsRef<Path>>(path: P) -> InputKind {
        let ext = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();

        match ext.as_str() {
            TABLE_EXTENSION => InputKind::DialogueTable,
            SCRIPT_EXTENSION => InputKind::Script,
            _ => InputKind::Unknown(ext),
        }
    }

    // @generates: Output path next to the input file
    // @returns: `<stem>_out.ass` for tables, `<stem>_processed.ass` for scripts
    pub fn default_output_path<P: AsRef<Path>>(input_file: P, kind: &InputKind) -> Option<PathBuf> {
        let input_file = input_file.as_ref();
        let suffix = kind.output_suffix()?;

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(SCRIPT_EXTENSION);

        Some(input_file.with_file_name(output_filename))
    }

    /// Find dialogue tables and scripts directly inside `dir`, sorted by name
    pub fn find_candidates<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && !matches!(Self::detect_input_kind(path), InputKind::Unknown(_)) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
