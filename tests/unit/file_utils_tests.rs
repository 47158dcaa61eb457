/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use aegiscript::file_utils::{FileManager, InputKind};
use crate::common;

/// Test that the extension selects the pipeline
#[test]
fn test_detect_input_kind_withKnownExtensions_shouldClassify() {
    assert_eq!(FileManager::detect_input_kind("lines.csv"), InputKind::DialogueTable);
    assert_eq!(FileManager::detect_input_kind("/tmp/ep1.ass"), InputKind::Script);
    assert_eq!(FileManager::detect_input_kind("notes.txt"), InputKind::Unknown("txt".to_string()));
    assert_eq!(FileManager::detect_input_kind("noext"), InputKind::Unknown(String::new()));
}

/// Test the default output names next to the input
#[test]
fn test_default_output_path_withEachKind_shouldAppendSuffix() {
    let table = FileManager::default_output_path("/work/lines.csv", &InputKind::DialogueTable);
    assert_eq!(table.as_deref(), Some(Path::new("/work/lines_out.ass")));

    let script = FileManager::default_output_path("/work/timed.ass", &InputKind::Script);
    assert_eq!(script.as_deref(), Some(Path::new("/work/timed_processed.ass")));

    assert!(FileManager::default_output_path("a.txt", &InputKind::Unknown("txt".to_string())).is_none());
}

/// Test that the picker only lists tables and scripts
#[test]
fn test_find_candidates_withMixedFiles_shouldListTablesAndScripts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.ass", "")?;
    common::create_test_file(temp_dir.path(), "a.csv", "")?;
    common::create_test_file(temp_dir.path(), "styles.json", "{}")?;
    fs::create_dir(temp_dir.path().join("nested.csv"))?;

    let candidates = FileManager::find_candidates(temp_dir.path())?;
    let names: Vec<String> = candidates
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.csv", "b.ass"]);
    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("script.ass");

    FileManager::write_to_file(&target, "content")?;

    assert!(FileManager::file_exists(&target));
    assert_eq!(FileManager::read_to_string(&target)?, "content");
    Ok(())
}

/// Test that reading a missing file names the path
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    let err = FileManager::read_to_string("definitely_missing_12345.csv").unwrap_err();
    assert!(format!("{:#}", err).contains("definitely_missing_12345.csv"));
}
