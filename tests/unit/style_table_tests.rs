/*!
 * Tests for style table loading and lookup
 */

use anyhow::Result;
use aegiscript::style_table::{StyleTable, StyleValue, DEFAULT_TAG};
use aegiscript::errors::StyleError;
use crate::common;

/// Test loading from disk keeps file order
#[test]
fn test_load_withValidFile_shouldKeepFileOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "styles.json", common::STYLES_JSON)?;

    let table = StyleTable::load(&path)?;

    assert_eq!(table.len(), 3);
    assert_eq!(table.tags().collect::<Vec<_>>(), vec![DEFAULT_TAG, "ab", "cd"]);
    let names: Vec<&str> = table.records().map(|record| record.name.as_str()).collect();
    assert_eq!(names, vec!["Main", "Abby", "Cody"]);
    Ok(())
}

/// Test that style lines follow table order and drop the override fields
#[test]
fn test_style_lines_withTestTable_shouldRenderEveryRecord() {
    let table = common::test_styles();
    let lines = table.style_lines();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "Style: Abby,Verdana,44,&H00FFE0E0,&H000000FF,&H00000000,&H00000000,-1,0,0,0,100,100,0,0,1,3,0,2,10,10,10,1"
    );
    assert!(lines.iter().all(|line| !line.contains("640,650")));
}

/// Test that the override fields are kept on the record
#[test]
fn test_record_withTaggedStyle_shouldExposePositionAndBorder() {
    let table = common::test_styles();
    let record = table.get("ab").unwrap();

    assert_eq!(record.position, StyleValue::from("640,650"));
    assert_eq!(record.border, StyleValue::from(3i64));
    assert_eq!(record.border.to_string(), "3");
}

/// Test fallback for unknown tags
#[test]
fn test_resolve_withUnknownTag_shouldUseDefault() {
    let table = common::test_styles();
    assert_eq!(table.resolve("nobody").unwrap().name, "Main");
    assert_eq!(table.resolve("").unwrap().name, "Main");
    assert_eq!(table.resolve("cd").unwrap().name, "Cody");
}

/// Test that a table without the fallback style is rejected
#[test]
fn test_from_json_str_withoutDefault_shouldFail() {
    let json = common::STYLES_JSON.replacen("\"default\"", "\"main\"", 1);
    assert!(matches!(StyleTable::from_json_str(&json), Err(StyleError::MissingDefault)));
}

/// Test that a missing file is reported with its path
#[test]
fn test_load_withMissingFile_shouldFail() {
    let err = StyleTable::load("no_such_styles_12345.json").unwrap_err();
    assert!(format!("{:#}", err).contains("no_such_styles_12345.json"));
}

/// Test that nested values are not accepted as style fields
#[test]
fn test_from_json_str_withNestedValue_shouldFail() {
    let json = r#"{"default": [[1], 2, "Main", "Arial", 48, "a", "b", "c", "d", 0, 0, 0, 0, 100, 100, 0, 0, 1, 2, 0, 2, 10, 10, 10, 1]}"#;
    assert!(matches!(StyleTable::from_json_str(json), Err(StyleError::Parse(_))));
}
