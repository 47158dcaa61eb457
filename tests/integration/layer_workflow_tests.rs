/*!
 * Integration tests for second-layer post-processing
 */

use anyhow::Result;
use aegiscript::app_config::Config;
use aegiscript::errors::{AppError, ScriptError};
use aegiscript::layer_duplicator::duplicate_layers;
use aegiscript::{Controller, Outcome};
use crate::common;

fn controller() -> Controller {
    Controller::with_config(Config::default(), common::test_styles())
}

/// Test that assembling N rows then duplicating yields 2N interleaved lines
#[test]
fn test_duplicate_withAssembledScript_shouldInterleaveCopies() -> Result<()> {
    let controller = controller();
    let table = "ab,0:01,One\ncd,0:02,\"Two, still two\"\ndefault,0:03,Three\n";
    let (script, rows) = controller.convert_table(table)?;

    let layered = controller.duplicate_layers(&script)?;
    let events = common::event_lines(&layered.content);

    assert_eq!(layered.duplicated, rows);
    assert_eq!(events.len(), 2 * rows);
    assert_eq!(
        events,
        vec![
            r"Dialogue: 1,00:00:01.00,00:00:01.00,Abby,,0,0,0,,{\bord3\pos(640,650)\3c&H000000&}One",
            r"Dialogue: 2,00:00:01.00,00:00:01.00,Abby,,0,0,0,,{\pos(640,650)}One",
            r"Dialogue: 1,00:00:02.00,00:00:02.00,Cody,,0,0,0,,{\bord1\pos(10,20)\3c&H000000&}Two, still two",
            r"Dialogue: 2,00:00:02.00,00:00:02.00,Cody,,0,0,0,,{\pos(10,20)}Two, still two",
            r"Dialogue: 1,00:00:03.00,00:00:03.00,Main,,0,0,0,,{\bord2\pos(100,200)\3c&H000000&}Three",
            r"Dialogue: 2,00:00:03.00,00:00:03.00,Main,,0,0,0,,{\pos(100,200)}Three",
        ]
    );
    Ok(())
}

/// Test that only the position survives in the copy's override block
#[test]
fn test_duplicate_withRichOverrideBlock_shouldKeepOnlyPosition() -> Result<()> {
    let script = "[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Dialogue: 1,0:00:01.00,0:00:02.00,Main,,0,0,0,,{\\blur2\\fs40\\pos(10,20)\\c&HFF0000&\\an7}Text\n";

    let layered = duplicate_layers(script)?;
    let events = common::event_lines(&layered.content);

    assert_eq!(events.len(), 2);
    assert_eq!(events[1], r"Dialogue: 2,0:00:01.00,0:00:02.00,Main,,0,0,0,,{\pos(10,20)}Text");
    Ok(())
}

/// Test that comments pass through and a blank line ends the section
#[test]
fn test_duplicate_withBlankLine_shouldStopScanning() -> Result<()> {
    let script = "[Script Info]\nTitle: x\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Comment: 1,0:00:00.00,0:00:00.00,Main,,0,0,0,,note\n\
Dialogue: 1,0:00:01.00,0:00:01.00,Main,,0,0,0,,{\\bord2\\pos(1,2)\\3c&H000000&}A\n\
\t \n\
Dialogue: 1,0:00:02.00,0:00:02.00,Main,,0,0,0,,{\\bord2\\pos(1,2)\\3c&H000000&}B\n";

    let layered = duplicate_layers(script)?;

    assert_eq!(layered.duplicated, 1);
    assert_eq!(
        layered.content,
        "[Script Info]\nTitle: x\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Comment: 1,0:00:00.00,0:00:00.00,Main,,0,0,0,,note\n\
Dialogue: 1,0:00:01.00,0:00:01.00,Main,,0,0,0,,{\\bord2\\pos(1,2)\\3c&H000000&}A\n\
Dialogue: 2,0:00:01.00,0:00:01.00,Main,,0,0,0,,{\\pos(1,2)}A\n\
\t \n\
Dialogue: 1,0:00:02.00,0:00:02.00,Main,,0,0,0,,{\\bord2\\pos(1,2)\\3c&H000000&}B\n"
    );
    Ok(())
}

/// Test that the format line below the header is never duplicated
#[test]
fn test_duplicate_withDialogueLookingFormatLine_shouldSkipIt() -> Result<()> {
    let script = "[Events]\nDialogue: 1,a,b,S,,0,0,0,,{\\pos(1,1)\\fs2}skipped\nDialogue: 1,a,b,S,,0,0,0,,x\n";

    let layered = duplicate_layers(script)?;

    assert_eq!(layered.duplicated, 1);
    assert!(layered.content.ends_with("Dialogue: 1,a,b,S,,0,0,0,,x\nDialogue: 2,a,b,S,,0,0,0,,x\n"));
    Ok(())
}

/// Running the pass twice duplicates again; copies are not recognised
#[test]
fn test_duplicate_runTwice_shouldNotBeIdempotent() -> Result<()> {
    let controller = controller();
    let (script, rows) = controller.convert_table("ab,0:01,One\ncd,0:02,Two\n")?;

    let once = duplicate_layers(&script)?;
    let twice = duplicate_layers(&once.content)?;

    assert_eq!(common::event_lines(&once.content).len(), 2 * rows);
    assert_eq!(common::event_lines(&twice.content).len(), 4 * rows);
    assert_ne!(once.content, twice.content);
    Ok(())
}

/// Test the file-level run with the default output name
#[test]
fn test_run_withAssInput_shouldWriteProcessedScript() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller();
    let (script, _) = controller.convert_table(common::DIALOGUE_CSV)?;
    let input = common::create_test_file(temp_dir.path(), "timed.ass", &script)?;

    let outcome = controller.run(&input, None)?;

    let output = temp_dir.path().join("timed_processed.ass");
    assert_eq!(outcome, Outcome::Layered { output: output.clone(), duplicated: 4 });

    let processed = std::fs::read_to_string(&output)?;
    let events = common::event_lines(&processed);
    assert_eq!(events.len(), 9);
    assert!(events[4].starts_with("Comment: 1,"));
    Ok(())
}

/// Test that a script without an events section aborts without output
#[test]
fn test_run_withoutEventsHeader_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "broken.ass", "[Script Info]\nTitle: x\n")?;

    let err = controller().run(&input, None).unwrap_err();

    assert!(matches!(err, AppError::Script(ScriptError::MissingEventsHeader)));
    assert!(!temp_dir.path().join("broken_processed.ass").exists());
    Ok(())
}
