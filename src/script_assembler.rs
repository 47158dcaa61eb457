use log::debug;
use crate::app_config::{EVENTS_PLACEHOLDER, STYLES_PLACEHOLDER};
use crate::errors::ScriptError;
use crate::row_converter::ScriptLine;
use crate::style_table::StyleTable;

// @module: Fills the script template

/// Substitute style and event lines into `template`.
///
/// Both lists are joined with newlines in the order given.
pub fn assemble<S, E>(template: &str, style_lines: &[S], event_lines: &[E]) -> Result<String, ScriptError>
where
    S: AsRef<str>,
    E: AsRef<str>,
{
    if !template.contains(STYLES_PLACEHOLDER) {
        return Err(ScriptError::MissingPlaceholder(STYLES_PLACEHOLDER));
    }
    let Some((head, tail)) = template.split_once(EVENTS_PLACEHOLDER) else {
        return Err(ScriptError::MissingPlaceholder(EVENTS_PLACEHOLDER));
    };

    let styles = join_lines(style_lines);
    let events = join_lines(event_lines);
    debug!("Assembling script with {} style(s) and {} event(s)", style_lines.len(), event_lines.len());

    // Event text is inserted as-is, never searched for placeholders
    Ok(format!(
        "{}{}{}",
        head.replace(STYLES_PLACEHOLDER, &styles),
        events,
        tail.replace(STYLES_PLACEHOLDER, &styles)
    ))
}

/// Assemble a script from a style table and converted lines
pub fn assemble_script(template: &str, styles: &StyleTable, lines: &[ScriptLine]) -> Result<String, ScriptError> {
    let event_lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
    assemble(template, &styles.style_lines(), &event_lines)
}

fn join_lines<T: AsRef<str>>(lines: &[T]) -> String {
    lines.iter().map(|line| line.as_ref()).collect::<Vec<&str>>().join("\n")
}
