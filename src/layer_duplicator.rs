/*!
 * Second-layer duplication for assembled scripts.
 *
 * Every `Dialogue:` line of the `[Events]` section is followed by a copy on
 * layer 2 whose leading override block only keeps its `\pos` directive. The
 * scan starts two lines below the section header (skipping the `Format:`
 * line) and ends at the first whitespace-only line; everything after that is
 * copied verbatim.
 *
 * Running the pass on its own output duplicates the lines again: already
 * derived copies are not recognised.
 */

use std::fmt;
use log::{debug, trace, warn};
use crate::errors::ScriptError;
use crate::override_block::OverrideBlock;

const EVENTS_HEADER: &str = "[Events]";
const DIALOGUE_MARKER: &str = "Dialogue:";
const EVENT_FIELD_COUNT: usize = 10;

/// Layer number rewritten on derived copies
pub const SOURCE_LAYER: u32 = 1;
pub const DERIVED_LAYER: u32 = 2;

// @struct: Fields of a `Dialogue:` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine<'a> {
    pub layer: u32,
    pub start: &'a str,
    pub end: &'a str,
    pub style: &'a str,
    pub name: &'a str,
    pub margin_l: &'a str,
    pub margin_r: &'a str,
    pub margin_v: &'a str,
    pub effect: &'a str,
    // @field: May itself contain commas
    pub text: &'a str,
}

impl<'a> EventLine<'a> {
    /// Split a `Dialogue:` line into its ten fields
    pub fn parse(line: &'a str) -> Result<Self, String> {
        let fields_str = line
            .strip_prefix(DIALOGUE_MARKER)
            .ok_or_else(|| format!("line does not start with {}", DIALOGUE_MARKER))?
            .trim_start();

        let fields: Vec<&str> = fields_str.splitn(EVENT_FIELD_COUNT, ',').collect();
        let [layer, start, end, style, name, margin_l, margin_r, margin_v, effect, text] = fields[..] else {
            return Err(format!("expected {} fields, found {}", EVENT_FIELD_COUNT, fields.len()));
        };

        let layer = layer
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid layer '{}': {}", layer, e))?;

        Ok(EventLine {
            layer,
            start,
            end,
            style,
            name,
            margin_l,
            margin_r,
            margin_v,
            effect,
            text,
        })
    }
}

impl fmt::Display for EventLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {},{},{},{},{},{},{},{},{},{}",
            DIALOGUE_MARKER,
            self.layer,
            self.start,
            self.end,
            self.style,
            self.name,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.effect,
            self.text
        )
    }
}

/// Build the layer-2 copy of a dialogue line.
///
/// Layer 1 becomes layer 2; other layers are kept. The leading override block
/// is cut down to its position directive; a block without one is left alone.
pub fn derive_second_layer(line: &str) -> Result<String, String> {
    let mut event = EventLine::parse(line)?;
    if event.layer == SOURCE_LAYER {
        event.layer = DERIVED_LAYER;
    }

    let text = match OverrideBlock::split_leading(event.text) {
        Some((mut block, rest)) if block.has_position() => {
            block.retain_position_only();
            format!("{}{}", block, rest)
        }
        _ => event.text.to_string(),
    };

    Ok(EventLine { text: &text, ..event }.to_string())
}

/// Layer-2 copy of a `Dialogue:` line that does not split into ten fields.
///
/// Only the `Dialogue: 1,` prefix is renumbered, and the override block is
/// looked for after the ninth comma; with fewer commas the line is copied.
pub fn derive_second_layer_lenient(line: &str) -> String {
    let renumbered = match line.strip_prefix("Dialogue: 1,") {
        Some(rest) => format!("Dialogue: {},{}", DERIVED_LAYER, rest),
        None => line.to_string(),
    };

    let Some((text_start, _)) = renumbered.match_indices(',').nth(EVENT_FIELD_COUNT - 2) else {
        return renumbered;
    };
    let (fields, text) = renumbered.split_at(text_start + 1);

    match OverrideBlock::split_leading(text) {
        Some((mut block, rest)) if block.has_position() => {
            block.retain_position_only();
            format!("{}{}{}", fields, block, rest)
        }
        _ => renumbered.clone(),
    }
}

// @enum: Where the scan is relative to the events section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    BeforeEvents,
    InEvents,
    AfterEvents,
}

/// Result of a duplication pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredScript {
    pub content: String,
    // @field: Number of dialogue lines that received a copy
    pub duplicated: usize,
}

fn is_blank(line: &str) -> bool {
    !line.is_empty() && line.chars().all(char::is_whitespace)
}

fn is_events_header(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == EVENTS_HEADER
}

/// Add a second layer under every dialogue line of the events section
pub fn duplicate_layers(content: &str) -> Result<LayeredScript, ScriptError> {
    let mut output = String::with_capacity(content.len() * 2);
    let mut section = Section::BeforeEvents;
    let mut skip = 0usize;
    let mut duplicated = 0usize;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        match section {
            Section::BeforeEvents => {
                output.push_str(line);
                if is_events_header(line) {
                    trace!("Found {} on line {}", EVENTS_HEADER, index + 1);
                    section = Section::InEvents;
                    // Format: line
                    skip = 1;
                }
            }
            Section::InEvents if skip > 0 => {
                output.push_str(line);
                skip -= 1;
            }
            Section::InEvents => {
                if line.starts_with(DIALOGUE_MARKER) {
                    let primary = line.trim_end();
                    let terminator = if line.ends_with("\r\n") { "\r\n" } else { "\n" };
                    let derived = derive_second_layer(primary).unwrap_or_else(|reason| {
                        warn!("Event on line {} is not a standard dialogue line ({}), copying it as text", index + 1, reason);
                        derive_second_layer_lenient(primary)
                    });
                    output.push_str(primary);
                    output.push_str(terminator);
                    output.push_str(&derived);
                    output.push_str(terminator);
                    duplicated += 1;
                } else {
                    output.push_str(line);
                    if is_blank(line) {
                        debug!("Events section ends at line {}", index + 1);
                        section = Section::AfterEvents;
                    }
                }
            }
            Section::AfterEvents => output.push_str(line),
        }
    }

    if section == Section::BeforeEvents {
        return Err(ScriptError::MissingEventsHeader);
    }

    Ok(LayeredScript {
        content: output,
        duplicated,
    })
}
