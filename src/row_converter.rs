use std::fmt;
use log::warn;
use crate::app_config::Config;
use crate::dialogue_table::DialogueRow;
use crate::errors::StyleError;
use crate::override_block::{OverrideBlock, OverrideTag};
use crate::style_table::StyleTable;
use crate::timestamp::{EventTime, Timestamp};

// @module: Dialogue row → event line conversion

/// Layer every converted row is placed on
pub const PRIMARY_LAYER: u32 = 1;

// @enum: Event line kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Dialogue,
    Comment,
}

impl EventKind {
    pub fn marker(&self) -> &'static str {
        match self {
            EventKind::Dialogue => "Dialogue",
            EventKind::Comment => "Comment",
        }
    }
}

// @struct: One line of the `[Events]` section
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub kind: EventKind,
    pub layer: u32,
    pub start: EventTime,
    pub end: EventTime,
    pub style: String,
    // @field: Only dialogue lines carry one
    pub override_block: Option<OverrideBlock>,
    pub text: String,
}

impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {},{},{},{},,0,0,0,,",
            self.kind.marker(), self.layer, self.start, self.end, self.style
        )?;
        if let Some(block) = &self.override_block {
            write!(f, "{}", block)?;
        }
        f.write_str(&self.text)
    }
}

/// Converts dialogue rows using a loaded style table
pub struct RowConverter<'a> {
    styles: &'a StyleTable,
    config: &'a Config,
}

impl<'a> RowConverter<'a> {
    pub fn new(styles: &'a StyleTable, config: &'a Config) -> Self {
        RowConverter { styles, config }
    }

    /// Resolve a row's timestamp, logging and falling back to zero on failure
    pub fn event_time(&self, row: &DialogueRow) -> EventTime {
        match Timestamp::parse(&row.timestamp) {
            Ok(timestamp) => EventTime::Parsed(timestamp),
            Err(e) => {
                warn!("Couldn't parse timestamp at row {} ({}): {}", row.row_number, row, e);
                EventTime::Fallback
            }
        }
    }

    /// Convert one row into an event line
    pub fn convert(&self, row: &DialogueRow) -> Result<ScriptLine, StyleError> {
        let style = self.styles.resolve(&row.tag)?;
        let time = self.event_time(row);

        let (kind, override_block) = if self.config.is_comment_tag(&row.tag) {
            (EventKind::Comment, None)
        } else {
            let block = OverrideBlock::new(vec![
                OverrideTag::Border(style.border.to_string()),
                OverrideTag::Position(style.position.to_string()),
                OverrideTag::OutlineColour(self.config.outline_colour.clone()),
            ]);
            (EventKind::Dialogue, Some(block))
        };

        Ok(ScriptLine {
            kind,
            layer: PRIMARY_LAYER,
            start: time,
            end: time,
            style: style.name.clone(),
            override_block,
            text: row.text.clone(),
        })
    }

    /// Convert every row, keeping input order
    pub fn convert_all(&self, rows: &[DialogueRow]) -> Result<Vec<ScriptLine>, StyleError> {
        rows.iter().map(|row| self.convert(row)).collect()
    }
}
