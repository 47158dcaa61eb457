/*!
 * Style table: tag → fixed-field style record.
 *
 * The table file is a JSON object whose keys are row tags (speaker codes,
 * "default", ...) and whose values are arrays of exactly
 * [`STYLE_FIELD_COUNT`] scalars:
 *
 * ```text
 * [Pos, Bord, Name, Fontname, Fontsize, PrimaryColour, SecondaryColour,
 *  OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX,
 *  ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment,
 *  MarginL, MarginR, MarginV, Encoding]
 * ```
 *
 * The first two entries only feed the per-line override block; the remaining
 * 23 form the `Style:` line. Key order in the file is kept.
 */

use std::fmt;
use std::path::Path;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::errors::StyleError;

/// Tag every unmatched row falls back to
pub const DEFAULT_TAG: &str = "default";

/// Number of scalars in one style array
pub const STYLE_FIELD_COUNT: usize = 25;

/// A single scalar from the style file, kept in its textual form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::Number(number) => write!(f, "{}", number),
            // ASS writes boolean style flags as -1/0
            StyleValue::Flag(true) => f.write_str("-1"),
            StyleValue::Flag(false) => f.write_str("0"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        StyleValue::Text(text.to_string())
    }
}

impl From<i64> for StyleValue {
    fn from(number: i64) -> Self {
        StyleValue::Number(number.into())
    }
}

// @struct: Rendering parameters for one tag
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    // @field: `x,y` used in the `\pos` override
    pub position: StyleValue,
    // @field: Used in the `\bord` override
    pub border: StyleValue,
    pub name: String,
    pub fontname: StyleValue,
    pub fontsize: StyleValue,
    pub primary_colour: StyleValue,
    pub secondary_colour: StyleValue,
    pub outline_colour: StyleValue,
    pub back_colour: StyleValue,
    pub bold: StyleValue,
    pub italic: StyleValue,
    pub underline: StyleValue,
    pub strikeout: StyleValue,
    pub scale_x: StyleValue,
    pub scale_y: StyleValue,
    pub spacing: StyleValue,
    pub angle: StyleValue,
    pub border_style: StyleValue,
    pub outline: StyleValue,
    pub shadow: StyleValue,
    pub alignment: StyleValue,
    pub margin_l: StyleValue,
    pub margin_r: StyleValue,
    pub margin_v: StyleValue,
    pub encoding: StyleValue,
}

impl StyleRecord {
    /// Build a record from the raw array stored under `tag`
    pub fn from_values(tag: &str, values: Vec<StyleValue>) -> Result<Self, StyleError> {
        let values: [StyleValue; STYLE_FIELD_COUNT] = values.try_into().map_err(|values: Vec<StyleValue>| {
            StyleError::WrongFieldCount {
                tag: tag.to_string(),
                expected: STYLE_FIELD_COUNT,
                found: values.len(),
            }
        })?;

        let [
            position, border, name, fontname, fontsize,
            primary_colour, secondary_colour, outline_colour, back_colour,
            bold, italic, underline, strikeout,
            scale_x, scale_y, spacing, angle,
            border_style, outline, shadow, alignment,
            margin_l, margin_r, margin_v, encoding,
        ] = values;

        Ok(StyleRecord {
            position,
            border,
            name: name.to_string(),
            fontname,
            fontsize,
            primary_colour,
            secondary_colour,
            outline_colour,
            back_colour,
            bold,
            italic,
            underline,
            strikeout,
            scale_x,
            scale_y,
            spacing,
            angle,
            border_style,
            outline,
            shadow,
            alignment,
            margin_l,
            margin_r,
            margin_v,
            encoding,
        })
    }

    /// Fields that make up the `Style:` line, in ASS `Format:` order
    fn style_fields(&self) -> [&dyn fmt::Display; STYLE_FIELD_COUNT - 2] {
        [
            &self.name,
            &self.fontname,
            &self.fontsize,
            &self.primary_colour,
            &self.secondary_colour,
            &self.outline_colour,
            &self.back_colour,
            &self.bold,
            &self.italic,
            &self.underline,
            &self.strikeout,
            &self.scale_x,
            &self.scale_y,
            &self.spacing,
            &self.angle,
            &self.border_style,
            &self.outline,
            &self.shadow,
            &self.alignment,
            &self.margin_l,
            &self.margin_r,
            &self.margin_v,
            &self.encoding,
        ]
    }

    /// Render the `Style:` line for the `[V4+ Styles]` section
    pub fn style_line(&self) -> String {
        let fields: Vec<String> = self.style_fields()
            .iter()
            .map(|field| field.to_string())
            .collect();
        format!("Style: {}", fields.join(","))
    }
}

/// Immutable mapping of row tags to style records
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: IndexMap<String, StyleRecord>,
}

impl StyleTable {
    /// Build a table, rejecting it if the fallback style is missing
    pub fn new(styles: IndexMap<String, StyleRecord>) -> Result<Self, StyleError> {
        if !styles.contains_key(DEFAULT_TAG) {
            return Err(StyleError::MissingDefault);
        }
        Ok(StyleTable { styles })
    }

    /// Parse a table from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        let raw: IndexMap<String, Vec<StyleValue>> = serde_json::from_str(json)
            .map_err(|e| StyleError::Parse(e.to_string()))?;

        let mut styles = IndexMap::with_capacity(raw.len());
        for (tag, values) in raw {
            let record = StyleRecord::from_values(&tag, values)?;
            styles.insert(tag, record);
        }

        Self::new(styles)
    }

    /// Load a table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read style table: {:?}", path))?;
        let table = Self::from_json_str(&json)
            .with_context(|| format!("Invalid style table: {:?}", path))?;
        debug!("Loaded {} style(s) from {:?}", table.len(), path);
        Ok(table)
    }

    /// Look up `tag`, falling back to the default style
    pub fn resolve(&self, tag: &str) -> Result<&StyleRecord, StyleError> {
        self.styles
            .get(tag)
            .or_else(|| self.styles.get(DEFAULT_TAG))
            .ok_or_else(|| StyleError::UnknownTag(tag.to_string()))
    }

    pub fn get(&self, tag: &str) -> Option<&StyleRecord> {
        self.styles.get(tag)
    }

    /// Records in file order
    pub fn records(&self) -> impl Iterator<Item = &StyleRecord> {
        self.styles.values()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// `Style:` lines for every record, in file order
    pub fn style_lines(&self) -> Vec<String> {
        self.records().map(StyleRecord::style_line).collect()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
