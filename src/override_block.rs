/*!
 * Override blocks: the `{\tag\tag(args)}` markup that opens an event's text.
 *
 * Only the directives this tool writes are given their own variants; any
 * other directive is carried through as raw text.
 */

use std::fmt;

// @enum: One backslash directive inside an override block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideTag {
    /// `\bord<width>`
    Border(String),
    /// `\pos(<x>,<y>)`, stores the text between the parentheses
    Position(String),
    /// `\3c<colour>`
    OutlineColour(String),
    /// Any other directive, without its leading backslash
    Other(String),
}

impl OverrideTag {
    fn parse(raw: &str) -> Self {
        if let Some(args) = raw.strip_prefix("pos(").and_then(|rest| rest.strip_suffix(')')) {
            OverrideTag::Position(args.to_string())
        } else if let Some(colour) = raw.strip_prefix("3c") {
            OverrideTag::OutlineColour(colour.to_string())
        } else if let Some(width) = raw.strip_prefix("bord") {
            OverrideTag::Border(width.to_string())
        } else {
            OverrideTag::Other(raw.to_string())
        }
    }

    pub fn is_position(&self) -> bool {
        matches!(self, OverrideTag::Position(_))
    }
}

impl fmt::Display for OverrideTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverrideTag::Border(width) => write!(f, "\\bord{}", width),
            OverrideTag::Position(args) => write!(f, "\\pos({})", args),
            OverrideTag::OutlineColour(colour) => write!(f, "\\3c{}", colour),
            OverrideTag::Other(raw) => write!(f, "\\{}", raw),
        }
    }
}

// @struct: Parsed override block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverrideBlock {
    pub tags: Vec<OverrideTag>,
}

impl OverrideBlock {
    pub fn new(tags: Vec<OverrideTag>) -> Self {
        OverrideBlock { tags }
    }

    /// Parse the inside of a block (without braces).
    ///
    /// Backslashes inside parentheses belong to the enclosing directive, so
    /// `\clip(\p1 ...)`-style arguments stay in one piece.
    pub fn parse(inner: &str) -> Self {
        let mut tags = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for ch in inner.chars() {
            match ch {
                '\\' if depth == 0 => {
                    if !current.is_empty() {
                        tags.push(OverrideTag::parse(&current));
                        current.clear();
                    }
                    continue;
                }
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
            current.push(ch);
        }
        if !current.is_empty() {
            tags.push(OverrideTag::parse(&current));
        }

        OverrideBlock { tags }
    }

    /// Split `text` into its leading override block and the remainder.
    ///
    /// Returns `None` when the text does not open with a closed block.
    pub fn split_leading(text: &str) -> Option<(OverrideBlock, &str)> {
        let rest = text.strip_prefix('{')?;
        let close = rest.find('}')?;
        Some((Self::parse(&rest[..close]), &rest[close + 1..]))
    }

    pub fn position(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            OverrideTag::Position(args) => Some(args.as_str()),
            _ => None,
        })
    }

    pub fn has_position(&self) -> bool {
        self.tags.iter().any(OverrideTag::is_position)
    }

    /// Drop every directive except the position
    pub fn retain_position_only(&mut self) {
        self.tags.retain(OverrideTag::is_position);
    }
}

impl fmt::Display for OverrideBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        for tag in &self.tags {
            write!(f, "{}", tag)?;
        }
        f.write_str("}")
    }
}
