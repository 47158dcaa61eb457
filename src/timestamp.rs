use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use crate::errors::TimestampError;

// @module: Dialogue table timestamps

// @const: One clock field, 1-2 digits
static FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}$").unwrap()
});

/// Text emitted when a row's timestamp could not be parsed
pub const FALLBACK_TIMESTAMP: &str = "0:00:00.00";

// @struct: Whole-second clock time of a dialogue row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Timestamp {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Timestamp { hours, minutes, seconds }
    }

    /// Parse `MM:SS` or `HH:MM:SS`.
    ///
    /// The colon count selects the form. Hours are limited to a single day,
    /// since the source tables hold clock times rather than durations.
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        let trimmed = text.trim();
        let fields: Vec<&str> = trimmed.split(':').collect();

        let (hours, minutes, seconds) = match fields.as_slice() {
            [m, s] => (None, *m, *s),
            [h, m, s] => (Some(*h), *m, *s),
            _ => {
                return Err(TimestampError::FieldCount {
                    text: text.to_string(),
                    colons: fields.len() - 1,
                });
            }
        };

        let hours = match hours {
            Some(h) => Self::parse_field(text, h, "hours", 23)?,
            None => 0,
        };
        let minutes = Self::parse_field(text, minutes, "minutes", 59)?;
        let seconds = Self::parse_field(text, seconds, "seconds", 59)?;

        Ok(Timestamp { hours, minutes, seconds })
    }

    fn parse_field(text: &str, field: &str, name: &'static str, max: u32) -> Result<u32, TimestampError> {
        if !FIELD_REGEX.is_match(field) {
            return Err(TimestampError::NotANumber {
                text: text.to_string(),
                field: name,
            });
        }

        // At most two digits, cannot overflow
        let value: u32 = field.parse().map_err(|_| TimestampError::NotANumber {
            text: text.to_string(),
            field: name,
        })?;

        if value > max {
            return Err(TimestampError::OutOfRange {
                text: text.to_string(),
                field: name,
                value,
                max,
            });
        }

        Ok(value)
    }

    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Renders as an ASS event time; the source has no sub-second precision.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}.00", self.hours, self.minutes, self.seconds)
    }
}

// @enum: Time written into an event line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    Parsed(Timestamp),
    /// The row's timestamp was unparseable
    Fallback,
}

impl EventTime {
    pub fn is_fallback(&self) -> bool {
        matches!(self, EventTime::Fallback)
    }
}

impl From<Timestamp> for EventTime {
    fn from(timestamp: Timestamp) -> Self {
        EventTime::Parsed(timestamp)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventTime::Parsed(timestamp) => write!(f, "{}", timestamp),
            EventTime::Fallback => f.write_str(FALLBACK_TIMESTAMP),
        }
    }
}
