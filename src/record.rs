//! Input record decoding
//!
//! Lines have the shape `entity_id;tablet_id;timestamp;count`. The second
//! field is required but discarded. Anything after the count's digits is
//! ignored, so trailing fields or carriage returns do not reject a line.
//!
//! Decoding works on raw bytes. Entity ids are compared byte for byte, so
//! ids that are not valid UTF-8 still group correctly.

use regex::bytes::Regex;
use std::fmt;
use std::sync::OnceLock;

/// ASCII whitespace accepted before a number (same set as C `isspace`)
const LEADING_SPACE: &str = r"[ \t\n\x0B\x0C\r]*";

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Unicode off: `[^;]` matches any single byte other than `;`
        let pattern = format!(
            r"(?-u)^([^;]+);[^;]+;{ws}([+-]?[0-9]+);{ws}([+-]?[0-9]+)",
            ws = LEADING_SPACE
        );
        Regex::new(&pattern).expect("record line pattern is valid")
    })
}

/// Parse a captured run of ASCII digits with optional sign
fn parse_number<T: std::str::FromStr>(digits: &[u8]) -> Option<T> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// One decoded input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Grouping key (bundle id in the upstream export), raw bytes
    pub entity_id: Vec<u8>,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub count: i32,
}

impl Record {
    pub fn new(entity_id: impl Into<Vec<u8>>, timestamp: i64, count: i32) -> Self {
        Self {
            entity_id: entity_id.into(),
            timestamp,
            count,
        }
    }

    /// Decode a single input line
    ///
    /// Returns `None` for lines that do not carry an entity id, a non-empty
    /// second field, a timestamp that fits in `i64` and a count that fits in
    /// `i32`. Such lines are dropped by the caller without touching any state.
    pub fn parse_line(line: &[u8]) -> Option<Self> {
        let caps = line_pattern().captures(line)?;

        let timestamp = parse_number::<i64>(&caps[2])?;
        let count = parse_number::<i32>(&caps[3])?;

        Some(Self {
            entity_id: caps[1].to_vec(),
            timestamp,
            count,
        })
    }

    /// Entity id for display, invalid UTF-8 replaced
    pub fn entity(&self) -> EntityDisplay<'_> {
        EntityDisplay(&self.entity_id)
    }
}

/// Lossy display adapter for raw entity ids
pub struct EntityDisplay<'a>(&'a [u8]);

impl fmt::Display for EntityDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.0))
    }
}
