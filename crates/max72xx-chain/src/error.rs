//! Error types: configuration validation and capture parsing.
use std::fmt;

/// Error returned when a chain configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The chain must contain at least one device.
    ZeroChainLength,

    /// The device type string did not name a supported chip.
    ///
    /// The contained `String` is the rejected input.
    UnknownDeviceType(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroChainLength => write!(f, "chain length must be at least 1"),
            ConfigError::UnknownDeviceType(s) => {
                write!(f, "unknown device type: {:?} (expected MAX7219 or MAX7221)", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reason a capture line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The first word of the line was not `cs` or `data`.
    UnknownRecord(String),

    /// The record had the wrong number of fields.
    ///
    /// - `record` is the record keyword.
    /// - `expected` describes the accepted field counts.
    /// - `found` is the number of fields after the keyword.
    FieldCount {
        record: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// A field was not a decimal or `0x`-prefixed hexadecimal number.
    InvalidNumber(String),

    /// A byte field held a value above `0xFF`.
    ByteOutOfRange(u64),

    /// A chip-select level other than `0` or `1`.
    InvalidLevel(String),

    /// A data record whose end timestamp precedes its start.
    ReversedSpan { start: u64, end: u64 },
}

/// Error returned by the capture reader, tagged with the 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnknownRecord(word) => write!(f, "unknown record type: {:?}", word),
            ParseErrorKind::FieldCount {
                record,
                expected,
                found,
            } => write!(
                f,
                "`{}` record expects {} fields, found {}",
                record, expected, found
            ),
            ParseErrorKind::InvalidNumber(s) => write!(f, "invalid number: {:?}", s),
            ParseErrorKind::ByteOutOfRange(v) => {
                write!(f, "byte value out of range: 0x{:X}", v)
            }
            ParseErrorKind::InvalidLevel(s) => {
                write!(f, "chip-select level must be 0 or 1, found {:?}", s)
            }
            ParseErrorKind::ReversedSpan { start, end } => {
                write!(f, "end timestamp {} precedes start {}", end, start)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}
