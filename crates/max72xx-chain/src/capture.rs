//! Line-oriented capture format.
//!
//! Captures exported from a logic analyzer's SPI layer are stored as plain
//! text, one event per line:
//!
//! ```text
//! # comment
//! cs   <timestamp> <0|1>
//! data <start> <end> <mosi> [<miso>]
//! ```
//!
//! Numbers are decimal or `0x` hexadecimal. The optional `miso` byte is
//! validated and then discarded.
//!
//! # Examples
//!
//! ```
//! use max72xx_chain::capture::parse_capture;
//! use max72xx_chain::TransferEvent;
//!
//! let text = "cs 0 1\ndata 10 17 0x0A  # intensity\ndata 18 25 8\ncs 30 0\n";
//! let events = parse_capture(text).unwrap();
//! assert_eq!(events[1], TransferEvent::data(0x0A, 10, 17));
//! assert_eq!(events.len(), 4);
//! ```

use std::fmt::Write as _;

use crate::error::{ParseError, ParseErrorKind};
use crate::event::TransferEvent;

/// Parse a whole capture.
pub fn parse_capture(text: &str) -> Result<Vec<TransferEvent>, ParseError> {
    CaptureReader::new(text).collect()
}

/// Iterator over the events of a capture, yielding an error per bad line.
pub struct CaptureReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> CaptureReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for CaptureReader<'_> {
    type Item = Result<TransferEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.lines.by_ref() {
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            return Some(parse_line(content).map_err(|kind| ParseError::new(index + 1, kind)));
        }
        None
    }
}

fn parse_line(content: &str) -> Result<TransferEvent, ParseErrorKind> {
    let mut words = content.split_whitespace();
    let record = words.next().unwrap_or("");
    let fields: Vec<&str> = words.collect();

    match record.to_ascii_lowercase().as_str() {
        "cs" => {
            if fields.len() != 2 {
                return Err(ParseErrorKind::FieldCount {
                    record: "cs",
                    expected: "2",
                    found: fields.len(),
                });
            }
            let at = parse_number(fields[0])?;
            let asserted = match fields[1] {
                "1" => true,
                "0" => false,
                other => return Err(ParseErrorKind::InvalidLevel(other.to_string())),
            };
            Ok(TransferEvent::Select { asserted, at })
        }
        "data" => {
            if !(3..=4).contains(&fields.len()) {
                return Err(ParseErrorKind::FieldCount {
                    record: "data",
                    expected: "3 or 4",
                    found: fields.len(),
                });
            }
            let start = parse_number(fields[0])?;
            let end = parse_number(fields[1])?;
            if end < start {
                return Err(ParseErrorKind::ReversedSpan { start, end });
            }
            let byte = parse_byte(fields[2])?;
            if let Some(miso) = fields.get(3) {
                parse_byte(miso)?;
            }
            Ok(TransferEvent::Data { byte, start, end })
        }
        _ => Err(ParseErrorKind::UnknownRecord(record.to_string())),
    }
}

fn parse_number(field: &str) -> Result<u64, ParseErrorKind> {
    let parsed = match field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => field.parse::<u64>(),
    };
    parsed.map_err(|_| ParseErrorKind::InvalidNumber(field.to_string()))
}

fn parse_byte(field: &str) -> Result<u8, ParseErrorKind> {
    let value = parse_number(field)?;
    u8::try_from(value).map_err(|_| ParseErrorKind::ByteOutOfRange(value))
}

/// Serialize events back into the capture format.
pub fn format_capture(events: &[TransferEvent]) -> String {
    let mut out = String::new();
    for event in events {
        // Writing to a String cannot fail.
        let _ = match *event {
            TransferEvent::Select { asserted, at } => {
                writeln!(out, "cs {} {}", at, u8::from(asserted))
            }
            TransferEvent::Data { byte, start, end } => {
                writeln!(out, "data {} {} 0x{:02X}", start, end, byte)
            }
        };
    }
    out
}
