//! Digit fonts: the built-in Code B font and raw segment bits.
//!
//! In Code B mode the chip looks up the low nibble of a digit register in a
//! fixed 16-glyph font. In no-decode mode each bit of the byte drives one
//! segment directly:
//!
//! ```text
//!  - A -
//! |     |
//! F     B
//! |     |
//!  - G -
//! |     |
//! E     C
//! |     |
//!  - D -  DP
//! ```

/// Decimal point bit, shared by both modes.
pub const DP_MASK: u8 = 0x80;

/// Code B glyphs indexed by the low nibble. `0x0F` is blank.
const CODE_B: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-', 'E', 'H', 'L', 'P', ' ',
];

/// Segment names in bit order, least significant first.
const SEGMENTS: [(u8, &str); 8] = [
    (0x01, "G"),
    (0x02, "F"),
    (0x04, "E"),
    (0x08, "D"),
    (0x10, "C"),
    (0x20, "B"),
    (0x40, "A"),
    (0x80, "DP"),
];

/// Look up the Code B glyph for a digit register value.
///
/// Only the low seven bits are considered; the decimal point is reported
/// separately. Returns `None` for values the font does not cover (`0x10` and
/// above).
pub fn code_b_glyph(data: u8) -> Option<char> {
    CODE_B.get((data & !DP_MASK) as usize).copied()
}

/// Whether the decimal point bit is set.
pub fn has_decimal_point(data: u8) -> bool {
    data & DP_MASK != 0
}

/// Names of the lit segments, in `A`..`G`, `DP` order.
pub fn lit_segments(data: u8) -> Vec<&'static str> {
    // Reverse so A comes first and DP last.
    let mut lit: Vec<&'static str> = SEGMENTS[..7]
        .iter()
        .rev()
        .filter(|(mask, _)| data & mask != 0)
        .map(|(_, name)| *name)
        .collect();
    if has_decimal_point(data) {
        lit.push(SEGMENTS[7].1);
    }
    lit
}

/// Render lit segments as a space separated list, or `none`.
pub fn segments_text(data: u8) -> String {
    let lit = lit_segments(data);
    if lit.is_empty() {
        "none".to_string()
    } else {
        lit.join(" ")
    }
}

/// Render a digit as Code B text: glyph plus a trailing `.` for the decimal
/// point. Unmapped values fall back to the raw byte in hex.
pub fn code_b_text(data: u8) -> String {
    match code_b_glyph(data) {
        Some(glyph) if has_decimal_point(data) => format!("{}.", glyph),
        Some(glyph) => glyph.to_string(),
        None => format!("0x{:02X}", data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_b_table() {
        let expected = "0123456789-EHLP ";
        for (value, ch) in expected.chars().enumerate() {
            assert_eq!(code_b_glyph(value as u8), Some(ch));
        }
        assert_eq!(code_b_glyph(0x10), None);
        assert_eq!(code_b_glyph(0x7F), None);
    }

    #[test]
    fn test_code_b_ignores_decimal_point() {
        assert_eq!(code_b_glyph(0x85), Some('5'));
        assert_eq!(code_b_text(0x85), "5.");
        assert_eq!(code_b_text(0x05), "5");
    }

    #[test]
    fn test_code_b_unmapped_falls_back_to_hex() {
        assert_eq!(code_b_text(0x7E), "0x7E");
        assert_eq!(code_b_text(0xFE), "0xFE");
    }

    #[test]
    fn test_segments() {
        // Custom "1" is B + C
        assert_eq!(lit_segments(0x30), vec!["B", "C"]);
        assert_eq!(segments_text(0x81), "G DP");
        assert_eq!(segments_text(0x00), "none");
        assert_eq!(lit_segments(0xFF).len(), 8);
    }
}
