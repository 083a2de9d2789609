//! Register map and value rendering.
//!
//! Every write carries a 4-bit address. Addresses 1 through 8 select a digit
//! row; the remaining named addresses are control registers. Anything else is
//! reported as invalid.

use std::fmt;

use super::font;
use crate::annotation::AnnotationKind;
use crate::config::DeviceType;

/// Only the low nibble of the address byte is decoded by the chip.
pub const ADDRESS_MASK: u8 = 0x0F;

/// First digit row address.
pub const FIRST_DIGIT: u8 = 0x01;

/// Last digit row address.
pub const LAST_DIGIT: u8 = 0x08;

/// Named control registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl Register {
    /// All control registers in address order.
    pub const ALL: [Register; 6] = [
        Register::NoOp,
        Register::DecodeMode,
        Register::Intensity,
        Register::ScanLimit,
        Register::Shutdown,
        Register::DisplayTest,
    ];

    /// Look up a control register by sanitized address.
    pub fn from_address(address: u8) -> Option<Self> {
        match address {
            0x00 => Some(Register::NoOp),
            0x09 => Some(Register::DecodeMode),
            0x0A => Some(Register::Intensity),
            0x0B => Some(Register::ScanLimit),
            0x0C => Some(Register::Shutdown),
            0x0F => Some(Register::DisplayTest),
            _ => None,
        }
    }

    pub fn address(self) -> u8 {
        self as u8
    }

    /// Human-readable register name.
    pub fn name(self) -> &'static str {
        match self {
            Register::NoOp => "No-op",
            Register::DecodeMode => "Decode mode",
            Register::Intensity => "Intensity",
            Register::ScanLimit => "Scan limit",
            Register::Shutdown => "Shutdown",
            Register::DisplayTest => "Display test",
        }
    }

    /// Abbreviated name for narrow displays.
    pub fn short_name(self) -> &'static str {
        match self {
            Register::NoOp => "NOP",
            Register::DecodeMode => "DEC",
            Register::Intensity => "INT",
            Register::ScanLimit => "SCN",
            Register::Shutdown => "SHDN",
            Register::DisplayTest => "TEST",
        }
    }

    /// Render the meaning of `data` written to this register.
    ///
    /// Returns `None` for the no-op register, whose value is ignored.
    pub fn render_value(self, data: u8, device_type: DeviceType) -> Option<String> {
        match self {
            Register::NoOp => None,
            Register::DecodeMode => Some(render_decode_mode(data)),
            Register::Intensity => Some(render_intensity(data, device_type)),
            Register::ScanLimit => Some(render_scan_limit(data)),
            Register::Shutdown => Some(render_shutdown(data)),
            Register::DisplayTest => Some(render_display_test(data)),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a sanitized address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteTarget {
    /// Digit row 1..=8.
    Digit(u8),
    /// A named control register.
    Register(Register),
    /// An address with no register behind it.
    Invalid(u8),
}

impl WriteTarget {
    /// Annotation category used for writes to this target.
    pub fn kind(self) -> AnnotationKind {
        match self {
            WriteTarget::Digit(_) => AnnotationKind::Digit,
            WriteTarget::Register(_) => AnnotationKind::Register,
            WriteTarget::Invalid(_) => AnnotationKind::Invalid,
        }
    }
}

/// Classify an address byte. Upper bits are discarded first.
///
/// Digit rows take priority over the register table.
pub fn classify(address: u8) -> WriteTarget {
    let address = address & ADDRESS_MASK;
    if (FIRST_DIGIT..=LAST_DIGIT).contains(&address) {
        return WriteTarget::Digit(address);
    }
    match Register::from_address(address) {
        Some(register) => WriteTarget::Register(register),
        None => WriteTarget::Invalid(address),
    }
}

/// Result of interpreting one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub target: WriteTarget,
    pub kind: AnnotationKind,
    /// Renderings, most verbose first.
    pub texts: Vec<String>,
}

/// Interpret one `(address, data)` write.
///
/// # Examples
///
/// ```
/// use max72xx_chain::chip::register::{interpret, WriteTarget};
/// use max72xx_chain::{AnnotationKind, DeviceType};
///
/// let it = interpret(0x03, 0x81, DeviceType::Max7219);
/// assert_eq!(it.target, WriteTarget::Digit(3));
/// assert_eq!(it.kind, AnnotationKind::Digit);
/// assert_eq!(it.texts[0], "Digit 3: 1.");
/// ```
pub fn interpret(address: u8, data: u8, device_type: DeviceType) -> Interpretation {
    let target = classify(address);
    let texts = match target {
        WriteTarget::Digit(digit) => render_digit(digit, data),
        WriteTarget::Register(register) => match register.render_value(data, device_type) {
            Some(value) => vec![
                format!("{}: {}", register.name(), value),
                format!("{}: {}", register.short_name(), value),
            ],
            None => vec![register.name().to_string(), register.short_name().to_string()],
        },
        WriteTarget::Invalid(address) => vec![
            format!("Invalid register 0x{:X}", address),
            format!("INV 0x{:X}", address),
        ],
    };
    Interpretation {
        target,
        kind: target.kind(),
        texts,
    }
}

fn render_digit(digit: u8, data: u8) -> Vec<String> {
    let glyph = font::code_b_text(data);
    vec![
        format!("Digit {}: {}", digit, glyph),
        format!("D{}: {}", digit, glyph),
        format!("@{:02X}", data),
        format!("Segments: {}", font::segments_text(data)),
    ]
}

/// Decode mode: one bit per digit, bit 0 for digit 1.
pub fn render_decode_mode(data: u8) -> String {
    match data {
        0x00 => "No Decode".to_string(),
        0xFF => "CODE B Decode".to_string(),
        _ => {
            // Digit 8 on the left, like the datasheet table.
            let bitmap: String = (0..8)
                .rev()
                .map(|bit| if data & (1 << bit) != 0 { 'B' } else { '.' })
                .collect();
            format!("{} (0x{:02X})", bitmap, data)
        }
    }
}

/// Intensity level (low nibble) as a duty-cycle fraction.
pub fn render_intensity(data: u8, device_type: DeviceType) -> String {
    let level = data & 0x0F;
    match device_type {
        DeviceType::Max7219 => {
            let step = 2 * u32::from(level) + 1;
            match level {
                0 => format!("{}/32 (min)", step),
                15 => format!("{}/32 (max)", step),
                _ => format!("{}/32", step),
            }
        }
        DeviceType::Max7221 => {
            let step = u32::from(level) + 1;
            match step {
                1 => format!("{}/16 (min)", step),
                16 => format!("{}/16 (max)", step),
                _ => format!("{}/16", step),
            }
        }
    }
}

/// Number of digits scanned: low three bits plus one.
pub fn scan_limit_digits(data: u8) -> u8 {
    (data & 0x07) + 1
}

pub fn render_scan_limit(data: u8) -> String {
    match scan_limit_digits(data) {
        1 => "1 digit".to_string(),
        n => format!("{} digits", n),
    }
}

pub fn render_shutdown(data: u8) -> String {
    if data & 0x01 != 0 {
        "normal operation".to_string()
    } else {
        "shutdown".to_string()
    }
}

pub fn render_display_test(data: u8) -> String {
    if data & 0x01 != 0 {
        "on".to_string()
    } else {
        "off".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_digits_take_priority() {
        for address in 1..=8u8 {
            assert_eq!(classify(address), WriteTarget::Digit(address));
            // Upper nibble is ignored
            assert_eq!(classify(address | 0xF0), WriteTarget::Digit(address));
        }
    }

    #[test]
    fn test_classify_registers_and_invalid() {
        for address in 0..16u8 {
            let target = classify(address);
            match address {
                1..=8 => assert!(matches!(target, WriteTarget::Digit(_))),
                0x00 | 0x09 | 0x0A | 0x0B | 0x0C | 0x0F => {
                    assert_eq!(target.kind(), AnnotationKind::Register);
                    if let WriteTarget::Register(register) = target {
                        assert_eq!(register.address(), address);
                    }
                }
                _ => assert_eq!(target, WriteTarget::Invalid(address)),
            }
        }
    }

    #[test]
    fn test_register_table_roundtrip() {
        for register in Register::ALL {
            assert_eq!(Register::from_address(register.address()), Some(register));
        }
    }

    #[test]
    fn test_intensity_max7219() {
        assert_eq!(render_intensity(0x00, DeviceType::Max7219), "1/32 (min)");
        assert_eq!(render_intensity(0x08, DeviceType::Max7219), "17/32");
        assert_eq!(render_intensity(0x0F, DeviceType::Max7219), "31/32 (max)");
        // Upper nibble ignored
        assert_eq!(render_intensity(0xF8, DeviceType::Max7219), "17/32");
    }

    #[test]
    fn test_intensity_max7221() {
        assert_eq!(render_intensity(0x00, DeviceType::Max7221), "1/16 (min)");
        assert_eq!(render_intensity(0x07, DeviceType::Max7221), "8/16");
        assert_eq!(render_intensity(0x0F, DeviceType::Max7221), "16/16 (max)");
    }

    #[test]
    fn test_decode_mode() {
        assert_eq!(render_decode_mode(0x00), "No Decode");
        assert_eq!(render_decode_mode(0xFF), "CODE B Decode");
        assert_eq!(render_decode_mode(0x0F), "....BBBB (0x0F)");
        assert_eq!(render_decode_mode(0x81), "B......B (0x81)");
    }

    #[test]
    fn test_scan_limit_shutdown_test() {
        assert_eq!(render_scan_limit(0x00), "1 digit");
        assert_eq!(render_scan_limit(0x07), "8 digits");
        assert_eq!(render_scan_limit(0xFB), "4 digits");
        assert_eq!(render_shutdown(0x01), "normal operation");
        assert_eq!(render_shutdown(0xFE), "shutdown");
        assert_eq!(render_display_test(0x01), "on");
        assert_eq!(render_display_test(0x00), "off");
    }

    #[test]
    fn test_interpret_register() {
        let it = interpret(0x0A, 0x08, DeviceType::Max7219);
        assert_eq!(it.kind, AnnotationKind::Register);
        assert_eq!(it.texts[0], "Intensity: 17/32");

        let it = interpret(0x00, 0x5A, DeviceType::Max7219);
        assert_eq!(it.texts[0], "No-op");
    }

    #[test]
    fn test_interpret_invalid() {
        let it = interpret(0x0D, 0x00, DeviceType::Max7219);
        assert_eq!(it.kind, AnnotationKind::Invalid);
        assert_eq!(it.texts[0], "Invalid register 0xD");
    }

    #[test]
    fn test_interpret_digit_texts() {
        let it = interpret(0x03, 0x81, DeviceType::Max7221);
        assert_eq!(
            it.texts,
            vec!["Digit 3: 1.", "D3: 1.", "@81", "Segments: G DP"]
        );
    }

    #[test]
    fn test_every_value_interprets() {
        for address in 0..=255u8 {
            for data in [0x00, 0x01, 0x7F, 0x80, 0xFF] {
                let it = interpret(address, data, DeviceType::Max7219);
                assert!(!it.texts.is_empty());
            }
        }
    }
}
