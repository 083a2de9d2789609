//! Per-device display state tracking.
//!
//! A [`ChainState`] replays completed [`RegisterWrite`]s into one
//! [`DeviceState`] per chip so the final content of every display can be
//! reconstructed from a capture.
//!
//! # Examples
//!
//! ```
//! use max72xx_chain::chip::state::ChainState;
//! use max72xx_chain::chip::event::StateEvent;
//! use max72xx_chain::{Annotation, ChainConfig, ChainDecoder, DeviceType, TransferEvent};
//!
//! let config = ChainConfig::new(DeviceType::Max7219, 1).unwrap();
//! let mut decoder = ChainDecoder::new(config);
//! let mut state = ChainState::new(config.chain_length());
//! let mut annotations: Vec<Annotation> = Vec::new();
//!
//! let events = [
//!     TransferEvent::select(true, 0),
//!     TransferEvent::data(0x0C, 1, 8),
//!     TransferEvent::data(0x01, 9, 16),
//! ];
//! for event in events {
//!     if let Some(write) = decoder.decode(event, &mut annotations) {
//!         if let Some(evs) = state.apply(&write) {
//!             assert_eq!(evs[0], StateEvent::PowerChanged { device: 1, normal: true });
//!         }
//!     }
//! }
//! assert!(!state.device(1).unwrap().is_shutdown());
//! ```

use super::event::StateEvent;
use super::font;
use super::register::{self, FIRST_DIGIT, LAST_DIGIT, Register, WriteTarget};
use crate::decoder::RegisterWrite;

/// Number of addressable registers (4-bit address space).
const REGISTER_COUNT: usize = 16;

/// Register file and derived view of one chip.
///
/// Getters report datasheet power-up values for registers that have not been
/// written: shutdown mode, display test off, no decode, minimum intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    device: u32,
    registers: [Option<u8>; REGISTER_COUNT],
}

impl DeviceState {
    /// Create an empty state for the chip at chain position `device`.
    pub fn new(device: u32) -> Self {
        Self {
            device,
            registers: [None; REGISTER_COUNT],
        }
    }

    /// Chain position (1-based).
    pub fn device(&self) -> u32 {
        self.device
    }

    /// Last value written to a register, if any.
    pub fn read_register(&self, address: u8) -> Option<u8> {
        self.registers[usize::from(address & register::ADDRESS_MASK)]
    }

    fn read_control(&self, register: Register) -> Option<u8> {
        self.read_register(register.address())
    }

    /// Number of registers that have been written.
    pub fn written_count(&self) -> usize {
        self.registers.iter().filter(|r| r.is_some()).count()
    }

    pub fn decode_mode(&self) -> u8 {
        self.read_control(Register::DecodeMode).unwrap_or(0x00)
    }

    /// Whether `digit` (1..=8) is rendered through the Code B font.
    pub fn is_code_b(&self, digit: u8) -> bool {
        (FIRST_DIGIT..=LAST_DIGIT).contains(&digit)
            && self.decode_mode() & (1 << (digit - FIRST_DIGIT)) != 0
    }

    /// Intensity level, 0..=15.
    pub fn intensity_level(&self) -> u8 {
        self.read_control(Register::Intensity).unwrap_or(0) & 0x0F
    }

    /// Number of scanned digits, 1..=8. `None` until the scan limit register
    /// has been written.
    pub fn scan_limit(&self) -> Option<u8> {
        self.read_control(Register::ScanLimit)
            .map(register::scan_limit_digits)
    }

    pub fn is_shutdown(&self) -> bool {
        self.read_control(Register::Shutdown)
            .is_none_or(|v| v & 0x01 == 0)
    }

    pub fn is_display_test(&self) -> bool {
        self.read_control(Register::DisplayTest)
            .is_some_and(|v| v & 0x01 != 0)
    }

    /// Raw value of digit row 1..=8.
    pub fn digit(&self, digit: u8) -> Option<u8> {
        if (FIRST_DIGIT..=LAST_DIGIT).contains(&digit) {
            self.read_register(digit)
        } else {
            None
        }
    }

    /// Render one digit according to the current decode mode.
    ///
    /// Code B digits show the glyph (plus `.`); no-decode digits list their
    /// lit segments. Unwritten digits render as `_`.
    pub fn digit_text(&self, digit: u8) -> String {
        match self.digit(digit) {
            None => "_".to_string(),
            Some(raw) if self.is_code_b(digit) => font::code_b_text(raw),
            Some(raw) => format!("{{{}}}", font::segments_text(raw)),
        }
    }

    /// Render the scanned digits left to right (highest digit first).
    ///
    /// All eight digits are shown while the scan limit is unknown.
    pub fn display_text(&self) -> String {
        let scanned = self.scan_limit().unwrap_or(LAST_DIGIT);
        (FIRST_DIGIT..=scanned)
            .rev()
            .map(|digit| format!("[{}]", self.digit_text(digit)))
            .collect()
    }

    fn store(&mut self, address: u8, value: u8) -> Option<u8> {
        self.registers[usize::from(address & register::ADDRESS_MASK)].replace(value)
    }

    fn clear(&mut self) {
        self.registers = [None; REGISTER_COUNT];
    }
}

/// Display state for every chip on the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainState {
    devices: Vec<DeviceState>,
}

impl ChainState {
    /// Track a chain of `chain_length` devices (positions `1..=chain_length`).
    pub fn new(chain_length: u32) -> Self {
        Self {
            devices: (1..=chain_length).map(DeviceState::new).collect(),
        }
    }

    pub fn chain_length(&self) -> u32 {
        self.devices.len() as u32
    }

    /// State of the device at chain position `device` (1-based).
    pub fn device(&self, device: u32) -> Option<&DeviceState> {
        let index = device.checked_sub(1)? as usize;
        self.devices.get(index)
    }

    /// All devices, position 1 first.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceState> {
        self.devices.iter()
    }

    /// Forget every written register.
    pub fn reset(&mut self) {
        for device in &mut self.devices {
            device.clear();
        }
    }

    /// Apply a completed write.
    ///
    /// Returns `Some(events)` when the write changed something notable.
    /// No-op and invalid-address writes are not stored.
    pub fn apply(&mut self, write: &RegisterWrite) -> Option<Vec<StateEvent>> {
        let device = write.device;
        let Some(state) = device
            .checked_sub(1)
            .and_then(|index| self.devices.get_mut(index as usize))
        else {
            log::warn!(
                "write for device {} outside chain of {}",
                device,
                self.devices.len()
            );
            return None;
        };

        let data = write.data;
        let event = match write.target {
            WriteTarget::Digit(digit) => {
                let previous = state.store(digit, data);
                (previous != Some(data)).then_some(StateEvent::DigitChanged {
                    device,
                    digit,
                    raw: data,
                })
            }
            WriteTarget::Register(Register::NoOp) | WriteTarget::Invalid(_) => None,
            WriteTarget::Register(Register::DecodeMode) => {
                let previous = state.store(Register::DecodeMode.address(), data);
                (previous.unwrap_or(0x00) != data)
                    .then_some(StateEvent::DecodeModeChanged { device, mode: data })
            }
            WriteTarget::Register(Register::Shutdown) => {
                let was_shutdown = state.is_shutdown();
                state.store(Register::Shutdown.address(), data);
                let normal = !state.is_shutdown();
                (was_shutdown == normal).then_some(StateEvent::PowerChanged { device, normal })
            }
            WriteTarget::Register(Register::DisplayTest) => {
                let was_on = state.is_display_test();
                state.store(Register::DisplayTest.address(), data);
                let on = state.is_display_test();
                (was_on != on).then_some(StateEvent::DisplayTestChanged { device, on })
            }
            WriteTarget::Register(register @ (Register::Intensity | Register::ScanLimit)) => {
                state.store(register.address(), data);
                None
            }
        };

        event.map(|e| vec![e])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(device: u32, address: u8, data: u8) -> RegisterWrite {
        RegisterWrite {
            device,
            address,
            data,
            target: register::classify(address),
            start: 0,
            end: 0,
        }
    }

    #[test]
    fn test_power_up_defaults() {
        let state = DeviceState::new(1);
        assert!(state.is_shutdown());
        assert!(!state.is_display_test());
        assert_eq!(state.decode_mode(), 0);
        assert_eq!(state.intensity_level(), 0);
        assert_eq!(state.scan_limit(), None);
        assert_eq!(state.written_count(), 0);
    }

    #[test]
    fn test_shutdown_events() {
        let mut chain = ChainState::new(1);
        assert_eq!(
            chain.apply(&write(1, 0x0C, 0x01)),
            Some(vec![StateEvent::PowerChanged {
                device: 1,
                normal: true
            }])
        );
        // Same level again is silent
        assert_eq!(chain.apply(&write(1, 0x0C, 0x03)), None);
        assert_eq!(
            chain.apply(&write(1, 0x0C, 0x00)),
            Some(vec![StateEvent::PowerChanged {
                device: 1,
                normal: false
            }])
        );
    }

    #[test]
    fn test_shutdown_write_from_power_up_is_silent() {
        let mut chain = ChainState::new(1);
        assert_eq!(chain.apply(&write(1, 0x0C, 0x00)), None);
        assert_eq!(chain.device(1).unwrap().read_register(0x0C), Some(0x00));
    }

    #[test]
    fn test_display_test_events() {
        let mut chain = ChainState::new(2);
        assert_eq!(
            chain.apply(&write(2, 0x0F, 0x01)),
            Some(vec![StateEvent::DisplayTestChanged { device: 2, on: true }])
        );
        assert!(chain.device(2).unwrap().is_display_test());
        assert!(!chain.device(1).unwrap().is_display_test());
    }

    #[test]
    fn test_digit_events_only_on_change() {
        let mut chain = ChainState::new(1);
        let first = chain.apply(&write(1, 0x02, 0x05));
        assert_eq!(
            first,
            Some(vec![StateEvent::DigitChanged {
                device: 1,
                digit: 2,
                raw: 0x05
            }])
        );
        assert_eq!(chain.apply(&write(1, 0x02, 0x05)), None);
    }

    #[test]
    fn test_noop_and_invalid_are_not_stored() {
        let mut chain = ChainState::new(1);
        assert_eq!(chain.apply(&write(1, 0x00, 0xAA)), None);
        assert_eq!(chain.apply(&write(1, 0x0D, 0xAA)), None);
        assert_eq!(chain.device(1).unwrap().written_count(), 0);
    }

    #[test]
    fn test_out_of_range_device_is_ignored() {
        let mut chain = ChainState::new(2);
        assert_eq!(chain.apply(&write(3, 0x01, 0x01)), None);
        assert_eq!(chain.apply(&write(0, 0x01, 0x01)), None);
        assert!(chain.device(0).is_none());
        assert!(chain.device(3).is_none());
    }

    #[test]
    fn test_display_text_mixed_decode() {
        let mut chain = ChainState::new(1);
        chain.apply(&write(1, 0x0B, 0x02)); // 3 digits
        chain.apply(&write(1, 0x09, 0x03)); // Code B on digits 1 and 2
        chain.apply(&write(1, 0x01, 0x04));
        chain.apply(&write(1, 0x02, 0x82));
        chain.apply(&write(1, 0x03, 0x30));
        let device = chain.device(1).unwrap();
        assert_eq!(device.scan_limit(), Some(3));
        assert!(device.is_code_b(1));
        assert!(!device.is_code_b(3));
        assert_eq!(device.display_text(), "[{B C}][2.][4]");
    }

    #[test]
    fn test_display_text_unwritten_digits() {
        let state = DeviceState::new(1);
        assert_eq!(state.display_text(), "[_]".repeat(8));
    }

    #[test]
    fn test_reset_clears_all_devices() {
        let mut chain = ChainState::new(2);
        chain.apply(&write(1, 0x0A, 0x05));
        chain.apply(&write(2, 0x0A, 0x07));
        chain.reset();
        assert!(chain.devices().all(|d| d.written_count() == 0));
        assert_eq!(chain.chain_length(), 2);
    }
}
