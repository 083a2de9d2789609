//! State events emitted by [`ChainState`](super::state::ChainState).

/// Notable changes in a device's display state.
///
/// Events are only emitted when a write actually changes the stored value;
/// rewriting the same byte is silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// Shutdown register changed. `normal` is true when the display left
    /// shutdown.
    PowerChanged { device: u32, normal: bool },

    /// Display test mode toggled.
    DisplayTestChanged { device: u32, on: bool },

    /// Decode mode bitmap changed.
    DecodeModeChanged { device: u32, mode: u8 },

    /// A digit row received a new value.
    DigitChanged { device: u32, digit: u8, raw: u8 },
}

impl StateEvent {
    /// Chain position the event belongs to.
    pub fn device(&self) -> u32 {
        match *self {
            StateEvent::PowerChanged { device, .. }
            | StateEvent::DisplayTestChanged { device, .. }
            | StateEvent::DecodeModeChanged { device, .. }
            | StateEvent::DigitChanged { device, .. } => device,
        }
    }
}
