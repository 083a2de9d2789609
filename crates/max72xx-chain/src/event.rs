//! Input events produced by the upstream SPI framing layer.

/// Sample-based timestamp (position in the capture).
pub type Timestamp = u64;

/// One already-framed bus event.
///
/// The framing layer has done clock recovery and byte assembly; the decoder
/// only sees chip-select edges and whole controller-to-peripheral bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEvent {
    /// Chip-select changed. `asserted` is the logical (active) level.
    Select { asserted: bool, at: Timestamp },

    /// One byte clocked out on the controller-to-peripheral line.
    Data {
        byte: u8,
        start: Timestamp,
        end: Timestamp,
    },
}

impl TransferEvent {
    /// Shorthand for a chip-select edge.
    pub fn select(asserted: bool, at: Timestamp) -> Self {
        TransferEvent::Select { asserted, at }
    }

    /// Shorthand for a byte transfer.
    pub fn data(byte: u8, start: Timestamp, end: Timestamp) -> Self {
        TransferEvent::Data { byte, start, end }
    }

    /// Timestamp at which the event begins.
    pub fn start(&self) -> Timestamp {
        match *self {
            TransferEvent::Select { at, .. } => at,
            TransferEvent::Data { start, .. } => start,
        }
    }
}
