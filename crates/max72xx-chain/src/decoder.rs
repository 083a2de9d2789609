//! Frame tracker: pairs bytes into register writes and tracks the chain
//! position of each write.
//!
//! Chips in a daisy chain share one chip-select line. While it is asserted
//! every chip shifts 16 bits through to the next one, and each chip latches
//! whatever sits in its shift register when chip-select is released. The
//! first write of a transfer therefore ends up in the chip furthest from the
//! controller (position `N`), the last one in the nearest chip (position 1).
//!
//! # Examples
//!
//! ```
//! use max72xx_chain::{Annotation, AnnotationKind, ChainConfig, ChainDecoder, DeviceType, TransferEvent};
//!
//! let config = ChainConfig::new(DeviceType::Max7219, 2).unwrap();
//! let mut decoder = ChainDecoder::new(config);
//! let mut annotations: Vec<Annotation> = Vec::new();
//!
//! decoder.decode_all(
//!     [
//!         TransferEvent::select(true, 0),
//!         TransferEvent::data(0x0F, 10, 17),
//!         TransferEvent::data(0x01, 18, 25),
//!         TransferEvent::data(0x0F, 26, 33),
//!         TransferEvent::data(0x00, 34, 41),
//!         TransferEvent::select(false, 50),
//!     ],
//!     &mut annotations,
//! );
//!
//! let devices: Vec<&str> = annotations
//!     .iter()
//!     .filter(|a| a.kind == AnnotationKind::Device)
//!     .map(|a| a.text())
//!     .collect();
//! assert_eq!(devices, ["Device 2", "Device 1"]);
//! ```

use crate::annotation::{Annotation, AnnotationKind, AnnotationSink};
use crate::chip::register::{self, ADDRESS_MASK, WriteTarget};
use crate::config::ChainConfig;
use crate::event::{Timestamp, TransferEvent};

/// A completed address/data write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Chain position that received the write (1-based).
    pub device: u32,
    /// Sanitized (low nibble) address.
    pub address: u8,
    pub data: u8,
    pub target: WriteTarget,
    /// Start of the address byte.
    pub start: Timestamp,
    /// End of the data byte.
    pub end: Timestamp,
}

/// Address byte waiting for its data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAddress {
    byte: u8,
    start: Timestamp,
}

/// Position within a selected transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    AwaitingAddress,
    AwaitingData(PendingAddress),
}

/// Decoder for one capture session.
#[derive(Debug, Clone)]
pub struct ChainDecoder {
    config: ChainConfig,
    selected: bool,
    position: Position,
    device_index: u32,
    transfer_start: Option<Timestamp>,
}

impl ChainDecoder {
    /// Create a decoder. The bus starts deselected; bytes are ignored until
    /// the first chip-select assertion.
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            selected: false,
            position: Position::AwaitingAddress,
            device_index: config.chain_length(),
            transfer_start: None,
        }
    }

    /// Return to the freshly constructed state.
    pub fn reset(&mut self) {
        log::debug!("decoder reset");
        *self = Self::new(self.config);
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Chain position the next completed write will be attributed to.
    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    /// Timestamp of the most recent chip-select assertion.
    pub fn transfer_start(&self) -> Option<Timestamp> {
        self.transfer_start
    }

    /// Whether an address byte is waiting for its data byte.
    pub fn has_pending_address(&self) -> bool {
        matches!(self.position, Position::AwaitingData(_))
    }

    /// Feed one event.
    ///
    /// When the event completes a write, the write annotation and its device
    /// annotation are emitted to `sink` and the write is returned.
    pub fn decode<S>(&mut self, event: TransferEvent, sink: &mut S) -> Option<RegisterWrite>
    where
        S: AnnotationSink + ?Sized,
    {
        match event {
            TransferEvent::Select { asserted, at } => {
                self.on_select(asserted, at);
                None
            }
            TransferEvent::Data { byte, start, end } => self.on_data(byte, start, end, sink),
        }
    }

    /// Feed a sequence of events, collecting the completed writes.
    pub fn decode_all<I, S>(&mut self, events: I, sink: &mut S) -> Vec<RegisterWrite>
    where
        I: IntoIterator<Item = TransferEvent>,
        S: AnnotationSink + ?Sized,
    {
        events
            .into_iter()
            .filter_map(|event| self.decode(event, sink))
            .collect()
    }

    fn on_select(&mut self, asserted: bool, at: Timestamp) {
        self.selected = asserted;
        if asserted {
            if let Position::AwaitingData(pending) = self.position {
                log::debug!(
                    "discarding address byte 0x{:02X} from {} on reselect",
                    pending.byte,
                    pending.start
                );
            }
            self.position = Position::AwaitingAddress;
            self.device_index = self.config.chain_length();
            self.transfer_start = Some(at);
            log::debug!("chip select asserted at {}", at);
        } else {
            log::debug!("chip select released at {}", at);
        }
    }

    fn on_data<S>(
        &mut self,
        byte: u8,
        start: Timestamp,
        end: Timestamp,
        sink: &mut S,
    ) -> Option<RegisterWrite>
    where
        S: AnnotationSink + ?Sized,
    {
        if !self.selected {
            log::trace!("dropping byte 0x{:02X} at {}: bus not selected", byte, start);
            return None;
        }

        match self.position {
            Position::AwaitingAddress => {
                self.position = Position::AwaitingData(PendingAddress { byte, start });
                None
            }
            Position::AwaitingData(pending) => {
                self.position = Position::AwaitingAddress;
                Some(self.complete(pending, byte, end, sink))
            }
        }
    }

    fn complete<S>(
        &mut self,
        pending: PendingAddress,
        data: u8,
        end: Timestamp,
        sink: &mut S,
    ) -> RegisterWrite
    where
        S: AnnotationSink + ?Sized,
    {
        let address = pending.byte & ADDRESS_MASK;
        let interpretation = register::interpret(address, data, self.config.device_type());
        let device = self.device_index;

        log::trace!(
            "device {} write 0x{:X}=0x{:02X} ({:?})",
            device,
            address,
            data,
            interpretation.target
        );

        let write = RegisterWrite {
            device,
            address,
            data,
            target: interpretation.target,
            start: pending.start,
            end,
        };

        sink.emit(Annotation::new(
            interpretation.kind,
            pending.start,
            end,
            interpretation.texts,
        ));
        sink.emit(Annotation::new(
            AnnotationKind::Device,
            pending.start,
            end,
            vec![format!("Device {}", device), format!("D{}", device)],
        ));

        self.device_index -= 1;
        if self.device_index == 0 {
            self.device_index = self.config.chain_length();
        }

        write
    }
}

impl Default for ChainDecoder {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}
