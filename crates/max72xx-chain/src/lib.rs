#![doc = include_str!("../README.md")]
//! max72xx-chain — decoder for MAX7219 / MAX7221 register writes on a
//! daisy-chained SPI bus
//!
//! The crate sits on top of an SPI framing layer: it is fed chip-select
//! edges and whole bytes ([`TransferEvent`]) and turns them into
//! human-readable [`Annotation`]s.
//!
//! Key pieces:
//! - [`ChainDecoder`] pairs bytes into address/data writes and works out
//!   which chip on the chain each write landed in.
//! - [`chip::register`] classifies addresses and renders register values
//!   (intensity, decode mode, scan limit, shutdown, display test, digits).
//! - [`chip::state::ChainState`] replays writes into per-chip display state.
//! - [`capture`] reads and writes the plain-text capture format used by the
//!   command line tools.
//!
//! Example: annotating a capture
//!
//! ```rust
//! use max72xx_chain::{Annotation, AnnotationKind, ChainConfig, ChainDecoder, DeviceType};
//! use max72xx_chain::capture::parse_capture;
//!
//! let capture = "\
//! cs 0 1
//! data 10 17 0x0A
//! data 18 25 0x08
//! cs 30 0
//! ";
//! let events = parse_capture(capture).unwrap();
//!
//! let config = ChainConfig::new(DeviceType::Max7219, 1).unwrap();
//! let mut decoder = ChainDecoder::new(config);
//! let mut annotations: Vec<Annotation> = Vec::new();
//! decoder.decode_all(events, &mut annotations);
//!
//! assert_eq!(annotations[0].kind, AnnotationKind::Register);
//! assert_eq!(annotations[0].text(), "Intensity: 17/32");
//! assert_eq!(annotations[1].text(), "Device 1");
//! ```
mod annotation;
pub mod capture;
pub mod chip;
mod config;
mod decoder;
mod error;
mod event;

pub use annotation::{Annotation, AnnotationKind, AnnotationSink, FnSink};
pub use config::{ChainConfig, DeviceType};
pub use decoder::{ChainDecoder, RegisterWrite};
pub use error::{ConfigError, ParseError, ParseErrorKind};
pub use event::{Timestamp, TransferEvent};
