//! MAX7219 / MAX7221 register map, digit fonts and display state tracking.
pub mod event;
pub mod font;
pub mod register;
pub mod state;

pub use register::{Register, WriteTarget};
