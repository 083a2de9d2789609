//! Decode session configuration.
//!
//! A [`ChainConfig`] is built once before the first event and never changes
//! for the life of a [`ChainDecoder`](crate::ChainDecoder). Validation happens
//! here so the per-event path never has to re-check it.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Driver chip family.
///
/// The two parts share the register map; they differ only in how the
/// intensity register maps onto a PWM duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    /// Intensity is reported in 32 odd steps (`2 * level + 1` / 32).
    #[default]
    Max7219,
    /// Intensity is reported in 16 steps (`level + 1` / 16).
    Max7221,
}

impl DeviceType {
    /// Canonical upper-case part name.
    pub fn name(self) -> &'static str {
        match self {
            DeviceType::Max7219 => "MAX7219",
            DeviceType::Max7221 => "MAX7221",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceType {
    type Err = ConfigError;

    /// Accepts `MAX7219`, `max7219` or the bare part number `7219`
    /// (likewise for the 7221).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let number = upper.strip_prefix("MAX").unwrap_or(&upper);
        match number {
            "7219" => Ok(DeviceType::Max7219),
            "7221" => Ok(DeviceType::Max7221),
            _ => Err(ConfigError::UnknownDeviceType(trimmed.to_string())),
        }
    }
}

/// Chain configuration: the chip family and how many chips share the
/// chip-select line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    device_type: DeviceType,
    chain_length: u32,
}

impl ChainConfig {
    /// Create a validated configuration.
    ///
    /// Returns `Err(ConfigError::ZeroChainLength)` if `chain_length` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use max72xx_chain::{ChainConfig, DeviceType};
    ///
    /// let config = ChainConfig::new(DeviceType::Max7221, 4).unwrap();
    /// assert_eq!(config.chain_length(), 4);
    /// assert!(ChainConfig::new(DeviceType::Max7219, 0).is_err());
    /// ```
    pub fn new(device_type: DeviceType, chain_length: u32) -> Result<Self, ConfigError> {
        if chain_length == 0 {
            return Err(ConfigError::ZeroChainLength);
        }
        Ok(Self {
            device_type,
            chain_length,
        })
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Number of chips in the daisy chain (always at least 1).
    pub fn chain_length(&self) -> u32 {
        self.chain_length
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            device_type: DeviceType::default(),
            chain_length: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_from_str() {
        assert_eq!("MAX7219".parse::<DeviceType>(), Ok(DeviceType::Max7219));
        assert_eq!("max7221".parse::<DeviceType>(), Ok(DeviceType::Max7221));
        assert_eq!(" 7221 ".parse::<DeviceType>(), Ok(DeviceType::Max7221));
        assert_eq!(
            "MAX7220".parse::<DeviceType>(),
            Err(ConfigError::UnknownDeviceType("MAX7220".to_string()))
        );
    }

    #[test]
    fn test_device_type_display_roundtrip() {
        for ty in [DeviceType::Max7219, DeviceType::Max7221] {
            assert_eq!(ty.to_string().parse::<DeviceType>(), Ok(ty));
        }
    }

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.device_type(), DeviceType::Max7219);
        assert_eq!(config.chain_length(), 1);
    }

    #[test]
    fn test_zero_chain_length_rejected() {
        assert_eq!(
            ChainConfig::new(DeviceType::Max7219, 0),
            Err(ConfigError::ZeroChainLength)
        );
    }
}
