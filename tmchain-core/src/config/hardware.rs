//! Hardware configuration types
//!
//! These types describe the pins wired to each chained driver and the
//! register values it should be configured with.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registers::WRITEABLE_COUNT;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO line offset on the chip
    pub pin: u32,
    /// Pin is active-low (inverted)
    #[cfg_attr(feature = "serde", serde(default))]
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u32) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u32) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Initial value for one register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterSetting {
    /// Register address (without the write bit)
    pub address: u8,
    /// Register value
    pub value: u32,
}

impl RegisterSetting {
    /// Create a register setting
    pub const fn new(address: u8, value: u32) -> Self {
        Self { address, value }
    }
}

/// Pins and settings of one chained driver
///
/// `step` is required when the chain pulses step pins directly. With the
/// serial motion link only the diagnostic pins are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceDescriptor {
    /// STEP pin
    pub step: Option<PinConfig>,
    /// DIR pin; without it direction is switched through GCONF over SPI
    pub dir: Option<PinConfig>,
    /// DIAG0 output of the driver
    pub diag0: Option<PinConfig>,
    /// DIAG1 output of the driver
    pub diag1: Option<PinConfig>,
    /// Register values applied after the power-on probe
    pub registers: Vec<RegisterSetting, WRITEABLE_COUNT>,
}

impl DeviceDescriptor {
    /// Descriptor for a driver pulsed through `step`
    pub fn with_step(step: PinConfig) -> Self {
        Self {
            step: Some(step),
            ..Self::default()
        }
    }
}
