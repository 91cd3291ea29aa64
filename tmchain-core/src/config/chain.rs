//! Chain configuration types
//!
//! A [`ChainConfig`] names the SPI device the chain hangs off, how motion
//! is issued, and one [`DeviceDescriptor`] per chained driver in wiring
//! order (device 0 is the driver attached to the controller's MOSI).

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::DeviceDescriptor;
use crate::registers;
use crate::shadow::MAX_DEVICES;

/// Maximum length of a device path
pub const MAX_PATH_LEN: usize = 64;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No devices configured
    NoDevices,
    /// More devices than [`MAX_DEVICES`]
    TooManyDevices(usize),
    /// Direct stepping needs a step pin on this device
    MissingStepPin(usize),
    /// Serial motion selected without a serial link section
    MissingSerialLink,
    /// Initial register setting targets a non-writeable register
    InvalidRegister { device: usize, address: u8 },
}

/// SPI bus selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusConfig {
    /// SPI bus number
    pub bus: u8,
    /// Chip-select number on that bus
    pub device: u8,
    /// Clock frequency in Hz (mode is always 3)
    pub frequency: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            device: 0,
            frequency: 1_000_000,
        }
    }
}

/// How motion requests are carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MotionMode {
    /// Pulse each driver's STEP pin from the host
    #[default]
    DirectStep,
    /// Send motion frames to a step-generating microcontroller
    SerialMotion,
}

/// Serial link to the motion controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialLinkConfig {
    /// Serial device path
    pub port: String<MAX_PATH_LEN>,
    /// Baud rate
    pub baudrate: u32,
    /// Read timeout for the acknowledgment in milliseconds
    pub timeout_ms: u32,
}

impl Default for SerialLinkConfig {
    fn default() -> Self {
        let mut port = String::new();
        let _ = port.push_str("/dev/ttyACM0");
        Self {
            port,
            baudrate: 115200,
            timeout_ms: 60_000,
        }
    }
}

/// Whole-chain configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChainConfig {
    /// SPI bus the chain is attached to
    pub spi: BusConfig,
    /// GPIO character device holding the step/dir/diag lines
    pub gpio_chip: String<MAX_PATH_LEN>,
    /// Motion issuance mode
    pub motion: MotionMode,
    /// Serial link, required for [`MotionMode::SerialMotion`]
    pub serial: Option<SerialLinkConfig>,
    /// Devices in chain order
    pub devices: Vec<DeviceDescriptor, MAX_DEVICES>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        let mut gpio_chip = String::new();
        let _ = gpio_chip.push_str("/dev/gpiochip0");
        Self {
            spi: BusConfig::default(),
            gpio_chip,
            motion: MotionMode::default(),
            serial: None,
            devices: Vec::new(),
        }
    }
}

impl ChainConfig {
    /// Number of chained devices
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.devices.is_empty() {
            return Err(ConfigError::NoDevices);
        }
        if self.devices.len() > MAX_DEVICES {
            return Err(ConfigError::TooManyDevices(self.devices.len()));
        }

        match self.motion {
            MotionMode::DirectStep => {
                if let Some(index) = self.devices.iter().position(|d| d.step.is_none()) {
                    return Err(ConfigError::MissingStepPin(index));
                }
            }
            MotionMode::SerialMotion => {
                if self.serial.is_none() {
                    return Err(ConfigError::MissingSerialLink);
                }
            }
        }

        for (device, descriptor) in self.devices.iter().enumerate() {
            if let Some(bad) = descriptor
                .registers
                .iter()
                .find(|s| !registers::is_writeable(s.address))
            {
                return Err(ConfigError::InvalidRegister {
                    device,
                    address: bad.address,
                });
            }
        }

        Ok(())
    }
}
