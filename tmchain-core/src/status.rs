//! SPI status byte
//!
//! Every response datagram from a TMC2130 starts with an 8-bit status
//! byte carrying a summary of GSTAT and DRV_STATUS.

/// Reset flag: the chip was reset since GSTAT was last read
pub const RESET_FLAG: u8 = 1 << 0;
/// Driver error: overtemperature or short detected
pub const DRIVER_ERROR: u8 = 1 << 1;
/// StallGuard flag
pub const SG2: u8 = 1 << 2;
/// Motor standstill
pub const STANDSTILL: u8 = 1 << 3;

/// Parsed SPI status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiStatus {
    /// GSTAT reset flag
    pub reset_flag: bool,
    /// GSTAT driver error
    pub driver_error: bool,
    /// StallGuard active
    pub stallguard: bool,
    /// Motor standstill
    pub standstill: bool,
}

impl SpiStatus {
    /// Parse from the raw status byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            reset_flag: byte & RESET_FLAG != 0,
            driver_error: byte & DRIVER_ERROR != 0,
            stallguard: byte & SG2 != 0,
            standstill: byte & STANDSTILL != 0,
        }
    }

    /// Check if any fault condition is present
    pub fn has_fault(&self) -> bool {
        self.driver_error
    }
}
