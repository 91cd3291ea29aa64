//! TMC2130 register map
//!
//! Only the writeable configuration registers are shadowed. Their power-on
//! values come from the TMC2130 datasheet (pages 30 and 79 for the
//! microstep table).

/// TMC2130 register addresses
pub mod reg {
    /// General configuration
    pub const GCONF: u8 = 0x00;
    /// Global status flags (read clears)
    pub const GSTAT: u8 = 0x01;
    /// Input pin states
    pub const IOIN: u8 = 0x04;
    /// Hold/run current settings
    pub const IHOLD_IRUN: u8 = 0x10;
    /// Power down delay
    pub const TPOWERDOWN: u8 = 0x11;
    /// Measured time between steps
    pub const TSTEP: u8 = 0x12;
    /// Upper velocity for StealthChop
    pub const TPWMTHRS: u8 = 0x13;
    /// Lower velocity for CoolStep/StallGuard
    pub const TCOOLTHRS: u8 = 0x14;
    /// Velocity threshold for full-step switching
    pub const THIGH: u8 = 0x15;
    /// Direct coil current control
    pub const XDIRECT: u8 = 0x2D;
    /// DcStep minimum velocity
    pub const VDCMIN: u8 = 0x33;
    /// Microstep table entry 0
    pub const MSLUT0: u8 = 0x60;
    /// Microstep table entry 1
    pub const MSLUT1: u8 = 0x61;
    /// Microstep table segment selection
    pub const MSLUTSEL: u8 = 0x68;
    /// Microstep table start values
    pub const MSLUTSTART: u8 = 0x69;
    /// Microstep counter
    pub const MSCNT: u8 = 0x6A;
    /// Chopper configuration
    pub const CHOPCONF: u8 = 0x6C;
    /// CoolStep configuration
    pub const COOLCONF: u8 = 0x6D;
    /// DcStep configuration
    pub const DCCTRL: u8 = 0x6E;
    /// Driver status
    pub const DRV_STATUS: u8 = 0x6F;
    /// StealthChop PWM configuration
    pub const PWMCONF: u8 = 0x70;
    /// Encoder mode
    pub const ENCM_CTRL: u8 = 0x72;
}

/// GCONF bit fields used by the driver
pub mod gconf {
    /// Invert motor direction
    pub const SHAFT: u32 = 1 << 4;
}

/// Address bit marking a datagram as a write
pub const WRITE_BIT: u8 = 0x80;

/// Number of shadowed registers
pub const WRITEABLE_COUNT: usize = 14;

/// Writeable registers and their power-on values, in commit order
pub const DEFAULTS: [(u8, u32); WRITEABLE_COUNT] = [
    (reg::GCONF, 0),
    (reg::IHOLD_IRUN, 0),
    (reg::TPOWERDOWN, 0),
    (reg::TPWMTHRS, 0),
    (reg::TCOOLTHRS, 0),
    (reg::THIGH, 0),
    (reg::XDIRECT, 0),
    (reg::VDCMIN, 0),
    (reg::CHOPCONF, 0),
    (reg::COOLCONF, 0),
    (reg::DCCTRL, 0),
    (reg::ENCM_CTRL, 0),
    (reg::MSLUT0, 0xAAAA_B554),
    (reg::MSLUT1, 0x4A95_54AA),
];

/// Position of `address` in [`DEFAULTS`], if it is writeable
pub fn index_of(address: u8) -> Option<usize> {
    DEFAULTS.iter().position(|&(a, _)| a == address)
}

/// Check if `address` is a shadowed writeable register
pub fn is_writeable(address: u8) -> bool {
    index_of(address).is_some()
}

/// Power-on value of a writeable register
pub fn default_value(address: u8) -> Option<u32> {
    index_of(address).map(|i| DEFAULTS[i].1)
}

/// Values for every writeable register
///
/// Values live in a fixed array indexed like [`DEFAULTS`], so two sets
/// always cover exactly the same addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterSet {
    values: [u32; WRITEABLE_COUNT],
}

impl Default for RegisterSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RegisterSet {
    /// A fresh set holding the power-on values
    pub fn defaults() -> Self {
        let mut values = [0u32; WRITEABLE_COUNT];
        for (slot, &(_, value)) in values.iter_mut().zip(DEFAULTS.iter()) {
            *slot = value;
        }
        Self { values }
    }

    /// Value of `address`, or `None` if it is not writeable
    pub fn get(&self, address: u8) -> Option<u32> {
        index_of(address).map(|i| self.values[i])
    }

    /// Mutable access to `address`, or `None` if it is not writeable
    pub fn get_mut(&mut self, address: u8) -> Option<&mut u32> {
        match index_of(address) {
            Some(i) => Some(&mut self.values[i]),
            None => None,
        }
    }

    /// All `(address, value)` pairs in commit order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        DEFAULTS
            .iter()
            .zip(self.values.iter())
            .map(|(&(address, _), &value)| (address, value))
    }

    /// Check if every register holds its power-on value
    pub fn is_default(&self) -> bool {
        *self == Self::defaults()
    }
}
