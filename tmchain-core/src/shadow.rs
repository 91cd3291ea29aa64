//! Register shadow store
//!
//! Each device keeps the register values the caller wants (`registers`)
//! next to the values most recently sent over the bus (`last_committed`).
//! Only the chain driver's commit moves values from one to the other.

use heapless::Vec;

use crate::config::RegisterSetting;
use crate::registers::{RegisterSet, WRITEABLE_COUNT};

/// Maximum number of devices in one chain
pub const MAX_DEVICES: usize = tmchain_protocol::MAX_AXES;

/// Errors from shadow store access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShadowError {
    /// Device index is outside the chain
    InvalidDevice { index: usize, count: usize },
    /// Address is not a writeable register
    InvalidRegister(u8),
    /// Chain length is zero or above [`MAX_DEVICES`]
    InvalidChainLength(usize),
}

/// Register shadow of one chained device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceShadow {
    registers: RegisterSet,
    last_committed: RegisterSet,
}

impl DeviceShadow {
    /// Create a shadow with both sets at their power-on values
    pub fn new() -> Self {
        Self {
            registers: RegisterSet::defaults(),
            last_committed: RegisterSet::defaults(),
        }
    }

    /// Desired register values
    pub fn registers(&self) -> &RegisterSet {
        &self.registers
    }

    /// Register values as of the last commit
    pub fn last_committed(&self) -> &RegisterSet {
        &self.last_committed
    }

    /// Store a desired value for a writeable register
    pub fn set(&mut self, address: u8, value: u32) -> Result<(), ShadowError> {
        let slot = self
            .registers
            .get_mut(address)
            .ok_or(ShadowError::InvalidRegister(address))?;
        *slot = value;
        Ok(())
    }

    /// Return the desired values to power-on defaults
    ///
    /// `last_committed` is left alone, so the next commit resends every
    /// register that differs from what was last transmitted.
    pub fn reset(&mut self) {
        self.registers = RegisterSet::defaults();
    }

    /// Check if any register differs from its last committed value
    pub fn is_dirty(&self) -> bool {
        self.registers != self.last_committed
    }

    /// Collect every changed register and mark it committed
    ///
    /// Registers are recorded as committed before anything is transmitted.
    /// The chain offers no per-register acknowledgment, so a failed
    /// transfer leaves them marked committed.
    pub fn take_pending(&mut self) -> Vec<(u8, u32), WRITEABLE_COUNT> {
        let mut pending = Vec::new();
        for (address, value) in self.registers.iter() {
            if let Some(committed) = self.last_committed.get_mut(address) {
                if *committed != value {
                    *committed = value;
                    // Cannot overflow: at most one entry per register
                    let _ = pending.push((address, value));
                }
            }
        }
        pending
    }
}

/// Register shadows for every device of a chain, in chain order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShadowStore {
    devices: Vec<DeviceShadow, MAX_DEVICES>,
}

impl ShadowStore {
    /// Create shadows for `device_count` devices at power-on defaults
    pub fn new(device_count: usize) -> Result<Self, ShadowError> {
        if device_count == 0 || device_count > MAX_DEVICES {
            return Err(ShadowError::InvalidChainLength(device_count));
        }
        let mut devices = Vec::new();
        for _ in 0..device_count {
            let _ = devices.push(DeviceShadow::new());
        }
        Ok(Self { devices })
    }

    /// Number of devices in the chain
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Shadow of one device
    pub fn device(&self, index: usize) -> Result<&DeviceShadow, ShadowError> {
        let count = self.devices.len();
        self.devices
            .get(index)
            .ok_or(ShadowError::InvalidDevice { index, count })
    }

    /// Mutable shadow of one device
    pub fn device_mut(&mut self, index: usize) -> Result<&mut DeviceShadow, ShadowError> {
        let count = self.devices.len();
        self.devices
            .get_mut(index)
            .ok_or(ShadowError::InvalidDevice { index, count })
    }

    /// Desired register values of one device
    pub fn registers(&self, index: usize) -> Result<&RegisterSet, ShadowError> {
        self.device(index).map(DeviceShadow::registers)
    }

    /// Last committed register values of one device
    pub fn last_committed(&self, index: usize) -> Result<&RegisterSet, ShadowError> {
        self.device(index).map(DeviceShadow::last_committed)
    }

    /// Store a desired value for one device's register
    pub fn set(&mut self, index: usize, address: u8, value: u32) -> Result<(), ShadowError> {
        self.device_mut(index)?.set(address, value)
    }

    /// Reset one device's desired values to power-on defaults
    pub fn reset(&mut self, index: usize) -> Result<(), ShadowError> {
        self.device_mut(index)?.reset();
        Ok(())
    }

    /// Reset every device's desired values to power-on defaults
    pub fn reset_all(&mut self) {
        for device in self.devices.iter_mut() {
            device.reset();
        }
    }

    /// Apply several register settings to one device
    ///
    /// Every address is checked before any value is stored, so a bad
    /// setting leaves the shadow untouched.
    pub fn apply(&mut self, index: usize, settings: &[RegisterSetting]) -> Result<(), ShadowError> {
        let device = self.device_mut(index)?;
        if let Some(bad) = settings
            .iter()
            .find(|s| device.registers().get(s.address).is_none())
        {
            return Err(ShadowError::InvalidRegister(bad.address));
        }
        for setting in settings {
            device.set(setting.address, setting.value)?;
        }
        Ok(())
    }

    /// Check if any device has uncommitted changes
    pub fn is_dirty(&self) -> bool {
        self.devices.iter().any(DeviceShadow::is_dirty)
    }

    /// Iterate device shadows mutably, in chain order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DeviceShadow> {
        self.devices.iter_mut()
    }
}
