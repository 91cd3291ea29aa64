//! 40-bit SPI datagrams and chain slot layout

use tmchain_core::{MAX_DEVICES, WRITE_BIT};

/// Bytes per datagram
pub const DATAGRAM_LEN: usize = 5;

/// Bytes in a transaction for the longest supported chain
pub const MAX_CHAIN_BYTES: usize = DATAGRAM_LEN * MAX_DEVICES;

/// One SPI datagram for a single device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datagram([u8; DATAGRAM_LEN]);

impl Datagram {
    /// Filler for devices with nothing to send
    pub const NOOP: Datagram = Datagram([0; DATAGRAM_LEN]);

    /// Build a register write
    pub fn write(address: u8, value: u32) -> Self {
        let v = value.to_be_bytes();
        Datagram([address | WRITE_BIT, v[0], v[1], v[2], v[3]])
    }

    /// Raw bytes, as clocked onto the bus
    pub fn as_bytes(&self) -> &[u8; DATAGRAM_LEN] {
        &self.0
    }

    /// Register address without the write bit
    pub fn address(&self) -> u8 {
        self.0[0] & !WRITE_BIT
    }

    /// Check if this datagram writes a register
    pub fn is_write(&self) -> bool {
        self.0[0] & WRITE_BIT != 0
    }

    /// Payload value
    pub fn value(&self) -> u32 {
        u32::from_be_bytes([self.0[1], self.0[2], self.0[3], self.0[4]])
    }
}

impl From<[u8; DATAGRAM_LEN]> for Datagram {
    fn from(bytes: [u8; DATAGRAM_LEN]) -> Self {
        Datagram(bytes)
    }
}

/// Byte offset of `device`'s slot in a transaction for `device_count` devices
///
/// `device` must be below `device_count`.
pub fn slot_offset(device: usize, device_count: usize) -> usize {
    DATAGRAM_LEN * (device_count - 1 - device)
}
