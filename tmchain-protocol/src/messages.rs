//! Message types for the serial motion protocol

/// Acknowledgment byte sent by the peripheral after accepting a frame
pub const ACK: u8 = b'D';

/// Move for a single device of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMove {
    /// Signed step count; the sign selects the direction
    pub steps: i32,
    /// Maximum speed in steps per second
    pub max_speed: u16,
    /// Acceleration in steps per second squared
    pub acceleration: u16,
}

impl AxisMove {
    /// Create a move
    pub const fn new(steps: i32, max_speed: u16, acceleration: u16) -> Self {
        Self {
            steps,
            max_speed,
            acceleration,
        }
    }

    /// A move of zero steps, used to keep a device idle
    pub const fn idle() -> Self {
        Self::new(0, 0, 0)
    }

    /// Encode into the 8-byte on-wire record
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut record = [0u8; 8];
        record[0..4].copy_from_slice(&self.steps.to_be_bytes());
        record[4..6].copy_from_slice(&self.max_speed.to_be_bytes());
        record[6..8].copy_from_slice(&self.acceleration.to_be_bytes());
        record
    }

    /// Decode from an 8-byte on-wire record
    pub fn from_bytes(record: &[u8; 8]) -> Self {
        Self {
            steps: i32::from_be_bytes([record[0], record[1], record[2], record[3]]),
            max_speed: u16::from_be_bytes([record[4], record[5]]),
            acceleration: u16::from_be_bytes([record[6], record[7]]),
        }
    }
}

/// Reply byte received from the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Frame accepted
    Ack,
    /// Any other byte
    Unexpected(u8),
}

impl Reply {
    /// Classify a received byte
    pub fn from_byte(byte: u8) -> Self {
        if byte == ACK {
            Reply::Ack
        } else {
            Reply::Unexpected(byte)
        }
    }
}
