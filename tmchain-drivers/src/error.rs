//! Driver errors and warnings

use core::fmt;

use tmchain_core::ShadowError;
use tmchain_hal::PinError;

/// Errors from chain and motion operations
///
/// `E` is the transport error shared by the chain's SPI bus and its
/// motion driver. Transport errors are passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus, pin or serial transport failed
    Transport(E),
    /// Device index is outside the chain
    InvalidDevice { index: usize, count: usize },
    /// Address is not a writeable register
    InvalidRegister(u8),
    /// Chain length is zero or too long
    InvalidChainLength(usize),
    /// Device did not answer the power-on probe
    DeviceUnreachable(usize),
    /// Pin used against the direction it was opened with
    WrongDirection,
    /// Number of moves differs from the number of devices
    LengthMismatch { expected: usize, actual: usize },
    /// Motion controller did not acknowledge a frame
    ///
    /// `received` holds the unexpected byte, or `None` on timeout.
    Protocol { received: Option<u8> },
    /// Direct stepping needs a nonzero speed for a move with steps
    InvalidSpeed { device: usize },
}

impl<E> From<ShadowError> for Error<E> {
    fn from(error: ShadowError) -> Self {
        match error {
            ShadowError::InvalidDevice { index, count } => Error::InvalidDevice { index, count },
            ShadowError::InvalidRegister(address) => Error::InvalidRegister(address),
            ShadowError::InvalidChainLength(count) => Error::InvalidChainLength(count),
        }
    }
}

impl<E> From<PinError<E>> for Error<E> {
    fn from(error: PinError<E>) -> Self {
        match error {
            PinError::WrongDirection => Error::WrongDirection,
            PinError::Io(e) => Error::Transport(e),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::InvalidDevice { index, count } => {
                write!(f, "device {} out of range for a chain of {}", index, count)
            }
            Error::InvalidRegister(address) => {
                write!(f, "register {:#04x} is not writeable", address)
            }
            Error::InvalidChainLength(count) => write!(f, "invalid chain length {}", count),
            Error::DeviceUnreachable(device) => write!(f, "device {} is unreachable", device),
            Error::WrongDirection => write!(f, "pin used against its direction"),
            Error::LengthMismatch { expected, actual } => {
                write!(f, "expected {} moves, got {}", expected, actual)
            }
            Error::Protocol { received: Some(byte) } => {
                write!(f, "expected acknowledgment, received {:#04x}", byte)
            }
            Error::Protocol { received: None } => {
                write!(f, "no acknowledgment before timeout")
            }
            Error::InvalidSpeed { device } => {
                write!(f, "move for device {} has steps but zero speed", device)
            }
        }
    }
}

/// Non-fatal conditions found by the power-on probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Warning {
    /// Device status flag was set, so power-on defaults cannot be assumed
    PossiblyDesynced(usize),
}
