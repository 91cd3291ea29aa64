//! TMC2130 stepper drivers on a shared SPI daisy chain
//!
//! # SPI chain
//!
//! Every TMC2130 is a 40-bit shift register. With `n` chips chained, one
//! transaction clocks `5 * n` bytes through all of them and each chip
//! latches the last 40 bits it holds when chip select rises.
//!
//! Device 0 is the chip wired to the controller's MOSI, so it holds the
//! bytes clocked out last. The buffer therefore lists the last device
//! first:
//!
//! ```text
//!  byte:  0      5            5(n-1)   5n
//!         │dev n-1│dev n-2│ … │ dev 0  │
//! ```
//!
//! Each slot carries one datagram, `[address | 0x80, value big-endian]`
//! for a write. Devices with nothing to send get the all-zero no-op.
//! Responses use the same slots; their first byte is the chip's status.
//!
//! # Power-on probe
//!
//! Constructing a [`Tmc2130Chain`] runs the probe before anything else,
//! see [`probe`](probe::probe).

mod chain;
mod datagram;
pub mod probe;

pub use chain::Tmc2130Chain;
pub use datagram::{slot_offset, Datagram, DATAGRAM_LEN, MAX_CHAIN_BYTES};
pub use probe::ProbeReport;
