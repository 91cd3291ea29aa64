//! tmchain Hardware Abstraction Layer
//!
//! This crate defines the transport traits the TMC2130 chain driver talks
//! through. Platform crates implement them for a concrete bus, GPIO and
//! serial stack, and tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tmchain-drivers (chain, probe, motion) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tmchain-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tmchain-hal-  │       │  test mocks   │
//! │    linux      │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - Full-duplex chain transfers
//! - [`gpio::DigitalPin`] - Digital I/O with a fixed direction
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the motion controller

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{ensure_direction, DigitalPin, PinDirection, PinError};
pub use spi::{SpiBus, SpiConfig};
pub use uart::{UartConfig, UartRx, UartTx};
