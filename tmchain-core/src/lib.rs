//! Board-agnostic core logic for TMC2130 daisy chains
//!
//! This crate contains everything that does not touch a transport:
//!
//! - TMC2130 register map and power-on defaults
//! - Per-device register shadow with last-committed snapshots
//! - SPI status byte decoding
//! - Chain configuration types
//! - Step ramp planning for direct step-pin motion

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod registers;
pub mod shadow;
pub mod status;

pub use registers::{RegisterSet, WRITEABLE_COUNT, WRITE_BIT};
pub use shadow::{DeviceShadow, ShadowError, ShadowStore, MAX_DEVICES};
pub use status::SpiStatus;
