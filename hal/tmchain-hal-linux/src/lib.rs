//! Linux transports for TMC2130 daisy chains
//!
//! Implements the `tmchain-hal` traits on Linux user-space interfaces:
//!
//! - SPI: `/dev/spidevB.C` through `spidev`
//! - GPIO: GPIO character devices through `gpio-cdev`
//! - UART: serial ports through `serialport`
//!
//! Every transport reports [`LinuxError`], so one chain can mix them.
//! [`open_chain`] builds a ready chain from a TOML [`ChainConfig`] file.
//!
//! [`ChainConfig`]: tmchain_core::config::ChainConfig

#![deny(unsafe_code)]

pub mod config;
pub mod delay;
pub mod error;
pub mod gpio;
pub mod spi;
pub mod transports;
pub mod uart;

pub use config::{load_config, parse_config};
pub use delay::StdDelay;
pub use error::LinuxError;
pub use gpio::{DiagPins, LinuxPin};
pub use spi::LinuxSpi;
pub use transports::{open_chain, LinuxChain, OpenedChain, SerialChain, StepChain};
pub use uart::LinuxUart;
