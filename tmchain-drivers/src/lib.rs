//! Hardware driver for TMC2130 daisy chains
//!
//! This crate drives a chain of TMC2130 stepper drivers through the
//! transport traits in `tmchain-hal`:
//!
//! - Register commits, one synchronized SPI transaction per datagram slot
//! - Power-on probe detecting reset and unreachable devices
//! - Motion issuance by direct step pulses or over a serial link
//!
//! ```text
//!  caller ──set()──▶ ShadowStore ──commit()──▶ SPI chain ▶ dev N-1 ▶ … ▶ dev 0
//!     │                                              (MOSI enters at dev 0)
//!     └──move_axes()──▶ MotionDriver ──▶ STEP/DIR pins  or  UART ▶ 'D'
//! ```

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod error;
pub mod stepper;

pub use error::{Error, Warning};
pub use stepper::motion::{DirectStep, MotionDriver, SerialMotion, StepAxis};
pub use stepper::tmc2130::{Datagram, ProbeReport, Tmc2130Chain};
