//! Serial Motion Protocol
//!
//! This crate defines the byte-stream protocol between the host driving a
//! TMC2130 chain and the microcontroller that generates the step pulses.
//! The host sends one motion frame describing a move for every device in
//! the chain and waits for a single acknowledgment byte.
//!
//! # Frame Format
//!
//! ```text
//! ┌───────┬──────────────────────────────────────────┬─────┐
//! │ 'S'   │ per device: STEPS  │ MAX_SPEED │ ACCEL   │ 'E' │
//! │ 1B    │             i32 BE │ u16 BE    │ u16 BE  │ 1B  │
//! └───────┴──────────────────────────────────────────┴─────┘
//! ```
//!
//! The peripheral answers with `'D'` once the move has been accepted.
//! There are no length or checksum fields: the peripheral firmware is
//! built for a fixed device count.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{
    FrameError, FrameParser, MotionFrame, AXIS_RECORD_LEN, FRAME_END, FRAME_START, MAX_AXES,
    MAX_FRAME_SIZE,
};
pub use messages::{AxisMove, Reply, ACK};
