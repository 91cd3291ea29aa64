//! Motion issuance
//!
//! A chain hands each [`AxisMove`] batch to a [`MotionDriver`]:
//!
//! - [`DirectStep`]: pulses STEP (and DIR) pins from the host
//! - [`SerialMotion`]: sends a motion frame to a step-generating
//!   microcontroller and waits for its acknowledgment

mod direct;
mod serial;

pub use direct::{DirectStep, StepAxis, PULSE_WIDTH_US};
pub use serial::SerialMotion;

use tmchain_core::motion::AxisMove;

use crate::error::Error;

/// Carries out motion requests for a chain
pub trait MotionDriver {
    /// Transport error type
    type Error;

    /// Execute one move per device, in chain order
    ///
    /// Blocks until the motion is done or acknowledged.
    fn issue(&mut self, moves: &[AxisMove]) -> Result<(), Error<Self::Error>>;

    /// Reject moves this driver cannot carry out, before anything is sent
    fn check(&self, _moves: &[AxisMove]) -> Result<(), Error<Self::Error>> {
        Ok(())
    }

    /// Number of devices this driver is wired to, if fixed
    fn axis_count(&self) -> Option<usize> {
        None
    }

    /// Check if `device`'s direction must be set through GCONF over SPI
    fn uses_register_direction(&self, _device: usize) -> bool {
        false
    }
}
