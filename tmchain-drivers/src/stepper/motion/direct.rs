//! Direct step-pin motion
//!
//! Every device gets a [`StepRamp`] and the ramps run concurrently: the
//! driver always sleeps until the earliest pending step, then pulses
//! every device due at that instant together.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use tmchain_core::motion::{AxisMove, Direction, StepRamp};
use tmchain_core::MAX_DEVICES;
use tmchain_hal::DigitalPin;

use super::MotionDriver;
use crate::error::Error;

/// STEP high time in microseconds
pub const PULSE_WIDTH_US: u32 = 1;

/// DIR setup time before the first step, in microseconds
const DIR_SETUP_US: u32 = 1;

/// STEP and optional DIR pin of one device
pub struct StepAxis<P> {
    step: P,
    dir: Option<P>,
}

impl<P: DigitalPin> StepAxis<P> {
    /// Axis whose direction is switched over SPI
    pub fn new(step: P) -> Self {
        Self { step, dir: None }
    }

    /// Axis with a DIR pin (high for counter-clockwise)
    pub fn with_dir(step: P, dir: P) -> Self {
        Self {
            step,
            dir: Some(dir),
        }
    }

    /// Check if the axis has a DIR pin
    pub fn has_dir(&self) -> bool {
        self.dir.is_some()
    }
}

/// Pulses STEP pins from the host
pub struct DirectStep<P, D> {
    axes: Vec<StepAxis<P>, MAX_DEVICES>,
    delay: D,
}

impl<P, D> DirectStep<P, D>
where
    P: DigitalPin,
    D: DelayNs,
{
    /// Create a driver for the given axes, in chain order
    pub fn new(axes: Vec<StepAxis<P>, MAX_DEVICES>, delay: D) -> Self {
        Self { axes, delay }
    }

    /// Release the pins and the delay
    pub fn release(self) -> (Vec<StepAxis<P>, MAX_DEVICES>, D) {
        (self.axes, self.delay)
    }

    fn set_directions(&mut self, moves: &[AxisMove]) -> Result<(), Error<P::Error>> {
        let mut any = false;
        for (axis, m) in self.axes.iter_mut().zip(moves) {
            if let (Some(dir), true) = (axis.dir.as_mut(), m.steps != 0) {
                dir.write(Direction::from_steps(m.steps) == Direction::CounterClockwise)?;
                any = true;
            }
        }
        if any {
            self.delay.delay_us(DIR_SETUP_US);
        }
        Ok(())
    }
}

impl<P, D> MotionDriver for DirectStep<P, D>
where
    P: DigitalPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn check(&self, moves: &[AxisMove]) -> Result<(), Error<P::Error>> {
        if moves.len() != self.axes.len() {
            return Err(Error::LengthMismatch {
                expected: self.axes.len(),
                actual: moves.len(),
            });
        }
        match moves.iter().position(|m| m.steps != 0 && m.max_speed == 0) {
            Some(device) => Err(Error::InvalidSpeed { device }),
            None => Ok(()),
        }
    }

    fn axis_count(&self) -> Option<usize> {
        Some(self.axes.len())
    }

    fn uses_register_direction(&self, device: usize) -> bool {
        self.axes.get(device).is_some_and(|axis| !axis.has_dir())
    }

    fn issue(&mut self, moves: &[AxisMove]) -> Result<(), Error<P::Error>> {
        self.check(moves)?;
        self.set_directions(moves)?;
        trace!("direct step move, {} pulses planned", total_steps(moves));

        let mut ramps: Vec<StepRamp, MAX_DEVICES> = Vec::new();
        let mut due: Vec<Option<u64>, MAX_DEVICES> = Vec::new();
        for (device, m) in moves.iter().enumerate() {
            let mut ramp = StepRamp::new(m.steps.unsigned_abs(), m.max_speed, m.acceleration)
                .map_err(|_| Error::InvalidSpeed { device })?;
            let first = ramp.next().map(u64::from);
            // Cannot overflow: moves.len() == axes.len() <= MAX_DEVICES
            let _ = due.push(first);
            let _ = ramps.push(ramp);
        }

        let mut now = 0u64;
        let mut pulses = 0u64;
        while let Some(at) = due.iter().flatten().min().copied() {
            let wait = at.saturating_sub(now);
            if wait > 0 {
                self.delay.delay_us(u32::try_from(wait).unwrap_or(u32::MAX));
            }

            for (axis, slot) in self.axes.iter_mut().zip(due.iter()) {
                if *slot == Some(at) {
                    axis.step.set_high()?;
                }
            }
            self.delay.delay_us(PULSE_WIDTH_US);
            for (axis, slot) in self.axes.iter_mut().zip(due.iter()) {
                if *slot == Some(at) {
                    axis.step.set_low()?;
                    pulses += 1;
                }
            }
            now = at + u64::from(PULSE_WIDTH_US);

            for (ramp, slot) in ramps.iter_mut().zip(due.iter_mut()) {
                if *slot == Some(at) {
                    *slot = ramp.next().map(|interval| at + u64::from(interval));
                }
            }
        }

        debug!("direct step move done, {} pulses", pulses);
        Ok(())
    }
}

/// Total step pulses a move asks for across all axes
fn total_steps(moves: &[AxisMove]) -> u64 {
    moves.iter().map(|m| u64::from(m.steps.unsigned_abs())).sum()
}
