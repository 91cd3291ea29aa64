//! Trapezoidal step ramp
//!
//! A move of `n` steps accelerates at `acceleration` steps/s² until it
//! reaches `max_speed` steps/s, cruises, then decelerates symmetrically.
//! Short moves never reach cruise speed and form a triangle instead.
//!
//! The speed at step `i` is `min(max_speed, sqrt(2 * a * k))` where `k` is
//! the number of steps to the nearer end of the move. An acceleration of
//! zero means no ramp: every step runs at `max_speed`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Microseconds per second
const MICROS_PER_SECOND: u64 = 1_000_000;

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation (positive steps)
    Clockwise,
    /// Counter-clockwise rotation (negative steps)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Direction implied by the sign of a step count
    pub fn from_steps(steps: i32) -> Self {
        if steps < 0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

/// Errors from ramp planning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanError {
    /// A move with steps needs a nonzero maximum speed
    ZeroSpeed,
}

/// Integer square root (floor)
pub fn isqrt(value: u64) -> u64 {
    if value < 2 {
        return value;
    }
    // Newton iteration from an overestimate converges downward
    let mut x = value / 2;
    let mut y = (x + value / x) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

/// Iterator over the interval before each step, in microseconds
#[derive(Debug, Clone)]
pub struct StepRamp {
    steps: u32,
    index: u32,
    max_speed: u64,
    acceleration: u64,
}

impl StepRamp {
    /// Plan a ramp for `steps` steps
    ///
    /// A move of zero steps is always valid and yields nothing.
    pub fn new(steps: u32, max_speed: u16, acceleration: u16) -> Result<Self, PlanError> {
        if steps > 0 && max_speed == 0 {
            return Err(PlanError::ZeroSpeed);
        }
        Ok(Self {
            steps,
            index: 0,
            max_speed: max_speed as u64,
            acceleration: acceleration as u64,
        })
    }

    /// Total number of steps in the move
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Speed in steps/s for step `index`
    pub fn speed_at(&self, index: u32) -> u64 {
        if self.acceleration == 0 {
            return self.max_speed;
        }
        let to_end = (index as u64 + 1).min((self.steps - index) as u64);
        isqrt(2 * self.acceleration * to_end).min(self.max_speed).max(1)
    }

    /// Total duration of the move in microseconds
    pub fn duration_us(&self) -> u64 {
        self.clone().map(u64::from).sum()
    }
}

impl Iterator for StepRamp {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.index >= self.steps {
            return None;
        }
        let speed = self.speed_at(self.index);
        self.index += 1;
        Some((MICROS_PER_SECOND / speed) as u32)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps - self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for StepRamp {}
