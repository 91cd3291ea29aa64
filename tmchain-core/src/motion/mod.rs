//! Motion planning
//!
//! Step timing for drivers whose STEP pins are pulsed from the host.

pub mod planner;

pub use planner::{isqrt, Direction, PlanError, StepRamp};
pub use tmchain_protocol::AxisMove;
