//! Stepper driver implementations

pub mod motion;
pub mod tmc2130;

pub use motion::{DirectStep, MotionDriver, SerialMotion, StepAxis};
pub use tmc2130::{ProbeReport, Tmc2130Chain};
