//! Configuration types
//!
//! - `hardware`: pins and per-device descriptors
//! - `chain`: bus, motion link and whole-chain configuration

mod chain;
mod hardware;

pub use chain::*;
pub use hardware::*;
