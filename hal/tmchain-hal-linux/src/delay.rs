//! Blocking delay on the host clock

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Delay backed by `std::thread::sleep`
///
/// Sleeps are at least as long as requested; scheduler latency can make
/// them longer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
