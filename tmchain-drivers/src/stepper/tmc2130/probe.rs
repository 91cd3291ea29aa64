//! Power-on probe
//!
//! Two phases, both clocking a whole-chain buffer of one repeated byte:
//!
//! 1. All zeros, twice. The second response carries each chip's status
//!    byte. A clear reset flag is taken to mean the chip holds its
//!    power-on defaults, matching a fresh shadow. A set flag means that
//!    cannot be assumed. This only produces a [`Warning`].
//! 2. All `0x01`, three times. A set reset flag in the third response
//!    means the chip never latched the preceding reads, so it is not
//!    reachable on the chain. This is fatal.

use heapless::Vec;
use tmchain_core::status::RESET_FLAG;
use tmchain_core::MAX_DEVICES;
use tmchain_hal::SpiBus;

use super::datagram::{slot_offset, DATAGRAM_LEN, MAX_CHAIN_BYTES};
use crate::error::{Error, Warning};

/// Zero-buffer transfers in the reset phase
const RESET_PHASE_TRANSFERS: usize = 2;

/// Byte clocked through the chain in the reachability phase
const REACH_PHASE_BYTE: u8 = 0x01;

/// Transfers in the reachability phase
const REACH_PHASE_TRANSFERS: usize = 3;

/// Outcome of a successful probe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeReport {
    warnings: Vec<Warning, MAX_DEVICES>,
}

impl ProbeReport {
    /// Warnings raised, in device order
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if no device raised a warning
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Devices that may have lost their configuration
    pub fn desynced_devices(&self) -> impl Iterator<Item = usize> + '_ {
        self.warnings.iter().map(|w| match w {
            Warning::PossiblyDesynced(device) => *device,
        })
    }
}

/// Run the probe on a chain of `device_count` devices
///
/// `device_count` must be between 1 and [`MAX_DEVICES`].
pub fn probe<SPI: SpiBus>(
    spi: &mut SPI,
    device_count: usize,
) -> Result<ProbeReport, Error<SPI::Error>> {
    if device_count == 0 || device_count > MAX_DEVICES {
        return Err(Error::InvalidChainLength(device_count));
    }
    let len = DATAGRAM_LEN * device_count;
    let mut response = [0u8; MAX_CHAIN_BYTES];

    let zeros = [0u8; MAX_CHAIN_BYTES];
    for _ in 0..RESET_PHASE_TRANSFERS {
        spi.transfer(&mut response[..len], &zeros[..len])
            .map_err(Error::Transport)?;
    }

    let mut report = ProbeReport::default();
    for device in flagged(&response[..len], device_count) {
        warn!("device {} status flag set, defaults not assumed", device);
        // Cannot overflow: at most one warning per device
        let _ = report.warnings.push(Warning::PossiblyDesynced(device));
    }

    let reads = [REACH_PHASE_BYTE; MAX_CHAIN_BYTES];
    for _ in 0..REACH_PHASE_TRANSFERS {
        spi.transfer(&mut response[..len], &reads[..len])
            .map_err(Error::Transport)?;
    }

    if let Some(device) = flagged(&response[..len], device_count).next() {
        error!("device {} is unreachable", device);
        return Err(Error::DeviceUnreachable(device));
    }

    debug!(
        "probed {} devices, {} possibly desynced",
        device_count,
        report.warnings.len()
    );
    Ok(report)
}

/// Devices whose status byte has the reset flag set, in device order
fn flagged(response: &[u8], device_count: usize) -> impl Iterator<Item = usize> + '_ {
    (0..device_count).filter(move |&d| response[slot_offset(d, device_count)] & RESET_FLAG != 0)
}
