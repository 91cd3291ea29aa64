//! Daisy-chained TMC2130 drivers

use heapless::Vec;
use tmchain_core::config::RegisterSetting;
use tmchain_core::motion::{AxisMove, Direction};
use tmchain_core::registers::{gconf, reg};
use tmchain_core::{RegisterSet, ShadowStore, SpiStatus, MAX_DEVICES, WRITEABLE_COUNT};
use tmchain_hal::SpiBus;

use super::datagram::{slot_offset, Datagram, DATAGRAM_LEN, MAX_CHAIN_BYTES};
use super::probe::{probe, ProbeReport};
use crate::error::Error;
use crate::stepper::motion::MotionDriver;

/// A chain of TMC2130 drivers sharing one SPI bus
///
/// Register writes go to the shadow first and reach the chips on
/// [`commit`](Self::commit). Motion is delegated to the [`MotionDriver`].
///
/// The bus and the motion driver share one transport error type `E`.
pub struct Tmc2130Chain<SPI, M> {
    spi: SPI,
    motion: M,
    shadow: ShadowStore,
    report: ProbeReport,
}

impl<SPI, M, E> Tmc2130Chain<SPI, M>
where
    SPI: SpiBus<Error = E>,
    M: MotionDriver<Error = E>,
{
    /// Probe the chain and create a driver for `device_count` devices
    ///
    /// Fails if the chain length is out of range, if the motion driver
    /// serves a different number of devices, or if the probe finds an
    /// unreachable device. Possibly-desynced devices only show up in
    /// [`probe_report`](Self::probe_report).
    pub fn new(mut spi: SPI, motion: M, device_count: usize) -> Result<Self, Error<E>> {
        let shadow = ShadowStore::new(device_count)?;
        if let Some(axes) = motion.axis_count() {
            if axes != device_count {
                return Err(Error::LengthMismatch {
                    expected: device_count,
                    actual: axes,
                });
            }
        }

        let report = probe(&mut spi, device_count)?;
        info!("TMC2130 chain ready with {} devices", device_count);

        Ok(Self {
            spi,
            motion,
            shadow,
            report,
        })
    }

    /// Number of devices in the chain
    pub fn device_count(&self) -> usize {
        self.shadow.device_count()
    }

    /// Result of the power-on probe
    pub fn probe_report(&self) -> &ProbeReport {
        &self.report
    }

    /// Devices the probe flagged as possibly desynced
    pub fn desynced_devices(&self) -> impl Iterator<Item = usize> + '_ {
        self.report.desynced_devices()
    }

    /// Store a desired register value; sent on the next commit
    pub fn set(&mut self, device: usize, address: u8, value: u32) -> Result<(), Error<E>> {
        Ok(self.shadow.set(device, address, value)?)
    }

    /// Return a device's desired registers to their power-on values
    pub fn reset(&mut self, device: usize) -> Result<(), Error<E>> {
        Ok(self.shadow.reset(device)?)
    }

    /// Return every device's desired registers to their power-on values
    pub fn reset_all(&mut self) {
        self.shadow.reset_all();
    }

    /// Store several register values for one device
    ///
    /// Nothing is stored if any address is not writeable.
    pub fn configure(
        &mut self,
        device: usize,
        settings: &[RegisterSetting],
    ) -> Result<(), Error<E>> {
        Ok(self.shadow.apply(device, settings)?)
    }

    /// Desired register values of a device
    pub fn registers(&self, device: usize) -> Result<&RegisterSet, Error<E>> {
        Ok(self.shadow.registers(device)?)
    }

    /// Register values of a device as of the last commit
    pub fn last_committed(&self, device: usize) -> Result<&RegisterSet, Error<E>> {
        Ok(self.shadow.last_committed(device)?)
    }

    /// Send every changed register to the chain
    ///
    /// Transaction `i` carries each device's `i`-th pending write, with
    /// no-op datagrams for devices that have fewer. Returns the number of
    /// transactions issued.
    ///
    /// Changes are marked committed before transmission. If a transfer
    /// fails the error is returned, but the changes stay marked committed.
    pub fn commit(&mut self) -> Result<usize, Error<E>> {
        let count = self.shadow.device_count();
        let mut pending: Vec<Vec<(u8, u32), WRITEABLE_COUNT>, MAX_DEVICES> = Vec::new();
        for device in self.shadow.iter_mut() {
            // Cannot overflow: at most MAX_DEVICES shadows
            let _ = pending.push(device.take_pending());
        }

        let rounds = pending.iter().map(|writes| writes.len()).max().unwrap_or(0);
        if rounds == 0 {
            return Ok(0);
        }

        let len = DATAGRAM_LEN * count;
        let mut write = [0u8; MAX_CHAIN_BYTES];
        let mut read = [0u8; MAX_CHAIN_BYTES];
        for round in 0..rounds {
            for (device, writes) in pending.iter().enumerate() {
                let datagram = writes
                    .get(round)
                    .map(|&(address, value)| Datagram::write(address, value))
                    .unwrap_or(Datagram::NOOP);
                let offset = slot_offset(device, count);
                write[offset..offset + DATAGRAM_LEN].copy_from_slice(datagram.as_bytes());
            }
            trace!("commit transaction {} of {}", round + 1, rounds);
            self.spi
                .transfer(&mut read[..len], &write[..len])
                .map_err(Error::Transport)?;
        }

        debug!("committed {} transactions to {} devices", rounds, count);
        Ok(rounds)
    }

    /// Read the status byte of every device, in device order
    ///
    /// Clocks one all-zero transaction through the chain. The shadow is
    /// not touched.
    pub fn poll_status(&mut self) -> Result<Vec<SpiStatus, MAX_DEVICES>, Error<E>> {
        let count = self.shadow.device_count();
        let mut buffer = [0u8; MAX_CHAIN_BYTES];
        let frame = &mut buffer[..DATAGRAM_LEN * count];
        self.spi.transfer_in_place(frame).map_err(Error::Transport)?;

        let mut statuses = Vec::new();
        for device in 0..count {
            let status = SpiStatus::from_byte(frame[slot_offset(device, count)]);
            if status.has_fault() {
                warn!("device {} reports a driver error", device);
            }
            // Cannot overflow: count <= MAX_DEVICES
            let _ = statuses.push(status);
        }
        Ok(statuses)
    }

    /// Move every device, one [`AxisMove`] per device in chain order
    ///
    /// Devices whose direction is switched over SPI get their GCONF
    /// shaft bit updated and committed before the motion is issued.
    pub fn move_axes(&mut self, moves: &[AxisMove]) -> Result<(), Error<E>> {
        let count = self.shadow.device_count();
        if moves.len() != count {
            return Err(Error::LengthMismatch {
                expected: count,
                actual: moves.len(),
            });
        }
        self.motion.check(moves)?;

        let mut switched = false;
        for (device, axis) in moves.iter().enumerate() {
            if axis.steps == 0 || !self.motion.uses_register_direction(device) {
                continue;
            }
            let current = self.shadow.registers(device)?.get(reg::GCONF).unwrap_or(0);
            let updated = match Direction::from_steps(axis.steps) {
                Direction::Clockwise => current & !gconf::SHAFT,
                Direction::CounterClockwise => current | gconf::SHAFT,
            };
            self.shadow.set(device, reg::GCONF, updated)?;
            switched = true;
        }
        if switched {
            self.commit()?;
        }

        self.motion.issue(moves)
    }

    /// SPI bus
    pub fn bus(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Motion driver
    pub fn motion(&mut self) -> &mut M {
        &mut self.motion
    }

    /// Release the bus and the motion driver
    pub fn release(self) -> (SPI, M) {
        (self.spi, self.motion)
    }
}
