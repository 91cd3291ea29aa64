//! SPI through spidev

use std::path::PathBuf;

use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
use tmchain_hal::spi::Mode;
use tmchain_hal::{SpiBus, SpiConfig};

use crate::error::LinuxError;

/// Path of the spidev node for a bus and chip select
pub fn device_path(bus: u8, device: u8) -> PathBuf {
    PathBuf::from(format!("/dev/spidev{}.{}", bus, device))
}

/// spidev flags for an SPI mode
pub fn mode_flags(mode: Mode) -> SpiModeFlags {
    match mode {
        Mode::Mode0 => SpiModeFlags::SPI_MODE_0,
        Mode::Mode1 => SpiModeFlags::SPI_MODE_1,
        Mode::Mode2 => SpiModeFlags::SPI_MODE_2,
        Mode::Mode3 => SpiModeFlags::SPI_MODE_3,
    }
}

/// SPI bus on a spidev node
///
/// Chip select is driven by the kernel and stays asserted for exactly one
/// transfer, which is what latches a chain transaction.
pub struct LinuxSpi {
    dev: Spidev,
}

impl LinuxSpi {
    /// Open `/dev/spidev{bus}.{device}` with the given clock settings
    pub fn open(bus: u8, device: u8, config: &SpiConfig) -> Result<Self, LinuxError> {
        let path = device_path(bus, device);
        let mut dev = Spidev::open(&path)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.frequency)
            .mode(mode_flags(config.mode()))
            .build();
        dev.configure(&options)?;
        log::debug!(
            "opened {} at {} Hz, {:?}",
            path.display(),
            config.frequency,
            config.mode()
        );
        Ok(Self { dev })
    }
}

impl SpiBus for LinuxSpi {
    type Error = LinuxError;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), LinuxError> {
        let mut transfer = SpidevTransfer::read_write(write, read);
        self.dev.transfer(&mut transfer)?;
        Ok(())
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), LinuxError> {
        let write = data.to_vec();
        self.transfer(data, &write)
    }
}
