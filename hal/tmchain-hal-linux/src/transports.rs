//! Opening a whole chain from its configuration

use gpio_cdev::Chip;
use heapless::Vec;
use tmchain_core::config::{ChainConfig, ConfigError, MotionMode};
use tmchain_core::MAX_DEVICES;
use tmchain_drivers::{DirectStep, MotionDriver, SerialMotion, StepAxis, Tmc2130Chain};
use tmchain_hal::spi::Mode;
use tmchain_hal::{SpiConfig, UartConfig};

use crate::delay::StdDelay;
use crate::error::LinuxError;
use crate::gpio::{DiagPins, LinuxPin};
use crate::spi::LinuxSpi;
use crate::uart::LinuxUart;

/// Chain stepped through host GPIO
pub type StepChain = Tmc2130Chain<LinuxSpi, DirectStep<LinuxPin, StdDelay>>;

/// Chain moved by a microcontroller on a serial link
pub type SerialChain = Tmc2130Chain<LinuxSpi, SerialMotion<LinuxUart>>;

/// An opened chain, by motion mode
pub enum LinuxChain {
    /// Direct step-pin motion
    DirectStep(StepChain),
    /// Serial motion link
    SerialMotion(SerialChain),
}

impl LinuxChain {
    /// Devices that reported a set status flag during the probe
    pub fn desynced_devices(&self) -> impl Iterator<Item = usize> + '_ {
        let (step, serial) = match self {
            LinuxChain::DirectStep(c) => (Some(c.desynced_devices()), None),
            LinuxChain::SerialMotion(c) => (None, Some(c.desynced_devices())),
        };
        step.into_iter().flatten().chain(serial.into_iter().flatten())
    }
}

/// A chain together with the diagnostic inputs of its devices
pub struct OpenedChain {
    /// The probed and configured chain
    pub chain: LinuxChain,
    /// Diagnostic pins, one entry per device in chain order
    pub diag: std::vec::Vec<DiagPins>,
}

/// Open the SPI bus named by `config`
pub fn open_spi(config: &ChainConfig) -> Result<LinuxSpi, LinuxError> {
    let spi = SpiConfig::new(config.spi.frequency, Mode::Mode3);
    LinuxSpi::open(config.spi.bus, config.spi.device, &spi)
}

/// Open the GPIO chip named by `config`
pub fn open_gpio_chip(config: &ChainConfig) -> Result<Chip, LinuxError> {
    Ok(Chip::new(config.gpio_chip.as_str())?)
}

/// Request STEP and DIR pins for every device
pub fn open_direct_step(
    config: &ChainConfig,
    chip: &mut Chip,
) -> Result<DirectStep<LinuxPin, StdDelay>, LinuxError> {
    let mut axes: Vec<StepAxis<LinuxPin>, MAX_DEVICES> = Vec::new();
    for (index, device) in config.devices.iter().enumerate() {
        let step = device
            .step
            .ok_or(ConfigError::MissingStepPin(index))?;
        let step = LinuxPin::output(chip, step)?;
        let axis = match device.dir {
            Some(dir) => StepAxis::with_dir(step, LinuxPin::output(chip, dir)?),
            None => StepAxis::new(step),
        };
        if axes.push(axis).is_err() {
            return Err(ConfigError::TooManyDevices(config.devices.len()).into());
        }
    }
    Ok(DirectStep::new(axes, StdDelay))
}

/// Open the serial link to the motion controller
pub fn open_serial_motion(config: &ChainConfig) -> Result<SerialMotion<LinuxUart>, LinuxError> {
    let link = config
        .serial
        .as_ref()
        .ok_or(ConfigError::MissingSerialLink)?;
    let uart = UartConfig {
        baudrate: link.baudrate,
        read_timeout_ms: link.timeout_ms,
        ..UartConfig::default()
    };
    Ok(SerialMotion::new(LinuxUart::open(link.port.as_str(), &uart)?))
}

/// Request the diagnostic inputs of every device
pub fn open_diag_pins(
    config: &ChainConfig,
    chip: &mut Chip,
) -> Result<std::vec::Vec<DiagPins>, LinuxError> {
    config
        .devices
        .iter()
        .map(|device| DiagPins::open(chip, device.diag0, device.diag1))
        .collect()
}

/// Apply every descriptor's register settings and commit them
fn apply_registers<M>(
    chain: &mut Tmc2130Chain<LinuxSpi, M>,
    config: &ChainConfig,
) -> Result<usize, LinuxError>
where
    M: MotionDriver<Error = LinuxError>,
{
    for (index, device) in config.devices.iter().enumerate() {
        chain.configure(index, &device.registers)?;
    }
    Ok(chain.commit()?)
}

/// Check if any device has a diagnostic pin wired
pub fn has_diag_pins(config: &ChainConfig) -> bool {
    config
        .devices
        .iter()
        .any(|d| d.diag0.is_some() || d.diag1.is_some())
}

/// Open every transport, probe the chain and apply the configured registers
///
/// Serial motion only touches the GPIO chip when a diagnostic pin is wired.
pub fn open_chain(config: &ChainConfig) -> Result<OpenedChain, LinuxError> {
    config.validate()?;
    let spi = open_spi(config)?;
    let count = config.device_count();

    let (chain, diag) = match config.motion {
        MotionMode::DirectStep => {
            let mut chip = open_gpio_chip(config)?;
            let diag = open_diag_pins(config, &mut chip)?;
            let motion = open_direct_step(config, &mut chip)?;
            let mut chain = Tmc2130Chain::new(spi, motion, count)?;
            apply_registers(&mut chain, config)?;
            (LinuxChain::DirectStep(chain), diag)
        }
        MotionMode::SerialMotion => {
            let diag = if has_diag_pins(config) {
                open_diag_pins(config, &mut open_gpio_chip(config)?)?
            } else {
                (0..count).map(|_| DiagPins::unwired()).collect()
            };
            let motion = open_serial_motion(config)?;
            let mut chain = Tmc2130Chain::new(spi, motion, count)?;
            apply_registers(&mut chain, config)?;
            (LinuxChain::SerialMotion(chain), diag)
        }
    };

    let desynced = chain.desynced_devices().count();
    if desynced > 0 {
        log::warn!("{} devices reported a set status flag", desynced);
    }
    let wired = diag.iter().filter(|d| d.is_wired()).count();
    log::info!("chain of {} devices open, {} with diagnostic pins", count, wired);
    Ok(OpenedChain { chain, diag })
}
