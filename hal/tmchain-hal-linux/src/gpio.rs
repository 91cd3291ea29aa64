//! GPIO through the Linux GPIO character device

use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use tmchain_core::config::PinConfig;
use tmchain_hal::{ensure_direction, DigitalPin, PinDirection, PinError};

use crate::error::LinuxError;

/// Consumer label shown by `gpioinfo`
const CONSUMER: &str = "tmchain";

/// Kernel request flags for a pin
///
/// Inversion is handled by the kernel, so logical levels read and
/// written through [`LinuxPin`] are already corrected.
pub fn request_flags(direction: PinDirection, inverted: bool) -> LineRequestFlags {
    let mut flags = match direction {
        PinDirection::Input => LineRequestFlags::INPUT,
        PinDirection::Output => LineRequestFlags::OUTPUT,
    };
    if inverted {
        flags |= LineRequestFlags::ACTIVE_LOW;
    }
    flags
}

/// One requested GPIO line
pub struct LinuxPin {
    handle: LineHandle,
    direction: PinDirection,
}

impl LinuxPin {
    /// Request `pin` on `chip` with a fixed direction
    ///
    /// Outputs start low.
    pub fn open(
        chip: &mut Chip,
        pin: PinConfig,
        direction: PinDirection,
    ) -> Result<Self, LinuxError> {
        let handle = chip
            .get_line(pin.pin)?
            .request(request_flags(direction, pin.inverted), 0, CONSUMER)?;
        Ok(Self { handle, direction })
    }

    /// Request an output pin
    pub fn output(chip: &mut Chip, pin: PinConfig) -> Result<Self, LinuxError> {
        Self::open(chip, pin, PinDirection::Output)
    }

    /// Request an input pin
    pub fn input(chip: &mut Chip, pin: PinConfig) -> Result<Self, LinuxError> {
        Self::open(chip, pin, PinDirection::Input)
    }
}

impl DigitalPin for LinuxPin {
    type Error = LinuxError;

    fn direction(&self) -> PinDirection {
        self.direction
    }

    fn write(&mut self, high: bool) -> Result<(), PinError<LinuxError>> {
        ensure_direction(self.direction, PinDirection::Output)?;
        self.handle
            .set_value(u8::from(high))
            .map_err(|e| PinError::Io(e.into()))
    }

    fn read(&mut self) -> Result<bool, PinError<LinuxError>> {
        ensure_direction(self.direction, PinDirection::Input)?;
        self.handle
            .get_value()
            .map(|v| v != 0)
            .map_err(|e| PinError::Io(e.into()))
    }
}

/// DIAG0/DIAG1 inputs of one driver
pub struct DiagPins<P = LinuxPin> {
    diag0: Option<P>,
    diag1: Option<P>,
}

impl<P: DigitalPin> DiagPins<P> {
    /// Wrap already-requested input pins
    pub fn new(diag0: Option<P>, diag1: Option<P>) -> Self {
        Self { diag0, diag1 }
    }

    /// Driver with neither diagnostic pin wired
    pub fn unwired() -> Self {
        Self::new(None, None)
    }

    /// Check if at least one pin is wired
    pub fn is_wired(&self) -> bool {
        self.diag0.is_some() || self.diag1.is_some()
    }

    /// Sample both pins; `None` for a pin that is not wired
    pub fn read(&mut self) -> Result<(Option<bool>, Option<bool>), PinError<P::Error>> {
        let diag0 = self.diag0.as_mut().map(DigitalPin::read).transpose()?;
        let diag1 = self.diag1.as_mut().map(DigitalPin::read).transpose()?;
        Ok((diag0, diag1))
    }
}

impl DiagPins<LinuxPin> {
    /// Request whichever diagnostic pins are configured
    pub fn open(
        chip: &mut Chip,
        diag0: Option<PinConfig>,
        diag1: Option<PinConfig>,
    ) -> Result<Self, LinuxError> {
        Ok(Self::new(
            diag0.map(|p| LinuxPin::input(chip, p)).transpose()?,
            diag1.map(|p| LinuxPin::input(chip, p)).transpose()?,
        ))
    }
}
