//! GPIO pin abstractions
//!
//! Pins are opened with a fixed direction. Writing an input pin or reading
//! an output pin is a caller error reported as [`PinError::WrongDirection`]
//! rather than a silent reconfiguration.

/// Direction a pin was opened with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// Pin is sampled
    Input,
    /// Pin is driven
    Output,
}

/// Errors from pin operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError<E> {
    /// Operation does not match the pin's configured direction
    WrongDirection,
    /// Underlying GPIO driver failed
    Io(E),
}

/// Digital pin with a direction fixed at construction
pub trait DigitalPin {
    /// Error type of the underlying GPIO driver
    type Error;

    /// Direction the pin was opened with
    fn direction(&self) -> PinDirection;

    /// Drive the pin (logic 1 when `high`)
    ///
    /// Fails with [`PinError::WrongDirection`] on an input pin.
    fn write(&mut self, high: bool) -> Result<(), PinError<Self::Error>>;

    /// Sample the pin
    ///
    /// Fails with [`PinError::WrongDirection`] on an output pin.
    fn read(&mut self) -> Result<bool, PinError<Self::Error>>;

    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), PinError<Self::Error>> {
        self.write(true)
    }

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), PinError<Self::Error>> {
        self.write(false)
    }
}

/// Check that `actual` matches the direction an operation needs
///
/// Helper for implementations of [`DigitalPin`].
pub fn ensure_direction<E>(
    actual: PinDirection,
    required: PinDirection,
) -> Result<(), PinError<E>> {
    if actual == required {
        Ok(())
    } else {
        Err(PinError::WrongDirection)
    }
}
