//! Serial link through the serialport crate

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};
use tmchain_hal::uart::{DataBits, Parity, StopBits};
use tmchain_hal::{UartConfig, UartRx, UartTx};

use crate::error::LinuxError;

fn data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}

/// Serial port to the motion controller
pub struct LinuxUart {
    port: Box<dyn SerialPort>,
}

impl LinuxUart {
    /// Open `path` with the given framing and read timeout
    pub fn open(path: &str, config: &UartConfig) -> Result<Self, LinuxError> {
        let port = serialport::new(path, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .timeout(Duration::from_millis(u64::from(config.read_timeout_ms)))
            .open()?;
        log::debug!("opened {} at {} baud", path, config.baudrate);
        Ok(Self { port })
    }
}

impl UartTx for LinuxUart {
    type Error = LinuxError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), LinuxError> {
        self.port.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinuxError> {
        self.port.flush()?;
        Ok(())
    }
}

impl UartRx for LinuxUart {
    type Error = LinuxError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, LinuxError> {
        match self.port.read(buf) {
            Ok(count) => Ok(count),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn clear_input(&mut self) -> Result<(), LinuxError> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }
}
