//! Linux transport errors

use thiserror::Error;
use tmchain_core::config::ConfigError;

/// Errors from Linux transports and configuration loading
#[derive(Error, Debug)]
pub enum LinuxError {
    /// Device node I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GPIO character device failed
    #[error("GPIO error: {0}")]
    Gpio(#[from] gpio_cdev::Error),

    /// Serial port could not be opened or configured
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Configuration file is not valid TOML for a chain
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but is inconsistent
    #[error("invalid config: {0:?}")]
    Config(ConfigError),

    /// Chain operation failed for a reason other than a transport error
    #[error("chain error: {0}")]
    Chain(Box<tmchain_drivers::Error<LinuxError>>),
}

impl From<ConfigError> for LinuxError {
    fn from(error: ConfigError) -> Self {
        LinuxError::Config(error)
    }
}

impl From<tmchain_drivers::Error<LinuxError>> for LinuxError {
    fn from(error: tmchain_drivers::Error<LinuxError>) -> Self {
        match error {
            tmchain_drivers::Error::Transport(e) => e,
            other => LinuxError::Chain(Box::new(other)),
        }
    }
}
