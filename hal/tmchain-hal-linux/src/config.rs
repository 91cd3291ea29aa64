//! TOML chain configuration
//!
//! ```toml
//! motion = "direct_step"
//!
//! [spi]
//! bus = 0
//! device = 0
//!
//! [[devices]]
//! step = { pin = 17 }
//! dir = { pin = 27, inverted = true }
//! registers = [{ address = 0x10, value = 0x00061F0A }]
//! ```

use std::fs;
use std::path::Path;

use tmchain_core::config::ChainConfig;

use crate::error::LinuxError;

/// Parse and validate a chain configuration
pub fn parse_config(text: &str) -> Result<ChainConfig, LinuxError> {
    let config: ChainConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a chain configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<ChainConfig, LinuxError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    log::info!(
        "loaded {} with {} devices ({:?})",
        path.display(),
        config.device_count(),
        config.motion
    );
    Ok(config)
}
