//! Common test utilities and mock transports

pub mod mock_bus;
pub mod mock_uart;

pub use mock_bus::{MockError, MockSpi};
pub use mock_pins::{MockDelay, MockPin, PinLog};
pub use mock_uart::MockUart;

use tmchain_drivers::{SerialMotion, Tmc2130Chain};

/// Chain of `count` devices driven over a mock serial link
pub type SerialChain = Tmc2130Chain<MockSpi, SerialMotion<MockUart>>;

/// Build a chain that passed a clean probe, with the probe transfers cleared
pub fn serial_chain(count: usize) -> (SerialChain, MockSpi, MockUart) {
    let spi = MockSpi::new();
    let uart = MockUart::new();
    let chain = match Tmc2130Chain::new(spi.clone(), SerialMotion::new(uart.clone()), count) {
        Ok(chain) => chain,
        Err(e) => panic!("chain construction failed: {:?}", e),
    };
    spi.clear_transfers();
    (chain, spi, uart)
}
