//! Motion frames over a serial link

use tmchain_core::motion::AxisMove;
use tmchain_hal::{UartRx, UartTx};
use tmchain_protocol::{MotionFrame, Reply};

use super::MotionDriver;
use crate::error::Error;

/// Sends moves to a step-generating microcontroller
///
/// Each batch is one frame. The driver discards stale input, writes the
/// frame, then blocks for a single reply byte. Anything but the
/// acknowledgment, including a timeout, is a protocol error. There is no
/// retry.
pub struct SerialMotion<U> {
    uart: U,
}

impl<U> SerialMotion<U> {
    /// Create a driver on an opened serial link
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Serial link
    pub fn uart(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Release the serial link
    pub fn release(self) -> U {
        self.uart
    }
}

impl<U, E> MotionDriver for SerialMotion<U>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
{
    type Error = E;

    fn issue(&mut self, moves: &[AxisMove]) -> Result<(), Error<E>> {
        let frame = MotionFrame::new(moves).map_err(|_| Error::InvalidChainLength(moves.len()))?;
        let bytes = frame
            .encode_to_vec()
            .map_err(|_| Error::InvalidChainLength(moves.len()))?;

        self.uart.clear_input().map_err(Error::Transport)?;
        self.uart.write_blocking(&bytes).map_err(Error::Transport)?;
        self.uart.flush().map_err(Error::Transport)?;
        trace!("sent motion frame of {} bytes", bytes.len());

        match self.uart.read_byte().map_err(Error::Transport)? {
            Some(byte) => match Reply::from_byte(byte) {
                Reply::Ack => Ok(()),
                Reply::Unexpected(byte) => {
                    warn!("motion controller replied {} instead of acknowledging", byte);
                    Err(Error::Protocol {
                        received: Some(byte),
                    })
                }
            },
            None => {
                warn!("motion controller did not acknowledge before timeout");
                Err(Error::Protocol { received: None })
            }
        }
    }
}
