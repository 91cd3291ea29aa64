//! Motion over the serial link

use tmchain_core::motion::AxisMove;
use tmchain_drivers::Error;
use tmchain_protocol::ACK;

use crate::common::{serial_chain, MockError};

const TWO_AXIS_FRAME: [u8; 18] = [
    0x53, 0x00, 0x00, 0x03, 0xE8, 0x07, 0xD0, 0x07, 0xD0, 0xFF, 0xFF, 0xFE, 0x0C, 0x07, 0xD0,
    0x07, 0xD0, 0x45,
];

fn two_axis_moves() -> [AxisMove; 2] {
    [
        AxisMove::new(1000, 2000, 2000),
        AxisMove::new(-500, 2000, 2000),
    ]
}

#[test]
fn test_acknowledged_move() {
    let (mut chain, spi, uart) = serial_chain(2);
    uart.reply_with(ACK);

    chain.move_axes(&two_axis_moves()).unwrap();
    assert_eq!(uart.written(), TWO_AXIS_FRAME.to_vec());
    assert_eq!(uart.clears(), 1);
    assert_eq!(uart.flushes(), 1);
    // Direction travels in the step sign, not over SPI
    assert!(spi.transfers().is_empty());
    assert!(chain.registers(1).unwrap().is_default());
}

#[test]
fn test_length_mismatch_sends_nothing() {
    let (mut chain, _, uart) = serial_chain(3);
    assert_eq!(
        chain.move_axes(&two_axis_moves()),
        Err(Error::LengthMismatch {
            expected: 3,
            actual: 2
        })
    );
    assert!(uart.written().is_empty());
}

#[test]
fn test_unexpected_reply() {
    let (mut chain, _, uart) = serial_chain(2);
    uart.reply_with(b'N');
    assert_eq!(
        chain.move_axes(&two_axis_moves()),
        Err(Error::Protocol {
            received: Some(b'N')
        })
    );
}

#[test]
fn test_stale_input_is_discarded() {
    let (mut chain, _, uart) = serial_chain(2);
    uart.push_stale(ACK);
    assert_eq!(
        chain.move_axes(&two_axis_moves()),
        Err(Error::Protocol { received: None })
    );
}

#[test]
fn test_write_failure_passes_through() {
    let (mut chain, _, uart) = serial_chain(2);
    uart.fail_next_write();
    assert_eq!(
        chain.move_axes(&two_axis_moves()),
        Err(Error::Transport(MockError))
    );
}

#[test]
fn test_one_frame_per_request() {
    let (mut chain, _, uart) = serial_chain(1);
    uart.reply_with(ACK);
    uart.reply_with(ACK);
    chain.move_axes(&[AxisMove::new(10, 100, 0)]).unwrap();
    chain.move_axes(&[AxisMove::idle()]).unwrap();

    let written = uart.written();
    assert_eq!(written.len(), 20);
    assert_eq!(&written[10..], &[0x53, 0, 0, 0, 0, 0, 0, 0, 0, 0x45]);
}
