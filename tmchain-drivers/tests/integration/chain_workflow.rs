//! End-to-end chain use: configure from descriptors, commit, move, poll

use heapless::Vec;
use tmchain_core::config::{
    ChainConfig, DeviceDescriptor, MotionMode, PinConfig, RegisterSetting, SerialLinkConfig,
};
use tmchain_core::motion::AxisMove;
use tmchain_core::registers::reg;
use tmchain_drivers::{DirectStep, SerialMotion, StepAxis, Tmc2130Chain};
use tmchain_protocol::ACK;

use crate::common::{MockDelay, MockSpi, MockUart, PinLog};

fn descriptor(step: u32) -> DeviceDescriptor {
    let mut device = DeviceDescriptor::with_step(PinConfig::new(step));
    let _ = device
        .registers
        .push(RegisterSetting::new(reg::IHOLD_IRUN, 0x0006_1F0A));
    let _ = device
        .registers
        .push(RegisterSetting::new(reg::CHOPCONF, 0x0001_0005));
    device
}

#[test]
fn test_direct_step_workflow() {
    let mut config = ChainConfig::default();
    for step in [17, 22, 23] {
        let _ = config.devices.push(descriptor(step));
    }
    config.validate().unwrap();

    let pins = PinLog::new();
    let mut axes = Vec::new();
    for device in &config.devices {
        if let Some(step) = device.step {
            let _ = axes.push(StepAxis::new(pins.output(step.pin)));
        }
    }

    let spi = MockSpi::new();
    let mut chain = match Tmc2130Chain::new(
        spi.clone(),
        DirectStep::new(axes, MockDelay::new()),
        config.device_count(),
    ) {
        Ok(chain) => chain,
        Err(e) => panic!("{:?}", e),
    };
    spi.clear_transfers();

    for (index, device) in config.devices.iter().enumerate() {
        chain.configure(index, &device.registers).unwrap();
    }
    // Two registers per device, all devices written together
    assert_eq!(chain.commit().unwrap(), 2);
    assert_eq!(spi.transfers()[0].len(), 15);

    chain
        .move_axes(&[
            AxisMove::new(10, 2000, 1000),
            AxisMove::idle(),
            AxisMove::new(-5, 2000, 1000),
        ])
        .unwrap();
    assert_eq!(pins.rising_edges(17), 10);
    assert_eq!(pins.rising_edges(22), 0);
    assert_eq!(pins.rising_edges(23), 5);

    let statuses = chain.poll_status().unwrap();
    assert_eq!(statuses.len(), 3);

    let (_, motion) = chain.release();
    let (axes, _) = motion.release();
    assert_eq!(axes.len(), 3);
}

#[test]
fn test_serial_motion_workflow() {
    let mut config = ChainConfig {
        motion: MotionMode::SerialMotion,
        serial: Some(SerialLinkConfig::default()),
        ..ChainConfig::default()
    };
    let _ = config.devices.push(DeviceDescriptor::default());
    let _ = config.devices.push(DeviceDescriptor::default());
    config.validate().unwrap();

    let uart = MockUart::new();
    let spi = MockSpi::new();
    let mut chain = match Tmc2130Chain::new(
        spi.clone(),
        SerialMotion::new(uart.clone()),
        config.device_count(),
    ) {
        Ok(chain) => chain,
        Err(e) => panic!("{:?}", e),
    };

    uart.reply_with(ACK);
    chain
        .move_axes(&[AxisMove::new(1000, 2000, 2000), AxisMove::new(-500, 2000, 2000)])
        .unwrap();

    let frame = uart.written();
    let mut parser = tmchain_protocol::FrameParser::new(2).unwrap();
    let decoded = parser.feed_bytes(&frame).unwrap().unwrap();
    assert_eq!(decoded.axes[1], AxisMove::new(-500, 2000, 2000));
}
