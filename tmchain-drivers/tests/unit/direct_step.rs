//! Direct stepping through STEP/DIR pins

use heapless::Vec;
use tmchain_core::motion::AxisMove;
use tmchain_core::registers::{gconf, reg};
use tmchain_drivers::{DirectStep, Error, StepAxis, Tmc2130Chain};

use crate::common::{MockDelay, MockError, MockPin, MockSpi, PinLog};

const STEP0: u32 = 17;
const DIR0: u32 = 27;
const STEP1: u32 = 22;

type StepChain = Tmc2130Chain<MockSpi, DirectStep<MockPin, MockDelay>>;

/// Device 0 has a DIR pin, device 1 switches direction over SPI
fn step_chain() -> (StepChain, MockSpi, PinLog, MockDelay) {
    let pins = PinLog::new();
    let delay = MockDelay::new();
    let mut axes = Vec::new();
    let _ = axes.push(StepAxis::with_dir(pins.output(STEP0), pins.output(DIR0)));
    let _ = axes.push(StepAxis::new(pins.output(STEP1)));

    let spi = MockSpi::new();
    let chain = match Tmc2130Chain::new(spi.clone(), DirectStep::new(axes, delay.clone()), 2) {
        Ok(chain) => chain,
        Err(e) => panic!("{:?}", e),
    };
    spi.clear_transfers();
    (chain, spi, pins, delay)
}

#[test]
fn test_pulse_counts_and_timing() {
    let (mut chain, _, pins, delay) = step_chain();
    chain
        .move_axes(&[AxisMove::new(4, 1000, 0), AxisMove::new(2, 500, 0)])
        .unwrap();

    assert_eq!(pins.rising_edges(STEP0), 4);
    assert_eq!(pins.rising_edges(STEP1), 2);
    assert_eq!(pins.last_level(STEP0), Some(false));
    assert_eq!(pins.last_level(STEP1), Some(false));
    // Both axes run concurrently and finish at 4 ms
    let elapsed = delay.elapsed_us();
    assert!((4000..4100).contains(&elapsed), "elapsed {}", elapsed);
}

#[test]
fn test_dir_pin_and_register_direction() {
    let (mut chain, spi, pins, _) = step_chain();
    chain
        .move_axes(&[AxisMove::new(-2, 1000, 0), AxisMove::new(-3, 1000, 0)])
        .unwrap();

    assert_eq!(pins.last_level(DIR0), Some(true));
    // Device 1's shaft bit is committed before stepping; device 0 untouched
    assert_eq!(
        spi.transfers(),
        vec![vec![0x80, 0, 0, 0, 0x10, 0, 0, 0, 0, 0]]
    );
    assert_eq!(chain.registers(0).unwrap().get(reg::GCONF), Some(0));
    assert_eq!(
        chain.last_committed(1).unwrap().get(reg::GCONF),
        Some(gconf::SHAFT)
    );

    spi.clear_transfers();
    chain
        .move_axes(&[AxisMove::new(2, 1000, 0), AxisMove::new(3, 1000, 0)])
        .unwrap();
    assert_eq!(pins.last_level(DIR0), Some(false));
    assert_eq!(spi.transfers(), vec![vec![0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0]]);
}

#[test]
fn test_same_direction_needs_no_commit() {
    let (mut chain, spi, _, _) = step_chain();
    chain
        .move_axes(&[AxisMove::idle(), AxisMove::new(3, 1000, 0)])
        .unwrap();
    assert!(spi.transfers().is_empty());
}

#[test]
fn test_zero_speed_is_rejected_up_front() {
    let (mut chain, spi, pins, _) = step_chain();
    assert_eq!(
        chain.move_axes(&[AxisMove::idle(), AxisMove::new(-3, 0, 0)]),
        Err(Error::InvalidSpeed { device: 1 })
    );
    assert!(pins.events().is_empty());
    assert!(spi.transfers().is_empty());
    assert!(chain.registers(1).unwrap().is_default());
}

#[test]
fn test_wrong_direction_pin() {
    let pins = PinLog::new();
    let mut axes = Vec::new();
    let _ = axes.push(StepAxis::new(pins.input(STEP0, false)));
    let motion = DirectStep::new(axes, MockDelay::new());
    let mut chain = match Tmc2130Chain::new(MockSpi::new(), motion, 1) {
        Ok(chain) => chain,
        Err(e) => panic!("{:?}", e),
    };
    assert_eq!(
        chain.move_axes(&[AxisMove::new(1, 100, 0)]),
        Err(Error::WrongDirection)
    );
}

#[test]
fn test_pin_failure_passes_through() {
    let pins = PinLog::new();
    let mut axes = Vec::new();
    let _ = axes.push(StepAxis::new(pins.output(STEP0).failing()));
    let motion = DirectStep::new(axes, MockDelay::new());
    let mut chain = match Tmc2130Chain::new(MockSpi::new(), motion, 1) {
        Ok(chain) => chain,
        Err(e) => panic!("{:?}", e),
    };
    assert_eq!(
        chain.move_axes(&[AxisMove::new(1, 100, 0)]),
        Err(Error::Transport(MockError))
    );
}
