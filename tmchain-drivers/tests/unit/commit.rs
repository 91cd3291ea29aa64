//! Commit transactions over the chain

use tmchain_core::registers::{default_value, reg};
use tmchain_drivers::Error;

use crate::common::{serial_chain, MockError};

#[test]
fn test_single_write_on_two_device_chain() {
    let (mut chain, spi, _) = serial_chain(2);
    chain.set(0, reg::GCONF, 5).unwrap();

    assert_eq!(chain.commit().unwrap(), 1);
    assert_eq!(
        spi.transfers(),
        vec![vec![0, 0, 0, 0, 0, 0x80, 0, 0, 0, 5]]
    );
}

#[test]
fn test_commit_is_idempotent() {
    let (mut chain, spi, _) = serial_chain(3);
    chain.set(2, reg::CHOPCONF, 0x0001_0005).unwrap();
    assert_eq!(chain.commit().unwrap(), 1);

    spi.clear_transfers();
    assert_eq!(chain.commit().unwrap(), 0);
    assert!(spi.transfers().is_empty());
}

#[test]
fn test_fresh_chain_commits_nothing() {
    let (mut chain, spi, _) = serial_chain(4);
    assert_eq!(chain.commit().unwrap(), 0);
    assert!(spi.transfers().is_empty());
}

#[test]
fn test_one_device_many_changes() {
    let (mut chain, spi, _) = serial_chain(3);
    chain.set(1, reg::GCONF, 4).unwrap();
    chain.set(1, reg::IHOLD_IRUN, 0x0006_1F0A).unwrap();
    chain.set(1, reg::CHOPCONF, 0x0001_0005).unwrap();

    assert_eq!(chain.commit().unwrap(), 3);
    let transfers = spi.transfers();
    let expected = [
        [0x80, 0x00, 0x00, 0x00, 0x04],
        [0x90, 0x00, 0x06, 0x1F, 0x0A],
        [0xEC, 0x00, 0x01, 0x00, 0x05],
    ];
    for (transfer, datagram) in transfers.iter().zip(expected.iter()) {
        assert_eq!(transfer.len(), 15);
        // Device 1 of 3 sits in the middle slot
        assert_eq!(&transfer[0..5], &[0; 5]);
        assert_eq!(&transfer[5..10], datagram);
        assert_eq!(&transfer[10..15], &[0; 5]);
    }
}

#[test]
fn test_uneven_changes_pad_with_noop() {
    let (mut chain, spi, _) = serial_chain(2);
    chain.set(0, reg::GCONF, 1).unwrap();
    chain.set(0, reg::TPOWERDOWN, 10).unwrap();
    chain.set(1, reg::GCONF, 2).unwrap();

    assert_eq!(chain.commit().unwrap(), 2);
    assert_eq!(
        spi.transfers(),
        vec![
            vec![0x80, 0, 0, 0, 2, 0x80, 0, 0, 0, 1],
            vec![0, 0, 0, 0, 0, 0x91, 0, 0, 0, 10],
        ]
    );
}

#[test]
fn test_microstep_table_reset_is_sent() {
    let (mut chain, spi, _) = serial_chain(1);
    chain.set(0, reg::MSLUT0, 0).unwrap();
    chain.commit().unwrap();
    chain.reset(0).unwrap();

    spi.clear_transfers();
    assert_eq!(chain.commit().unwrap(), 1);
    assert_eq!(spi.transfers(), vec![vec![0xE0, 0xAA, 0xAA, 0xB5, 0x54]]);
    assert_eq!(
        chain.last_committed(0).unwrap().get(reg::MSLUT0),
        default_value(reg::MSLUT0)
    );
}

#[test]
fn test_failed_transfer_keeps_changes_committed() {
    let (mut chain, spi, _) = serial_chain(2);
    chain.set(1, reg::COOLCONF, 0x0100_0000).unwrap();
    spi.fail_next();

    assert_eq!(chain.commit(), Err(Error::Transport(MockError)));
    assert_eq!(
        chain.last_committed(1).unwrap().get(reg::COOLCONF),
        Some(0x0100_0000)
    );
    assert_eq!(chain.commit().unwrap(), 0);
}

#[test]
fn test_failure_in_second_round_keeps_both_committed() {
    let (mut chain, spi, _) = serial_chain(2);
    chain.set(0, reg::GCONF, 0x0000_0004).unwrap();
    chain.set(0, reg::CHOPCONF, 0x0001_0005).unwrap();
    spi.fail_after(1);

    assert_eq!(chain.commit(), Err(Error::Transport(MockError)));

    // Only the GCONF round went out
    let transfers = spi.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0], vec![0, 0, 0, 0, 0, 0x80, 0, 0, 0, 4]);

    let committed = chain.last_committed(0).unwrap();
    assert_eq!(committed.get(reg::GCONF), Some(0x0000_0004));
    assert_eq!(committed.get(reg::CHOPCONF), Some(0x0001_0005));
    assert_eq!(chain.commit().unwrap(), 0);
}
