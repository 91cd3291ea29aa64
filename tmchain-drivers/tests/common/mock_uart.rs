//! Mock serial link to the motion controller

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tmchain_hal::{UartRx, UartTx};

use super::MockError;

#[derive(Debug, Default)]
struct UartState {
    /// Bytes waiting to be read
    rx: VecDeque<u8>,
    /// Replies delivered once the next write completes
    replies: VecDeque<u8>,
    /// Everything written
    tx: Vec<u8>,
    clears: usize,
    flushes: usize,
    fail_write: bool,
}

/// Mock UART (clones share state)
#[derive(Debug, Clone, Default)]
pub struct MockUart {
    state: Rc<RefCell<UartState>>,
}

impl MockUart {
    /// Create a link that never replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `byte` after the next write
    pub fn reply_with(&self, byte: u8) {
        self.state.borrow_mut().replies.push_back(byte);
    }

    /// Put a byte in the receive buffer now, before any write
    pub fn push_stale(&self, byte: u8) {
        self.state.borrow_mut().rx.push_back(byte);
    }

    /// Make the next write fail
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_write = true;
    }

    /// Everything written so far
    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().tx.clone()
    }

    /// Number of input clears
    pub fn clears(&self) -> usize {
        self.state.borrow().clears
    }

    /// Number of flushes
    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }
}

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        if state.fail_write {
            state.fail_write = false;
            return Err(MockError);
        }
        state.tx.extend_from_slice(data);
        if let Some(reply) = state.replies.pop_front() {
            state.rx.push_back(reply);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl UartRx for MockUart {
    type Error = MockError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, MockError> {
        let mut state = self.state.borrow_mut();
        let mut count = 0;
        while count < buf.len() {
            match state.rx.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn clear_input(&mut self) -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        state.rx.clear();
        state.clears += 1;
        Ok(())
    }
}
