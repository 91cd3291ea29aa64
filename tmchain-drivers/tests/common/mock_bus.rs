//! Mock SPI bus recording every transfer

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tmchain_hal::SpiBus;

/// Error produced by every mock transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
struct BusState {
    /// Scripted responses, consumed one per transfer
    responses: VecDeque<Vec<u8>>,
    /// Bytes written by each transfer
    transfers: Vec<Vec<u8>>,
    /// Successful transfers left before one fails
    fail_after: Option<usize>,
}

/// Mock SPI bus (clones share state)
#[derive(Debug, Clone, Default)]
pub struct MockSpi {
    state: Rc<RefCell<BusState>>,
}

impl MockSpi {
    /// Create a bus answering all zeros
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next unscripted transfer
    ///
    /// Shorter responses are zero-padded to the transfer length.
    pub fn queue_response(&self, bytes: &[u8]) {
        self.state.borrow_mut().responses.push_back(bytes.to_vec());
    }

    /// Make the next transfer fail
    pub fn fail_next(&self) {
        self.fail_after(0);
    }

    /// Let `count` transfers succeed, then fail the one after
    pub fn fail_after(&self, count: usize) {
        self.state.borrow_mut().fail_after = Some(count);
    }

    /// Bytes written by every transfer so far
    pub fn transfers(&self) -> Vec<Vec<u8>> {
        self.state.borrow().transfers.clone()
    }

    /// Forget recorded transfers
    pub fn clear_transfers(&self) {
        self.state.borrow_mut().transfers.clear();
    }

    fn exchange(&self, write: &[u8]) -> Result<Vec<u8>, MockError> {
        let mut state = self.state.borrow_mut();
        match state.fail_after {
            Some(0) => {
                state.fail_after = None;
                return Err(MockError);
            }
            Some(left) => state.fail_after = Some(left - 1),
            None => {}
        }
        state.transfers.push(write.to_vec());
        let mut response = state.responses.pop_front().unwrap_or_default();
        response.resize(write.len(), 0);
        Ok(response)
    }
}

impl SpiBus for MockSpi {
    type Error = MockError;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), MockError> {
        let response = self.exchange(write)?;
        read.copy_from_slice(&response);
        Ok(())
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), MockError> {
        let response = self.exchange(data)?;
        data.copy_from_slice(&response);
        Ok(())
    }
}
