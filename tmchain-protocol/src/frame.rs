//! Frame encoding and decoding for the serial motion protocol.
//!
//! Frame format:
//! - START (1 byte): `'S'`
//! - one 8-byte record per device, in chain order
//! - END (1 byte): `'E'`

use heapless::Vec;

use crate::messages::AxisMove;

/// Frame start sentinel
pub const FRAME_START: u8 = b'S';

/// Frame end sentinel
pub const FRAME_END: u8 = b'E';

/// Bytes per device record (steps + max speed + acceleration)
pub const AXIS_RECORD_LEN: usize = 8;

/// Maximum number of devices a frame can describe
pub const MAX_AXES: usize = 16;

/// Maximum complete frame size (START + records + END)
pub const MAX_FRAME_SIZE: usize = 1 + AXIS_RECORD_LEN * MAX_AXES + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// More records than [`MAX_AXES`]
    TooManyAxes,
    /// Frame did not end with the END sentinel
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A motion frame: one move per chained device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionFrame {
    /// Per-device moves in chain order
    pub axes: Vec<AxisMove, MAX_AXES>,
}

impl MotionFrame {
    /// Create a frame from per-device moves
    pub fn new(axes: &[AxisMove]) -> Result<Self, FrameError> {
        let axes = Vec::from_slice(axes).map_err(|_| FrameError::TooManyAxes)?;
        Ok(Self { axes })
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        2 + AXIS_RECORD_LEN * self.axes.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = FRAME_START;
        for (i, axis) in self.axes.iter().enumerate() {
            let offset = 1 + i * AXIS_RECORD_LEN;
            buffer[offset..offset + AXIS_RECORD_LEN].copy_from_slice(&axis.to_bytes());
        }
        buffer[frame_len - 1] = FRAME_END;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// State machine for parsing incoming frames
///
/// This is the peripheral side of the link. Frames carry no length, so
/// the parser is created for the device count the firmware was built for.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    axis_count: usize,
    record: Vec<u8, AXIS_RECORD_LEN>,
    axes: Vec<AxisMove, MAX_AXES>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Reading device records
    ReadingAxes,
    /// Waiting for END byte
    WaitingForEnd,
}

impl FrameParser {
    /// Create a parser for frames describing `axis_count` devices
    pub fn new(axis_count: usize) -> Result<Self, FrameError> {
        if axis_count > MAX_AXES {
            return Err(FrameError::TooManyAxes);
        }
        Ok(Self {
            state: ParseState::WaitingForStart,
            axis_count,
            record: Vec::new(),
            axes: Vec::new(),
        })
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.record.clear();
        self.axes.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<MotionFrame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.state = if self.axis_count == 0 {
                        ParseState::WaitingForEnd
                    } else {
                        ParseState::ReadingAxes
                    };
                }
                // Silently ignore non-START bytes while waiting
                Ok(None)
            }
            ParseState::ReadingAxes => {
                // Cannot overflow: the record is drained once it is full
                let _ = self.record.push(byte);
                if self.record.len() == AXIS_RECORD_LEN {
                    let mut raw = [0u8; AXIS_RECORD_LEN];
                    raw.copy_from_slice(&self.record);
                    self.record.clear();
                    let _ = self.axes.push(AxisMove::from_bytes(&raw));
                    if self.axes.len() == self.axis_count {
                        self.state = ParseState::WaitingForEnd;
                    }
                }
                Ok(None)
            }
            ParseState::WaitingForEnd => {
                if byte != FRAME_END {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }

                let frame = MotionFrame {
                    axes: self.axes.clone(),
                };

                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<MotionFrame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
