//! Incremental stream assembler: rebuilds 10-byte frames from the serial
//! byte stream, one byte per call, resynchronizing on noise.
use crate::protocol::frame::{
    offset, Frame, END_BYTE, FRAME_LENGTH, LENGTH_BYTE, START_BYTE, VERSION_BYTE,
};

//==================================================================================Enums and Structs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of feeding one byte into the assembler.
pub enum FeedOutcome {
    /// More bytes are needed before a frame can be produced. Also
    /// reported while discarding noise ahead of a start marker.
    Incomplete,
    /// Ten bytes were collected and the fixed markers line up. The
    /// checksum has not been verified yet; run [`Frame::validate`].
    FrameReady(Frame),
    /// The bytes collected so far cannot belong to a valid frame
    /// (version, length, or marker mismatch). The assembler has reset
    /// and is seeking the next start byte.
    FrameInvalid,
}

/// Byte-oriented frame assembler. Holds no timers and never waits: it
/// processes exactly the byte it is given and returns control to the
/// caller, which is what keeps the cooperative loop responsive.
#[derive(Debug, Clone, Copy)]
pub struct StreamAssembler {
    buffer: [u8; FRAME_LENGTH],
    /// Fill index; 0 means no frame is in progress.
    index: usize,
}

impl Default for StreamAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamAssembler {
    /// Assembler in the seeking state with an empty buffer.
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAME_LENGTH],
            index: 0,
        }
    }

    /// Drop any partial frame and seek the next start byte.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    //==================================================================================Feed

    /// Consume one byte from the transport.
    ///
    /// While seeking, every byte that is not the start marker is silently
    /// discarded: the protocol assumes noise or desync, not an error.
    /// Version and length are checked as soon as they arrive so garbage
    /// that happens to begin with `0x7E` is rejected after two or three
    /// bytes instead of ten. After the tenth byte the index resets
    /// regardless of outcome, so the next call always starts fresh.
    pub fn feed(&mut self, byte: u8) -> FeedOutcome {
        if self.index == 0 {
            if byte == START_BYTE {
                self.buffer[0] = byte;
                self.index = 1;
            }
            return FeedOutcome::Incomplete;
        }

        self.buffer[self.index] = byte;
        self.index += 1;

        match self.index {
            2 if self.buffer[offset::VERSION] != VERSION_BYTE => {
                self.index = 0;
                FeedOutcome::FrameInvalid
            }
            3 if self.buffer[offset::LENGTH] != LENGTH_BYTE => {
                self.index = 0;
                FeedOutcome::FrameInvalid
            }
            FRAME_LENGTH => {
                self.index = 0;
                if self.buffer[offset::START] != START_BYTE
                    || self.buffer[offset::END] != END_BYTE
                {
                    FeedOutcome::FrameInvalid
                } else {
                    FeedOutcome::FrameReady(Frame::from_bytes(self.buffer))
                }
            }
            _ => FeedOutcome::Incomplete,
        }
    }
}
