//! DFPlayer Mini frame codec: fixed 10-byte layout, big-endian fields,
//! and the two's-complement 16-bit checksum the module expects.

//==================================================================================Constants

/// Every frame, inbound or outbound, is exactly this long.
pub const FRAME_LENGTH: usize = 10;

/// Start-of-frame marker.
pub const START_BYTE: u8 = 0x7E;
/// Protocol version. Fixed, never negotiated.
pub const VERSION_BYTE: u8 = 0xFF;
/// Payload length field. Fixed at 6 (command through checksum input).
pub const LENGTH_BYTE: u8 = 0x06;
/// End-of-frame marker.
pub const END_BYTE: u8 = 0xEF;

/// Byte offsets within a frame. Multi-byte fields store the high byte
/// first.
pub mod offset {
    pub const START: usize = 0;
    pub const VERSION: usize = 1;
    pub const LENGTH: usize = 2;
    pub const COMMAND: usize = 3;
    pub const ACK: usize = 4;
    /// Parameter high byte; low byte at `PARAMETER + 1`.
    pub const PARAMETER: usize = 5;
    /// Checksum high byte; low byte at `CHECKSUM + 1`.
    pub const CHECKSUM: usize = 7;
    pub const END: usize = 9;
}

//==================================================================================Frame

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A raw 10-byte protocol frame. Built on demand for sending and
/// reassembled byte-by-byte on receipt; never retained beyond immediate
/// processing.
pub struct Frame {
    bytes: [u8; FRAME_LENGTH],
}

impl Frame {
    /// Build a fully populated outbound frame, checksum included.
    /// Construction never fails; parameter ranges are the caller's
    /// responsibility.
    pub fn encode(command: u8, ack_requested: bool, parameter: u16) -> Self {
        let mut bytes = [0u8; FRAME_LENGTH];
        bytes[offset::START] = START_BYTE;
        bytes[offset::VERSION] = VERSION_BYTE;
        bytes[offset::LENGTH] = LENGTH_BYTE;
        bytes[offset::COMMAND] = command;
        bytes[offset::ACK] = if ack_requested { 0x01 } else { 0x00 };
        bytes[offset::PARAMETER..offset::PARAMETER + 2].copy_from_slice(&parameter.to_be_bytes());
        let checksum = checksum(&bytes);
        bytes[offset::CHECKSUM..offset::CHECKSUM + 2].copy_from_slice(&checksum.to_be_bytes());
        bytes[offset::END] = END_BYTE;
        Self { bytes }
    }

    /// Wrap a candidate buffer without validating it. Call [`Frame::validate`]
    /// before trusting the content.
    pub const fn from_bytes(bytes: [u8; FRAME_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Command byte at offset 3.
    pub fn command(&self) -> u8 {
        self.bytes[offset::COMMAND]
    }

    /// Whether the frame requests an acknowledgement.
    pub fn ack_requested(&self) -> bool {
        self.bytes[offset::ACK] == 0x01
    }

    /// 16-bit parameter, high byte first.
    pub fn parameter(&self) -> u16 {
        u16::from_be_bytes([
            self.bytes[offset::PARAMETER],
            self.bytes[offset::PARAMETER + 1],
        ])
    }

    /// Checksum embedded in the frame, high byte first.
    pub fn embedded_checksum(&self) -> u16 {
        u16::from_be_bytes([
            self.bytes[offset::CHECKSUM],
            self.bytes[offset::CHECKSUM + 1],
        ])
    }

    /// Borrow the raw bytes for transmission.
    pub fn as_bytes(&self) -> &[u8; FRAME_LENGTH] {
        &self.bytes
    }

    /// Structural and checksum validation. True iff the start, version,
    /// length, and end bytes match the protocol constants and the embedded
    /// checksum equals the checksum recomputed over bytes 1..=6.
    pub fn validate(&self) -> bool {
        self.bytes[offset::START] == START_BYTE
            && self.bytes[offset::VERSION] == VERSION_BYTE
            && self.bytes[offset::LENGTH] == LENGTH_BYTE
            && self.bytes[offset::END] == END_BYTE
            && self.embedded_checksum() == checksum(&self.bytes)
    }
}

//==================================================================================Checksum

/// Two's-complement 16-bit checksum over bytes 1..=6 (version through
/// parameter low byte).
///
/// The module computes `0 - sum` with unsigned 16-bit wraparound; the
/// arithmetic here must stay modular, not saturating or sign-extended,
/// to remain bit-compatible on the wire.
pub fn checksum(bytes: &[u8; FRAME_LENGTH]) -> u16 {
    let mut sum: u16 = 0;
    for byte in &bytes[offset::VERSION..=offset::PARAMETER + 1] {
        sum = sum.wrapping_add(u16::from(*byte));
    }
    0u16.wrapping_sub(sum)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
