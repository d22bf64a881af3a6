//! Frame codec tests: layout, checksum arithmetic, and validation.
use super::*;

#[test]
/// Encoding fills all ten bytes; decoding recovers command, ACK flag,
/// and parameter.
fn test_encode_round_trip() {
    let frame = Frame::encode(0x0F, true, 0x0102);
    assert_eq!(frame.command(), 0x0F);
    assert!(frame.ack_requested());
    assert_eq!(frame.parameter(), 0x0102);
    assert!(frame.validate());
}

#[test]
/// The documented play(5) frame, byte for byte.
fn test_play_frame_exact_bytes() {
    let frame = Frame::encode(0x03, false, 5);
    // 0x10000 - (0xFF + 0x06 + 0x03 + 0x00 + 0x00 + 0x05) = 0xFEF3
    let expected: [u8; FRAME_LENGTH] = [
        0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x05, 0xFE, 0xF3, 0xEF,
    ];
    assert_eq!(frame.as_bytes(), &expected);
}

#[test]
/// Checksum is modular: large sums wrap instead of saturating.
fn test_checksum_wraparound() {
    let frame = Frame::encode(0xFF, true, 0xFFFF);
    // sum = 0xFF + 0x06 + 0xFF + 0x01 + 0xFF + 0xFF = 0x403
    assert_eq!(frame.embedded_checksum(), 0u16.wrapping_sub(0x403));
    assert!(frame.validate());
}

#[test]
/// Flipping any single bit among bytes 1..=6 must break validation.
fn test_checksum_sensitivity() {
    let reference = Frame::encode(0x03, false, 5);
    for index in offset::VERSION..=offset::PARAMETER + 1 {
        for bit in 0..8 {
            let mut bytes = *reference.as_bytes();
            bytes[index] ^= 1 << bit;
            let corrupted = Frame::from_bytes(bytes);
            assert!(
                !corrupted.validate(),
                "bit {} of byte {} went undetected",
                bit,
                index
            );
        }
    }
}

#[test]
/// Marker bytes are part of validation even when the checksum holds.
fn test_marker_mismatch_rejected() {
    let reference = Frame::encode(0x03, false, 5);

    let mut bad_start = *reference.as_bytes();
    bad_start[offset::START] = 0x7F;
    assert!(!Frame::from_bytes(bad_start).validate());

    let mut bad_end = *reference.as_bytes();
    bad_end[offset::END] = 0xEE;
    assert!(!Frame::from_bytes(bad_end).validate());
}

#[test]
/// A corrupted embedded checksum is rejected.
fn test_embedded_checksum_mismatch() {
    let mut bytes = *Frame::encode(0x06, true, 15).as_bytes();
    bytes[offset::CHECKSUM] = bytes[offset::CHECKSUM].wrapping_add(1);
    assert!(!Frame::from_bytes(bytes).validate());
}

#[test]
/// Parameter bytes travel high byte first.
fn test_parameter_big_endian() {
    let frame = Frame::encode(0x03, false, 0xABCD);
    assert_eq!(frame.as_bytes()[offset::PARAMETER], 0xAB);
    assert_eq!(frame.as_bytes()[offset::PARAMETER + 1], 0xCD);
}
