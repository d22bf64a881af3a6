//! Conversation scenarios against a simulated module: reset/online
//! handshake, wire format, event delivery, and resynchronization after
//! line noise.
mod helpers;

use helpers::{inject_ack, inject_frame, recv_frame, MockSerialLink, MockTimer};
use korri_dfplayer::error::PlayerError;
use korri_dfplayer::protocol::command::codes;
use korri_dfplayer::protocol::event::Event;
use korri_dfplayer::protocol::frame::Frame;
use korri_dfplayer::protocol::player::DfPlayer;
use korri_dfplayer::protocol::traits::serial_link::SerialLink;
use rand::{Rng, SeedableRng};

#[tokio::test]
/// begin() with reset: the driver sends the reset command with the ACK
/// flag set, then accepts the module's online announcement.
async fn test_begin_with_reset_handshake() {
    let (driver_side, mut device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);

    let device = tokio::spawn(async move {
        let frame = recv_frame(&mut device_side).await.expect("reset frame");
        assert_eq!(frame[3], codes::RESET);
        assert_eq!(frame[4], 0x01);
        inject_ack(&mut device_side).await;
        inject_frame(&mut device_side, 0x3F, 0x02).await; // card online
    });

    player.begin(true, true).await.expect("begin should succeed");
    device.await.unwrap();
}

#[tokio::test]
/// begin() with reset against a silent module fails once the grace
/// period elapses.
async fn test_begin_without_online_fails() {
    let (driver_side, _device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);

    match player.begin(true, true).await {
        Err(PlayerError::NoDeviceOnline) => {}
        other => panic!("expected NoDeviceOnline, got {:?}", other),
    }
}

#[tokio::test]
/// The documented play(5) frame leaves the driver byte for byte.
async fn test_play_wire_format() {
    let (driver_side, mut device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);
    player.begin(false, false).await.unwrap();

    player.play(5).await.unwrap();

    let frame = recv_frame(&mut device_side).await.unwrap();
    assert_eq!(
        frame,
        [0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x05, 0xFE, 0xF3, 0xEF]
    );
}

#[tokio::test]
/// A track-finished frame surfaces as PlayFinished and reading it clears
/// availability.
async fn test_play_finished_event() {
    let (driver_side, mut device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);
    player.begin(false, false).await.unwrap();

    inject_frame(&mut device_side, 0x3D, 5).await;

    assert!(player.poll().await.unwrap());
    assert_eq!(player.take_event(), Some(Event::PlayFinished(5)));
    assert_eq!(player.take_event(), None);
    assert!(!player.poll().await.unwrap());
}

#[tokio::test]
/// Leading line noise is discarded; the frame that follows it is
/// recovered and classified normally.
async fn test_resynchronization_after_noise() {
    let (driver_side, mut device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);
    player.begin(false, false).await.unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let mut noise = [0u8; 32];
    for byte in noise.iter_mut() {
        // Spurious bytes, none of them a start marker.
        *byte = rng.gen();
        if *byte == 0x7E {
            *byte = 0x00;
        }
    }
    device_side.write(&noise).await.unwrap();
    inject_frame(&mut device_side, 0x3D, 7).await;

    assert!(player.poll().await.unwrap());
    assert_eq!(player.take_event(), Some(Event::PlayFinished(7)));
    assert_eq!(player.take_event(), None);
}

#[tokio::test]
/// A checksum-corrupted frame is reported as malformed, and the driver
/// keeps working on the next good frame.
async fn test_malformed_frame_then_recovery() {
    let (driver_side, mut device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);
    player.begin(false, false).await.unwrap();

    let mut corrupted = *Frame::encode(0x3D, false, 5).as_bytes();
    corrupted[5] ^= 0x01;
    device_side.write(&corrupted).await.unwrap();

    assert!(player.poll().await.unwrap());
    assert_eq!(player.take_event(), Some(Event::MalformedFrame));

    inject_frame(&mut device_side, 0x3D, 5).await;
    assert!(player.poll().await.unwrap());
    assert_eq!(player.take_event(), Some(Event::PlayFinished(5)));
}

#[tokio::test]
/// A device-reported fault arrives as an ordinary event carrying the
/// raw code.
async fn test_device_error_event() {
    let (driver_side, mut device_side) = MockSerialLink::create_pair();
    let mut player = DfPlayer::new(driver_side, MockTimer);
    player.begin(false, false).await.unwrap();

    inject_frame(&mut device_side, 0x40, 2).await; // sleeping

    assert!(player.poll().await.unwrap());
    assert_eq!(player.take_event(), Some(Event::DeviceError(2)));
}
