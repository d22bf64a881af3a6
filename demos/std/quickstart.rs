//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of korri-dfplayer:
//! - Encode a command frame
//! - Initialize a session against a simulated module
//! - Play a track and run a query round-trip
//!
//! This example uses `std` and a channel-backed serial link for a quick
//! trial run; on firmware the same driver runs over a UART.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use korri_dfplayer::protocol::command::{codes, Device};
use korri_dfplayer::protocol::frame::{Frame, FRAME_LENGTH};
use korri_dfplayer::protocol::player::DfPlayer;
use korri_dfplayer::protocol::traits::{korri_timer::KorriTimer, serial_link::SerialLink};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration};

#[derive(Clone)]
/// Channel-backed serial link standing in for a UART.
struct ChannelLink {
    tx: mpsc::UnboundedSender<u8>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<u8>>>,
}

impl ChannelLink {
    fn create_pair() -> (Self, Self) {
        let (driver_tx, device_rx) = mpsc::unbounded_channel();
        let (device_tx, driver_rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: driver_tx,
                rx: Arc::new(Mutex::new(driver_rx)),
            },
            Self {
                tx: device_tx,
                rx: Arc::new(Mutex::new(device_rx)),
            },
        )
    }
}

impl SerialLink for ChannelLink {
    type Error = ();

    async fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut rx = self.rx.lock().await;
        match rx.try_recv() {
            Ok(byte) => Ok(Some(byte)),
            Err(_) => Ok(None),
        }
    }

    async fn write<'a>(&'a mut self, bytes: &'a [u8]) -> Result<(), Self::Error> {
        for byte in bytes {
            self.tx.send(*byte).map_err(|_| ())?;
        }
        Ok(())
    }
}

/// Timer backed by `tokio::sleep`.
struct SleepTimer;

impl KorriTimer for SleepTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(u64::from(millis))).await;
    }
}

/// Simulated DFPlayer: ACKs every frame, announces the card online after
/// a reset, and answers the volume query.
async fn run_device(mut link: ChannelLink) {
    let mut buffer = [0u8; FRAME_LENGTH];
    let mut index = 0;
    loop {
        match link.read().await {
            Ok(Some(byte)) => {
                buffer[index] = byte;
                index += 1;
                if index < FRAME_LENGTH {
                    continue;
                }
                index = 0;

                let command = buffer[3];
                let ack = Frame::encode(0x41, false, 0);
                if link.write(ack.as_bytes()).await.is_err() {
                    return;
                }
                let reply = match command {
                    codes::RESET => Some(Frame::encode(0x3F, false, 0x02)),
                    codes::QUERY_VOLUME => Some(Frame::encode(codes::QUERY_VOLUME, false, 25)),
                    _ => None,
                };
                if let Some(frame) = reply {
                    if link.write(frame.as_bytes()).await.is_err() {
                        return;
                    }
                }
            }
            Ok(None) => sleep(Duration::from_millis(1)).await,
            Err(_) => return,
        }
    }
}

#[tokio::main]
async fn main() {
    println!("=== korri-dfplayer Quickstart ===\n");

    // ======================================================================
    // 1. Encode a command frame
    // ======================================================================
    println!("1. Encoding play(5)");

    let frame = Frame::encode(codes::PLAY, true, 5);
    print!("   Frame: ");
    for byte in frame.as_bytes() {
        print!("{:02X} ", byte);
    }
    println!("\n   Valid: {}\n", frame.validate());

    // ======================================================================
    // 2. Initialize a session against the simulated module
    // ======================================================================
    println!("2. Initializing the session (reset + online handshake)");

    let (driver_side, device_side) = ChannelLink::create_pair();
    tokio::spawn(run_device(device_side));

    let mut player = DfPlayer::new(driver_side, SleepTimer);
    match player.begin(true, true).await {
        Ok(()) => println!("   Module online\n"),
        Err(e) => {
            eprintln!("   Initialization failed: {:?}\n", e);
            return;
        }
    }

    // ======================================================================
    // 3. Playback and a query round-trip
    // ======================================================================
    println!("3. Playing track 5 on the SD card");
    player.output_device(Device::Sd).await.expect("device switch");
    player.play(5).await.expect("play");
    println!("   Sent\n");

    println!("4. Querying the volume");
    match player.read_volume().await.expect("query") {
        Some(volume) => println!("   Volume: {}", volume),
        None => println!("   No feedback (timeout or spurious event)"),
    }
}
