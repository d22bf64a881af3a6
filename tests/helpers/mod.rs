//! Test doubles simulating the serial link and timer during integration
//! tests, plus helpers to act as the module on the far side of the wire.
use korri_dfplayer::protocol::frame::{Frame, FRAME_LENGTH};
use korri_dfplayer::protocol::traits::{korri_timer::KorriTimer, serial_link::SerialLink};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration, Instant};

#[derive(Clone)]
#[allow(dead_code)]
/// In-memory serial link reproducing the `SerialLink` trait behavior.
pub struct MockSerialLink {
    tx: mpsc::UnboundedSender<u8>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<u8>>>,
}

#[allow(dead_code)]
impl MockSerialLink {
    /// Construct a pair of interconnected endpoints (driver ↔ device).
    pub fn create_pair() -> (Self, Self) {
        let (driver_tx, device_rx) = mpsc::unbounded_channel();
        let (device_tx, driver_rx) = mpsc::unbounded_channel();

        let driver_side = Self {
            tx: driver_tx,
            rx: Arc::new(Mutex::new(driver_rx)),
        };

        let device_side = Self {
            tx: device_tx,
            rx: Arc::new(Mutex::new(device_rx)),
        };

        (driver_side, device_side)
    }
}

impl SerialLink for MockSerialLink {
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

/// Timer based on `tokio::sleep` to control delays during the test.
pub struct MockTimer;

impl KorriTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(u64::from(millis))).await;
    }
}

//==================================================================================Device-side helpers

/// Push a complete frame onto the wire as the module would.
#[allow(dead_code)]
pub async fn inject_frame(link: &mut MockSerialLink, command: u8, parameter: u16) {
    let frame = Frame::encode(command, false, parameter);
    link.write(frame.as_bytes()).await.unwrap();
}

/// Push an acknowledgement frame.
#[allow(dead_code)]
pub async fn inject_ack(link: &mut MockSerialLink) {
    inject_frame(link, 0x41, 0).await;
}

/// Collect the next full 10-byte frame sent by the driver, waiting up to
/// one second for it.
#[allow(dead_code)]
pub async fn recv_frame(link: &mut MockSerialLink) -> Option<[u8; FRAME_LENGTH]> {
    let mut buffer = [0u8; FRAME_LENGTH];
    let mut index = 0;
    let deadline = Instant::now() + Duration::from_secs(1);

    while index < FRAME_LENGTH {
        match link.read().await.unwrap() {
            Some(byte) => {
                buffer[index] = byte;
                index += 1;
            }
            None => {
                if Instant::now() >= deadline {
                    return None;
                }
                sleep(Duration::from_millis(1)).await;
            }
        }
    }
    Some(buffer)
}
