//! Command/query session for the DFPlayer Mini: sequences outgoing
//! frames, enforces the single-outstanding-command rule, performs the
//! bounded waits for ACKs and query responses, and surfaces classified
//! events to the application.
//!
//! Execution is single-threaded and cooperative. Every wait in this
//! module is a bounded poll loop that yields through the timer each
//! iteration; nothing here ever blocks the thread for longer than
//! [`POLL_INTERVAL_MS`](crate::protocol::POLL_INTERVAL_MS) at a time.
use crate::error::PlayerError;
use crate::protocol::assembler::{FeedOutcome, StreamAssembler};
use crate::protocol::command::{codes, Command, Device, Equalizer};
use crate::protocol::event::{classify, Event, FrameClass};
use crate::protocol::frame::Frame;
use crate::protocol::traits::{korri_timer::KorriTimer, serial_link::SerialLink};
use crate::protocol::{
    DEFAULT_TIMEOUT_MS, DEVICE_SWITCH_DELAY_MS, INTER_COMMAND_DELAY_MS, POLL_INTERVAL_MS,
    RESET_GRACE_PERIOD_MS, SETTLE_DELAY_MS,
};

//==================================================================================Session

/// Stateful driver instance coordinating one serial link's protocol
/// lifecycle. The link is exclusively owned; all methods take `&mut self`,
/// so a reentrant or multi-threaded adaptation must serialize calls
/// externally.
pub struct DfPlayer<S: SerialLink, T: KorriTimer> {
    link: S,
    timer: T,
    assembler: StreamAssembler,
    ack_enabled: bool,
    /// True while a sent command still awaits its ACK frame. At most one
    /// unacknowledged command is ever in flight.
    awaiting_ack: bool,
    timeout_ms: u32,
    /// Most recently classified event; taken (and cleared) by the caller.
    pending: Option<Event>,
}

impl<S, T> DfPlayer<S, T>
where
    S: SerialLink,
    T: KorriTimer,
{
    /// Wrap an already-opened serial link. ACKs are enabled and the wait
    /// bound starts at [`DEFAULT_TIMEOUT_MS`]; call [`DfPlayer::begin`]
    /// before issuing playback commands.
    pub fn new(link: S, timer: T) -> Self {
        Self {
            link,
            timer,
            assembler: StreamAssembler::new(),
            ack_enabled: true,
            awaiting_ack: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            pending: None,
        }
    }

    /// Initialize the module.
    ///
    /// With `do_reset` the session issues a reset command, waits up to
    /// [`RESET_GRACE_PERIOD_MS`] for the module to announce a storage
    /// medium online, then lets it settle. Without a reset the module is
    /// assumed to be online already.
    ///
    /// With ACKs disabled liveness cannot be verified, so initialization
    /// is reported successful unconditionally.
    pub async fn begin(&mut self, ack: bool, do_reset: bool) -> Result<(), PlayerError<S::Error>> {
        self.ack_enabled = ack;
        self.awaiting_ack = false;
        self.pending = None;
        self.assembler.reset();

        if !do_reset {
            #[cfg(feature = "defmt")]
            defmt::info!("begin without reset, assuming module online");
            return Ok(());
        }

        self.reset().await?;
        self.wait_available(RESET_GRACE_PERIOD_MS).await?;
        self.timer.delay_ms(SETTLE_DELAY_MS).await;

        let online = matches!(self.take_event(), Some(event) if event.is_online());
        if online || !self.ack_enabled {
            #[cfg(feature = "defmt")]
            defmt::info!("module initialized, online={}", online);
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("module did not report online after reset");
            Err(PlayerError::NoDeviceOnline)
        }
    }

    /// Replace the bound applied to ACK and query-response waits (ms).
    pub fn set_timeout(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    /// Current wait bound (ms).
    pub fn timeout(&self) -> u32 {
        self.timeout_ms
    }

    /// Whether outgoing commands request acknowledgements.
    pub fn ack_enabled(&self) -> bool {
        self.ack_enabled
    }

    //==================================================================================Send / Poll

    /// Encode and transmit a command frame.
    ///
    /// When ACKs are enabled and a previous command is still
    /// unacknowledged, this first waits (bounded by the configured
    /// timeout) for that ACK to resolve; a timeout resolves it too, as a
    /// [`Event::Timeout`]. This is what enforces the invariant that no
    /// two unacknowledged commands exist simultaneously. Without ACKs a
    /// fixed [`INTER_COMMAND_DELAY_MS`] spacing is inserted instead.
    pub async fn send(&mut self, command: Command) -> Result<(), PlayerError<S::Error>> {
        if self.ack_enabled {
            let mut waited_ms = 0;
            while self.awaiting_ack {
                self.poll().await?;
                if !self.awaiting_ack {
                    break;
                }
                if waited_ms >= self.timeout_ms {
                    // The ACK is not coming; resolve the wait so the
                    // link is usable again.
                    self.register(Event::Timeout);
                    break;
                }
                self.timer.delay_ms(POLL_INTERVAL_MS).await;
                waited_ms += POLL_INTERVAL_MS;
            }
        }

        let frame = Frame::encode(command.code, self.ack_enabled, command.parameter);
        #[cfg(feature = "defmt")]
        defmt::trace!("TX cmd={:#X} param={}", command.code, command.parameter);
        self.link
            .write(frame.as_bytes())
            .await
            .map_err(PlayerError::Link)?;

        self.awaiting_ack = self.ack_enabled;
        if !self.awaiting_ack {
            self.timer.delay_ms(INTER_COMMAND_DELAY_MS).await;
        }
        Ok(())
    }

    /// Drain every byte currently available on the link through the
    /// assembler, validating and classifying each completed frame.
    ///
    /// ACK frames clear the awaiting-ACK state and never surface; any
    /// other classified frame becomes the current event, overwriting the
    /// previous one. An ACK interleaved with a subsequent asynchronous
    /// event inside one call is handled by simply looping over all
    /// buffered bytes. Returns true iff an event is currently available.
    pub async fn poll(&mut self) -> Result<bool, PlayerError<S::Error>> {
        while let Some(byte) = self.link.read().await.map_err(PlayerError::Link)? {
            match self.assembler.feed(byte) {
                FeedOutcome::Incomplete => {}
                FeedOutcome::FrameInvalid => self.register(Event::MalformedFrame),
                FeedOutcome::FrameReady(frame) => {
                    if !frame.validate() {
                        // Checksum failed on a structurally sound frame.
                        self.register(Event::MalformedFrame);
                        continue;
                    }
                    match classify(frame.command(), frame.parameter()) {
                        FrameClass::Ack => {
                            #[cfg(feature = "defmt")]
                            defmt::trace!("RX ack");
                            self.awaiting_ack = false;
                        }
                        FrameClass::Event(event) => self.register(event),
                        FrameClass::Ignored => {}
                    }
                }
            }
        }
        Ok(self.pending.is_some())
    }

    /// Poll until an event is available or `timeout_ms` elapses; a zero
    /// timeout means the configured default. On expiry a synthetic
    /// [`Event::Timeout`] becomes the current event and `false` is
    /// returned. Each idle iteration yields for [`POLL_INTERVAL_MS`], so
    /// other cooperative tasks keep running during the wait.
    pub async fn wait_available(&mut self, timeout_ms: u32) -> Result<bool, PlayerError<S::Error>> {
        let timeout_ms = if timeout_ms == 0 {
            self.timeout_ms
        } else {
            timeout_ms
        };

        let mut waited_ms = 0;
        while !self.poll().await? {
            if waited_ms >= timeout_ms {
                #[cfg(feature = "defmt")]
                defmt::warn!("no frame within {} ms", timeout_ms);
                self.register(Event::Timeout);
                return Ok(false);
            }
            self.timer.delay_ms(POLL_INTERVAL_MS).await;
            waited_ms += POLL_INTERVAL_MS;
        }
        Ok(true)
    }

    /// Take the current event, clearing availability.
    pub fn take_event(&mut self) -> Option<Event> {
        self.pending.take()
    }

    /// Record `event` as current. Any classified frame, malformed ones
    /// and synthetic timeouts included, also resolves a pending ACK wait:
    /// the module will not acknowledge a command it already answered.
    fn register(&mut self, event: Event) {
        #[cfg(feature = "defmt")]
        defmt::debug!("RX event: {}", event);
        self.pending = Some(event);
        self.awaiting_ack = false;
    }

    //==================================================================================Queries

    /// Send a query command and require a feedback event in response.
    /// Every other outcome (timeout, malformed frame, or a spurious
    /// notification arriving first) collapses to `None`.
    async fn query(&mut self, command: Command) -> Result<Option<u16>, PlayerError<S::Error>> {
        self.send(command).await?;
        self.wait_available(self.timeout_ms).await?;
        match self.take_event() {
            Some(Event::QueryFeedback(value)) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// Current play status (1: playing, 2: paused, 3: stopped).
    pub async fn read_state(&mut self) -> Result<Option<u16>, PlayerError<S::Error>> {
        self.query(Command::new(codes::QUERY_STATE)).await
    }

    /// Current volume (0-30).
    pub async fn read_volume(&mut self) -> Result<Option<u16>, PlayerError<S::Error>> {
        self.query(Command::new(codes::QUERY_VOLUME)).await
    }

    /// Current equalizer preset (0-5).
    pub async fn read_eq(&mut self) -> Result<Option<u16>, PlayerError<S::Error>> {
        self.query(Command::new(codes::QUERY_EQ)).await
    }

    /// Number of files on the given storage device.
    pub async fn read_file_counts(
        &mut self,
        device: Device,
    ) -> Result<Option<u16>, PlayerError<S::Error>> {
        let code = match device {
            Device::UDisk => codes::QUERY_USB_FILE_COUNT,
            Device::Sd => codes::QUERY_SD_FILE_COUNT,
            Device::Flash => codes::QUERY_FLASH_FILE_COUNT,
            _ => return Ok(None),
        };
        self.query(Command::new(code)).await
    }

    /// File number currently playing on the given storage device.
    pub async fn read_current_file_number(
        &mut self,
        device: Device,
    ) -> Result<Option<u16>, PlayerError<S::Error>> {
        let code = match device {
            Device::UDisk => codes::QUERY_USB_CURRENT_FILE,
            Device::Sd => codes::QUERY_SD_CURRENT_FILE,
            Device::Flash => codes::QUERY_FLASH_CURRENT_FILE,
            _ => return Ok(None),
        };
        self.query(Command::new(code)).await
    }

    /// Number of files inside the given folder.
    pub async fn read_file_counts_in_folder(
        &mut self,
        folder: u16,
    ) -> Result<Option<u16>, PlayerError<S::Error>> {
        self.query(Command::with_parameter(codes::QUERY_FOLDER_FILE_COUNT, folder))
            .await
    }

    /// Total number of folders on the SD card.
    pub async fn read_folder_counts(&mut self) -> Result<Option<u16>, PlayerError<S::Error>> {
        self.query(Command::new(codes::QUERY_FOLDER_COUNT)).await
    }

    //==================================================================================Playback control

    /// Play the next track.
    pub async fn next(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::NEXT)).await
    }

    /// Play the previous track.
    pub async fn previous(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::PREVIOUS)).await
    }

    /// Play a track by global index (1-65535).
    pub async fn play(&mut self, track: u16) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::PLAY, track)).await
    }

    /// Raise the volume by one step.
    pub async fn volume_up(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::VOLUME_UP)).await
    }

    /// Lower the volume by one step.
    pub async fn volume_down(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::VOLUME_DOWN)).await
    }

    /// Set the volume (0-30).
    pub async fn volume(&mut self, volume: u8) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::SET_VOLUME, u16::from(volume)))
            .await
    }

    /// Select an equalizer preset.
    pub async fn equalizer(&mut self, eq: Equalizer) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::SET_EQ, eq as u16))
            .await
    }

    /// Play a track by index on repeat.
    pub async fn loop_track(&mut self, track: u16) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::LOOP_TRACK, track))
            .await
    }

    /// Switch the active storage device. The module re-enumerates the
    /// medium, so a settle delay follows the command.
    pub async fn output_device(&mut self, device: Device) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::OUTPUT_DEVICE, device as u16))
            .await?;
        self.timer.delay_ms(DEVICE_SWITCH_DELAY_MS).await;
        Ok(())
    }

    /// Enter low-power sleep mode.
    pub async fn sleep(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::SLEEP)).await
    }

    /// Reset the module.
    pub async fn reset(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::RESET)).await
    }

    /// Start or resume playback.
    pub async fn start(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::START)).await
    }

    /// Pause playback.
    pub async fn pause(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::PAUSE)).await
    }

    /// Play a file in a numbered folder (folders 01-99, files 001-255).
    pub async fn play_folder(&mut self, folder: u8, file: u8) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_split_parameter(codes::PLAY_FOLDER, folder, file))
            .await
    }

    /// Configure the output stage: amplification on/off and gain (0-31).
    pub async fn output_setting(
        &mut self,
        enable: bool,
        gain: u8,
    ) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_split_parameter(
            codes::OUTPUT_SETTING,
            enable as u8,
            gain,
        ))
        .await
    }

    /// Loop over all tracks.
    pub async fn enable_loop_all(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::LOOP_ALL, 0x01)).await
    }

    /// Stop looping over all tracks.
    pub async fn disable_loop_all(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::LOOP_ALL, 0x00)).await
    }

    /// Play a file from the root "MP3" folder by index.
    pub async fn play_mp3_folder(&mut self, file: u16) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::PLAY_MP3_FOLDER, file))
            .await
    }

    /// Interrupt the current track with an advertisement from the
    /// "ADVERT" folder.
    pub async fn advertise(&mut self, file: u16) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::ADVERTISE, file)).await
    }

    /// Play a file in a large folder: folder (1-15) in the high nibble,
    /// file index (1-4095) in the low twelve bits.
    pub async fn play_large_folder(
        &mut self,
        folder: u8,
        file: u16,
    ) -> Result<(), PlayerError<S::Error>> {
        let combined = (u16::from(folder) << 12) | (file & 0x0FFF);
        self.send(Command::with_parameter(codes::PLAY_LARGE_FOLDER, combined))
            .await
    }

    /// Stop the advertisement and resume the interrupted track.
    pub async fn stop_advertise(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::STOP_ADVERTISE)).await
    }

    /// Stop playback.
    pub async fn stop(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::STOP)).await
    }

    /// Loop all tracks in a folder (1-99).
    pub async fn loop_folder(&mut self, folder: u16) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::LOOP_FOLDER, folder))
            .await
    }

    /// Play all tracks in random order.
    pub async fn random_all(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::new(codes::RANDOM_ALL)).await
    }

    /// Repeat the current track.
    pub async fn enable_loop(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::LOOP_SINGLE, 0x00))
            .await
    }

    /// Play the current track once.
    pub async fn disable_loop(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::LOOP_SINGLE, 0x01))
            .await
    }

    /// Un-mute the DAC output.
    pub async fn enable_dac(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::DAC, 0x00)).await
    }

    /// Mute the DAC output.
    pub async fn disable_dac(&mut self) -> Result<(), PlayerError<S::Error>> {
        self.send(Command::with_parameter(codes::DAC, 0x01)).await
    }
}
