//! Command tables for the DFPlayer Mini: control and query command codes,
//! the `Command` value object, and the device/equalizer constants.

/// Raw command codes understood by the module.
pub mod codes {
    pub const NEXT: u8 = 0x01;
    pub const PREVIOUS: u8 = 0x02;
    pub const PLAY: u8 = 0x03;
    pub const VOLUME_UP: u8 = 0x04;
    pub const VOLUME_DOWN: u8 = 0x05;
    pub const SET_VOLUME: u8 = 0x06;
    pub const SET_EQ: u8 = 0x07;
    pub const LOOP_TRACK: u8 = 0x08;
    pub const OUTPUT_DEVICE: u8 = 0x09;
    pub const SLEEP: u8 = 0x0A;
    pub const RESET: u8 = 0x0C;
    pub const START: u8 = 0x0D;
    pub const PAUSE: u8 = 0x0E;
    pub const PLAY_FOLDER: u8 = 0x0F;
    pub const OUTPUT_SETTING: u8 = 0x10;
    pub const LOOP_ALL: u8 = 0x11;
    pub const PLAY_MP3_FOLDER: u8 = 0x12;
    pub const ADVERTISE: u8 = 0x13;
    pub const PLAY_LARGE_FOLDER: u8 = 0x14;
    pub const STOP_ADVERTISE: u8 = 0x15;
    pub const STOP: u8 = 0x16;
    pub const LOOP_FOLDER: u8 = 0x17;
    pub const RANDOM_ALL: u8 = 0x18;
    pub const LOOP_SINGLE: u8 = 0x19;
    pub const DAC: u8 = 0x1A;

    pub const QUERY_STATE: u8 = 0x42;
    pub const QUERY_VOLUME: u8 = 0x43;
    pub const QUERY_EQ: u8 = 0x44;
    pub const QUERY_USB_FILE_COUNT: u8 = 0x47;
    pub const QUERY_SD_FILE_COUNT: u8 = 0x48;
    pub const QUERY_FLASH_FILE_COUNT: u8 = 0x49;
    pub const QUERY_USB_CURRENT_FILE: u8 = 0x4B;
    pub const QUERY_SD_CURRENT_FILE: u8 = 0x4C;
    pub const QUERY_FLASH_CURRENT_FILE: u8 = 0x4D;
    pub const QUERY_FOLDER_FILE_COUNT: u8 = 0x4E;
    pub const QUERY_FOLDER_COUNT: u8 = 0x4F;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A command code plus its 16-bit parameter. Stateless value object,
/// created per call; construction never fails. Range checks are the
/// caller's responsibility. The ACK-request flag is not part of the
/// command: the session applies its own setting when encoding the frame.
pub struct Command {
    pub code: u8,
    pub parameter: u16,
}

impl Command {
    /// Command with no parameter.
    pub const fn new(code: u8) -> Self {
        Self { code, parameter: 0 }
    }

    /// Command with a 16-bit parameter.
    pub const fn with_parameter(code: u8, parameter: u16) -> Self {
        Self { code, parameter }
    }

    /// Command whose parameter packs two 8-bit values (e.g. folder and
    /// file number), high sub-parameter first.
    pub const fn with_split_parameter(code: u8, high: u8, low: u8) -> Self {
        Self {
            code,
            parameter: ((high as u16) << 8) | low as u16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Equalizer presets accepted by `SET_EQ`.
pub enum Equalizer {
    Normal = 0,
    Pop = 1,
    Rock = 2,
    Jazz = 3,
    Classic = 4,
    Bass = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Playback devices selectable through `OUTPUT_DEVICE` and addressed by
/// the per-device queries.
pub enum Device {
    UDisk = 1,
    Sd = 2,
    /// Not wired on the DFPlayer Mini; accepted for completeness.
    Aux = 3,
    /// Selecting this enters sleep mode.
    Sleep = 4,
    Flash = 5,
}
