//! Event classification: maps a validated frame's command byte and 16-bit
//! parameter to a typed notification, or flags it as malformed.

//==================================================================================Constants

/// Command byte of an acknowledgement frame. ACKs are consumed by the
/// session and never surface as an [`Event`].
pub const ACK_COMMAND: u8 = 0x41;

/// Parameter bit announcing the USB storage device.
const USB_BIT: u16 = 0x01;
/// Parameter bit announcing the SD card.
const CARD_BIT: u16 = 0x02;

//==================================================================================Event

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Classified inbound notification. Exactly one event is "current" in a
/// session at a time; the next classified frame overwrites it.
pub enum Event {
    /// No valid frame arrived within the configured bound.
    Timeout,
    /// Structurally broken frame, checksum mismatch, or an unrecognized
    /// command byte. Both cases mean the frame cannot be trusted.
    MalformedFrame,
    /// SD card inserted; parameter is the raw device bitmask.
    CardInserted(u16),
    /// SD card removed.
    CardRemoved(u16),
    /// SD card enumerated after reset.
    CardOnline(u16),
    /// USB storage inserted.
    UsbInserted(u16),
    /// USB storage removed.
    UsbRemoved(u16),
    /// USB storage enumerated after reset.
    UsbOnline(u16),
    /// Both media enumerated after reset.
    CardAndUsbOnline(u16),
    /// A track finished playing; parameter is the track number.
    PlayFinished(u16),
    /// Peripheral-reported fault; parameter is its raw code (see
    /// [`FaultCode`]).
    DeviceError(u16),
    /// Response to a query command; parameter is the raw result value.
    QueryFeedback(u16),
}

impl Event {
    /// Raw 16-bit parameter carried by the event. Synthetic events
    /// (timeout, malformed frame) carry zero.
    pub fn parameter(&self) -> u16 {
        match self {
            Event::Timeout | Event::MalformedFrame => 0,
            Event::CardInserted(parameter)
            | Event::CardRemoved(parameter)
            | Event::CardOnline(parameter)
            | Event::UsbInserted(parameter)
            | Event::UsbRemoved(parameter)
            | Event::UsbOnline(parameter)
            | Event::CardAndUsbOnline(parameter)
            | Event::PlayFinished(parameter)
            | Event::DeviceError(parameter)
            | Event::QueryFeedback(parameter) => *parameter,
        }
    }

    /// True for any of the post-reset online announcements.
    pub fn is_online(&self) -> bool {
        matches!(
            self,
            Event::CardOnline(_) | Event::UsbOnline(_) | Event::CardAndUsbOnline(_)
        )
    }
}

//==================================================================================Classification

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of classifying a checksum-valid frame.
pub enum FrameClass {
    /// Acknowledgement of a previously sent command.
    Ack,
    /// Application-facing notification.
    Event(Event),
    /// Recognized command byte but no reportable condition (media
    /// announcement with neither device bit set). The module emits these
    /// in practice; they are dropped without becoming events.
    Ignored,
}

/// Dispatch a command byte and parameter to a [`FrameClass`].
///
/// When both device bits are set on an insert/remove announcement only
/// the USB event is reported; bit 0 takes precedence over bit 1. The
/// online announcement (`0x3F`) is the one command that reports the
/// combined state.
pub fn classify(command: u8, parameter: u16) -> FrameClass {
    match command {
        ACK_COMMAND => FrameClass::Ack,
        // Track-finished reports per storage device (USB, SD, flash).
        0x3C | 0x3D | 0x3E => FrameClass::Event(Event::PlayFinished(parameter)),
        0x3A => {
            if parameter & USB_BIT != 0 {
                FrameClass::Event(Event::UsbInserted(parameter))
            } else if parameter & CARD_BIT != 0 {
                FrameClass::Event(Event::CardInserted(parameter))
            } else {
                FrameClass::Ignored
            }
        }
        0x3B => {
            if parameter & USB_BIT != 0 {
                FrameClass::Event(Event::UsbRemoved(parameter))
            } else if parameter & CARD_BIT != 0 {
                FrameClass::Event(Event::CardRemoved(parameter))
            } else {
                FrameClass::Ignored
            }
        }
        0x3F => {
            if parameter & USB_BIT != 0 && parameter & CARD_BIT != 0 {
                FrameClass::Event(Event::CardAndUsbOnline(parameter))
            } else if parameter & USB_BIT != 0 {
                FrameClass::Event(Event::UsbOnline(parameter))
            } else if parameter & CARD_BIT != 0 {
                FrameClass::Event(Event::CardOnline(parameter))
            } else {
                FrameClass::Ignored
            }
        }
        0x40 => FrameClass::Event(Event::DeviceError(parameter)),
        // Query responses echo the query's command byte. 0x4A is a gap
        // in the module's table.
        0x42..=0x49 | 0x4B..=0x4F => FrameClass::Event(Event::QueryFeedback(parameter)),
        _ => FrameClass::Event(Event::MalformedFrame),
    }
}

//==================================================================================Fault codes

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Decoded peripheral fault carried by [`Event::DeviceError`]. The
/// classifier leaves the parameter opaque; decoding is opt-in.
pub enum FaultCode {
    /// Module busy, typically still enumerating storage.
    Busy = 1,
    /// Module is in sleep mode.
    Sleeping = 2,
    /// Module received a frame it could not parse.
    SerialWrongStack = 3,
    /// Module-side checksum validation failed.
    ChecksumMismatch = 4,
    /// Requested file index is out of bounds.
    FileIndexOut = 5,
    /// File exists but cannot be played.
    FileMismatch = 6,
    /// Advertisement playback is active and blocks the command.
    Advertise = 7,
}

impl FaultCode {
    /// Decode a raw error parameter, if it matches a known code.
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            1 => Some(FaultCode::Busy),
            2 => Some(FaultCode::Sleeping),
            3 => Some(FaultCode::SerialWrongStack),
            4 => Some(FaultCode::ChecksumMismatch),
            5 => Some(FaultCode::FileIndexOut),
            6 => Some(FaultCode::FileMismatch),
            7 => Some(FaultCode::Advertise),
            _ => None,
        }
    }
}
