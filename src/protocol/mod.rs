//! DFPlayer Mini protocol layer: frame codec, incremental stream assembly,
//! event classification, command tables, and the command/query session.
//!
//! ## DFPlayer Timing Constants
//!
//! These constants define the delays and timeouts required for reliable
//! communication with the module over its 9600-baud serial link.

pub mod assembler;
pub mod command;
pub mod event;
pub mod frame;
pub mod player;
pub mod traits;

/// Default bound on any ACK or query-response wait (ms).
///
/// A full 10-byte frame takes about 10 ms on the wire at 9600 baud; the
/// module itself answers queries well under 100 ms. 500 ms leaves a
/// comfortable margin while keeping a stuck peripheral from starving the
/// cooperative loop for long.
pub const DEFAULT_TIMEOUT_MS: u32 = 500;

/// Minimum spacing inserted after an unacknowledged command (ms).
///
/// Without ACKs there is no flow control at all; sending frames
/// back-to-back overruns the module's receive buffer. 10 ms matches the
/// wire time of one frame and is the smallest spacing the module
/// tolerates reliably.
pub const INTER_COMMAND_DELAY_MS: u32 = 10;

/// Grace period granted after a reset for the module to announce its
/// storage media online (ms). Card enumeration alone can take well over
/// a second on slow SD cards.
pub const RESET_GRACE_PERIOD_MS: u32 = 2000;

/// Settling delay after the online announcement before the module accepts
/// playback commands (ms).
pub const SETTLE_DELAY_MS: u32 = 200;

/// Delay after switching the active storage device (ms). The module
/// re-enumerates the selected medium and drops commands received during
/// that window.
pub const DEVICE_SWITCH_DELAY_MS: u32 = 200;

/// Pause between two polls of the serial link inside a bounded wait (ms).
///
/// Each iteration yields to the executor so other cooperative tasks run
/// and any platform watchdog is serviced; the wait never holds the thread
/// for longer than this interval at a time.
pub const POLL_INTERVAL_MS: u32 = 1;
