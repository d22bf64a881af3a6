//! Error definitions shared across library modules.
//! Protocol-level mishaps (timeouts, malformed frames, peripheral faults)
//! are *events*, not errors: the driver stays serviceable after any bad
//! frame. Only transport faults and a failed initialization surface here.
use thiserror_no_std::Error;

#[derive(Error, Debug)]
/// Failures surfaced by the session driver.
pub enum PlayerError<E: core::fmt::Debug> {
    /// The serial link failed while reading or writing.
    #[error("serial link error: {0:?}")]
    Link(E),

    /// Reset completed but the peripheral never announced a storage
    /// medium online within the grace period.
    #[error("no storage medium reported online")]
    NoDeviceOnline,
}
