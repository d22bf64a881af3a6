//! `korri-dfplayer` library: serial protocol driver for the DFPlayer Mini
//! audio module in a `no_std` environment. The crate exposes the frame
//! codec, the incremental stream assembler, event classification, the
//! half-duplex command/query session, and the small timing companions
//! used around the player (job scheduling, flap patterns, motion counting).
#![no_std]
//==================================================================================
/// Driver errors (serial link faults, initialization failures).
pub mod error;
/// Run/backoff job scheduling with injected enable/disable hooks.
pub mod jobs;
/// Sliding-window motion trigger counting.
pub mod motion;
/// Randomized speech-like flap pattern generation.
pub mod pattern;
/// DFPlayer Mini protocol implementation: frame codec, stream assembly,
/// event classification, and the command/query session.
pub mod protocol;
//==================================================================================
