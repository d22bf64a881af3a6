//! Minimal abstraction for the asynchronous serial link to the module.
//! Allows the driver to plug into various implementations (embedded HAL
//! UART, software serial, a test double over channels, etc.).
use futures_util::Future;

/// Contract for a byte-oriented duplex stream, already opened at the
/// link's fixed baud rate by the caller. The driver neither opens nor
/// configures it, and a link must be owned by exactly one session.
pub trait SerialLink {
    type Error: core::fmt::Debug;

    /// Fetch the next byte already sitting in the receive buffer, or
    /// `None` when nothing has arrived. Must never wait for data: the
    /// low-level assembler relies on this to stay non-blocking.
    fn read<'a>(&'a mut self) -> impl Future<Output = Result<Option<u8>, Self::Error>> + 'a;

    /// Write the whole buffer to the link. Asynchronous to accommodate
    /// non-blocking drivers.
    fn write<'a>(&'a mut self, bytes: &'a [u8])
        -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
