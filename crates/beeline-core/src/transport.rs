//! Transport trait for module communication.
//!
//! The [`Transport`] trait abstracts over the byte stream to an XBee
//! module. Implementations exist for serial ports (`beeline-transport`)
//! and for scripted mock streams (`beeline-test-harness`).
//!
//! The protocol engine in `beeline-api` operates on a `Transport`
//! rather than directly on a serial port, enabling both real hardware
//! control and deterministic unit testing.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to an XBee module.
///
/// Implementations handle the physical layer only. API-mode framing,
/// checksums, and frame-id correlation are handled by the protocol
/// engine that consumes this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the module.
    ///
    /// Implementations should not return until all bytes have been
    /// written to the underlying transport (serial TX buffer, socket).
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the module into the provided buffer.
    ///
    /// Returns the number of bytes actually read; `Ok(0)` means the
    /// stream has reached end-of-file. Waits up to `timeout` for data
    /// to arrive and returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if none does.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent `send()` and `receive()`
    /// calls should return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
