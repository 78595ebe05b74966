//! Error types for beeline.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Module-reported command failures,
//! protocol-imposed size limits, response shape mismatches, and
//! transport-layer errors are all captured here.

use crate::types::AtCommand;

/// The error type for all beeline operations.
///
/// Variants cover the full range of failure modes encountered when
/// driving an XBee module in API mode: statuses reported by the module
/// in AT command responses, caller-supplied data exceeding the frame
/// format's limits, well-formed responses of the wrong shape, and
/// failures of the underlying byte stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The module rejected the AT command parameter (command status 3).
    #[error("invalid parameter")]
    InvalidParameter,

    /// The module does not recognise the AT command (command status 2).
    #[error("invalid command {0}")]
    InvalidCommand(AtCommand),

    /// The module responded with a non-specific failure (command status 1).
    #[error("error response from module")]
    CommandFailed,

    /// The module reported the AT command as resulting in a transmit
    /// failure (command status 4).
    #[error("TX failure")]
    TxFailure,

    /// The module responded with a command status this library does not
    /// know about.
    #[error("unknown command status {0}")]
    CommandStatus(u8),

    /// Caller-supplied data exceeds a protocol-imposed maximum.
    #[error("{what} too long ({len}, maximum {max})")]
    TooLarge {
        /// What was oversized ("AT parameter", "transmit data").
        what: &'static str,
        /// The offending length.
        len: usize,
        /// The protocol maximum.
        max: usize,
    },

    /// An encryption key of the wrong size was supplied. Network and
    /// link keys are 128-bit AES keys and must be exactly 16 bytes.
    #[error("key must be 128 bits (16 bytes), not {0} bits")]
    KeyLength(usize),

    /// A successful AT response whose data does not match the expected
    /// length for that command.
    #[error("{command} response has unexpected length {len}")]
    UnexpectedLength {
        /// The AT command whose response was malformed.
        command: AtCommand,
        /// The actual data length received.
        len: usize,
    },

    /// A discovery record shorter than its fixed minimum layout.
    #[error("{what} record too short ({len} bytes, need at least {min})")]
    ShortRecord {
        /// Which record kind ("node discovery", "active scan").
        what: &'static str,
        len: usize,
        min: usize,
    },

    /// A node discovery record whose node identifier field is missing
    /// its NUL terminator.
    #[error("node identifier terminator not found")]
    MissingTerminator,

    /// An AT response frame carried a different command identifier than
    /// the request it was correlated with.
    #[error("expected response to {expected}, got {actual}")]
    CommandMismatch {
        /// The AT command that was sent.
        expected: AtCommand,
        /// The AT command in the response.
        actual: AtCommand,
    },

    /// A waiter received a frame kind it did not expect. This indicates
    /// an internal routing inconsistency, not a module fault.
    #[error("wrong frame while waiting for AT response")]
    UnexpectedFrame,

    /// The reader task terminated while a request was outstanding, or
    /// the driver has been closed.
    #[error("connection lost")]
    ConnectionLost,

    /// No connection to the module has been established, or the
    /// transport has been closed.
    #[error("not connected")]
    NotConnected,

    /// Timed out waiting for data from the transport.
    #[error("timeout waiting for data")]
    Timeout,

    /// A transport-level error (serial port open/configure failures).
    #[error("transport error: {0}")]
    Transport(String),

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
