//! beeline-transport: physical transports for beeline.
//!
//! Implements the [`Transport`](beeline_core::Transport) trait for the
//! links an XBee module is actually wired to. Today that is the serial
//! port ([`SerialTransport`]); the driver itself is transport-agnostic.

pub mod serial;

pub use serial::{SerialConfig, SerialTransport};
