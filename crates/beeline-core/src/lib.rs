//! beeline-core: Core types, events, and error definitions for beeline.
//!
//! This crate defines the transport-agnostic abstractions shared by the
//! beeline protocol engine, transports, and applications:
//!
//! - [`Transport`] -- byte-level communication channel to the module
//! - [`Event`] -- classified inbound frames (modem status, responses,
//!   received packets)
//! - [`AtCommand`] and the protocol's status/option value types
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod events;
pub mod transport;
pub mod types;

// Re-export key types at crate root for ergonomic `use beeline_core::*`.
pub use error::{Error, Result};
pub use events::{AtResponse, Event, ReceivePacket, TransmitStatus, UnknownFrame};
pub use transport::Transport;
pub use types::*;
