//! XBee ZB API-mode protocol driver for beeline.
//!
//! This crate implements the API frame protocol (unescaped mode 1)
//! spoken between a host and an XBee ZB module over a serial byte
//! stream. It provides:
//!
//! - **Frame codec** ([`frame`]) -- encode and decode delimited,
//!   length-prefixed, checksummed API frames, with resync on corrupt
//!   input.
//! - **AT command table** ([`at`]) -- the two-byte register identifiers
//!   the typed façade understands.
//! - **Encoders/parsers** ([`commands`]) -- pure conversions between
//!   register bytes and semantic values (baud rates, durations,
//!   discovery records).
//! - **XBee driver** ([`XBee`]) -- the request/response multiplexer: a
//!   reader task that routes responses to concurrent callers by frame
//!   id and surfaces unsolicited traffic on an event channel, plus
//!   typed operations for the module's AT command set and the
//!   transmit path.
//!
//! # Example
//!
//! ```no_run
//! use beeline_api::XBee;
//! use beeline_core::Transport;
//!
//! # async fn example(transport: Box<dyn Transport>) -> beeline_core::Result<()> {
//! let (xbee, mut events) = XBee::open(transport);
//!
//! let serial = xbee.serial_number().await?;
//! println!("module serial: {serial:#018X}");
//!
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod at;
pub mod commands;
pub mod frame;

mod driver;
mod frames;
mod reader;
mod registry;

pub use driver::{XBee, EVENT_CHANNEL_CAPACITY};
