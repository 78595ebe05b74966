//! # beeline -- Async XBee ZB Driver
//!
//! `beeline` is an asynchronous Rust library for driving XBee ZB
//! (ZigBee) radio modules in API mode over a serial port. It
//! multiplexes concurrent AT command exchanges and the data
//! transmit/receive path over the module's single byte stream, and
//! surfaces unsolicited radio traffic as typed events.
//!
//! ## Quick Start
//!
//! Add `beeline` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! beeline = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect to a module and read its identity:
//!
//! ```no_run
//! use beeline::{SerialTransport, XBee};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = SerialTransport::open("/dev/ttyUSB0", 9600).await?;
//!     let (xbee, mut events) = XBee::open(Box::new(transport));
//!
//!     let serial = xbee.serial_number().await?;
//!     let firmware = xbee.firmware_version().await?;
//!     println!("module {serial:#018X}, firmware {firmware:#06X}");
//!
//!     // Unsolicited traffic (received packets, modem status changes,
//!     // transmit statuses) arrives on the event channel.
//!     while let Some(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                      |
//! |------------------------|----------------------------------------------|
//! | `beeline-core`         | [`Transport`] trait, [`Event`]s, value types, errors |
//! | `beeline-api`          | API frame codec and the [`XBee`] driver      |
//! | `beeline-transport`    | Serial transport implementation              |
//! | `beeline-test-harness` | Scripted mock transport for tests            |
//! | **`beeline`**          | This facade crate -- re-exports everything   |
//!
//! ## Concurrency model
//!
//! One background reader task owns the transport. Requests register a
//! waiter keyed by the outbound frame id before their frame is
//! written, so responses are routed to the right caller no matter how
//! many requests are in flight; everything without a waiter flows to
//! the event channel. Writes funnel through the reader task and are
//! therefore serialised. [`XBee::transmit`] is fire-and-forget: it
//! returns the frame id, and the matching
//! [`Event::TransmitStatus`] arrives on the event channel when the
//! radio reports the outcome.
//!
//! ## Scope
//!
//! The driver speaks unescaped API framing (`AP` = 1) only. AT
//! (transparent) mode and escaped framing (`AP` = 2) are out of scope,
//! as is any ZigBee network stack modelling above the module's own.

pub use beeline_core::*;

/// The API-mode protocol engine: frame codec, AT command table, and
/// the [`XBee`] driver.
pub mod api {
    pub use beeline_api::*;
}

pub use beeline_api::{at, XBee};

/// Serial transport to the module.
#[cfg(feature = "serial")]
pub mod transport {
    pub use beeline_transport::*;
}

#[cfg(feature = "serial")]
pub use beeline_transport::{SerialConfig, SerialTransport};
