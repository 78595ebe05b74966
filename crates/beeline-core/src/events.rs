//! Asynchronous driver events.
//!
//! Every inbound API frame is classified into an [`Event`]. Frames that
//! answer an in-flight request are delivered to that request's waiter;
//! everything else (modem status, received packets, unroutable
//! responses, unrecognised frame kinds) arrives on the driver's bounded
//! event channel.
//!
//! Payload-carrying events hold their data as [`Bytes`]: the reader
//! splits the payload off its receive accumulator and hands ownership
//! to the event, so no copies are made and the event remains valid
//! after the reader moves on.

use bytes::Bytes;

use crate::types::{
    AtCommand, CommandStatus, DeliveryStatus, DiscoveryStatus, ModemStatus, ReceiveOptions,
};

/// An event produced by the reader task from one inbound API frame.
#[derive(Debug, Clone)]
pub enum Event {
    /// Unsolicited modem status change (frame kind `0x8A`).
    ModemStatus(ModemStatus),

    /// Response to an AT command request (frame kind `0x88`).
    AtResponse(AtResponse),

    /// Result of a ZigBee transmit request (frame kind `0x8B`).
    ///
    /// Transmit is fire-and-forget; this event is how delivery results
    /// surface. Correlate with the frame id returned by the transmit
    /// call.
    TransmitStatus(TransmitStatus),

    /// Data received over the air (frame kind `0x90`).
    ReceivePacket(ReceivePacket),

    /// A well-formed frame of a kind this driver does not interpret.
    UnknownFrame(UnknownFrame),
}

/// Payload of an AT command response frame.
#[derive(Debug, Clone)]
pub struct AtResponse {
    /// The AT command this frame responds to.
    pub command: AtCommand,
    /// Status reported by the module.
    pub status: CommandStatus,
    /// Register value or command output; empty for set operations.
    pub data: Bytes,
}

/// Payload of a ZigBee transmit status frame.
#[derive(Debug, Clone)]
pub struct TransmitStatus {
    /// Frame id of the transmit request this status answers.
    pub frame_id: u8,
    /// 16-bit network address the packet was delivered to.
    pub network_address: u16,
    /// Number of application transmission retries that took place.
    pub retry_count: u8,
    /// Whether the delivery succeeded, and if not, why.
    pub delivery_status: DeliveryStatus,
    /// Discovery overhead incurred by this transmission.
    pub discovery_status: DiscoveryStatus,
}

/// Payload of a ZigBee receive packet frame.
#[derive(Debug, Clone)]
pub struct ReceivePacket {
    /// 64-bit serial number of the sender.
    pub source_address: u64,
    /// 16-bit network address of the sender.
    pub source_network_address: u16,
    /// Receive option flags.
    pub options: ReceiveOptions,
    /// The received data.
    pub data: Bytes,
}

/// A frame whose kind byte this driver does not recognise.
#[derive(Debug, Clone)]
pub struct UnknownFrame {
    /// The frame kind byte.
    pub kind: u8,
    /// Everything after the kind byte.
    pub payload: Bytes,
}
