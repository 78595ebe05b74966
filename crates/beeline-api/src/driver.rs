//! The `XBee` driver: request dispatch and the typed operation façade.
//!
//! A driver instance wraps an already-open [`Transport`], spawns the
//! reader task, and multiplexes any number of concurrent callers over
//! the single byte stream. Three request idioms cover the API:
//!
//! - **Single response** ([`XBee::at_command`] and the typed getters
//!   and setters built on it): send one frame, await the one response
//!   carrying the same frame id.
//! - **Gathering** ([`XBee::node_discover`], [`XBee::active_scan`]):
//!   one request yields a response per discovered device until a
//!   caller-supplied deadline.
//! - **Fire-and-forget** ([`XBee::transmit`]): the frame is written and
//!   the call returns; the delivery result arrives later as an
//!   [`Event::TransmitStatus`] correlated by frame id.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;

use beeline_core::error::{Error, Result};
use beeline_core::events::{AtResponse, Event};
use beeline_core::transport::Transport;
use beeline_core::types::{
    ActiveScanDevice, AtCommand, CommandStatus, Node, NodeDiscoveryOptions, SecurityOptions,
    TransmitOptions,
};

use crate::at;
use crate::commands;
use crate::frame::{self, kind, MAX_AT_PARAMETER, MAX_TRANSMIT_DATA};
use crate::reader::{self, IoRequest};
use crate::registry::{Waiter, WaiterTable};

/// Default capacity of the event channel handed out by [`XBee::open`].
///
/// The reader never blocks on it; events beyond this backlog are
/// dropped with a diagnostic, so consumers that care should drain
/// promptly (or open with a larger capacity).
pub const EVENT_CHANNEL_CAPACITY: usize = 8;

/// AES-128 key length required by the NK and KY registers.
const KEY_LEN: usize = 16;

/// Node identifiers are capped at 20 printable ASCII bytes.
const NODE_ID_MAX: usize = 20;

/// A connected XBee ZB module driven over API mode 1 framing.
///
/// Constructed with [`XBee::open`] around any [`Transport`]. All
/// methods take `&self`; the driver is `Send + Sync` and may be shared
/// across tasks, with requests interleaving freely on the wire.
pub struct XBee {
    cmd_tx: mpsc::Sender<IoRequest>,
    waiters: Arc<WaiterTable>,
    reader_task: Mutex<Option<JoinHandle<()>>>,
}

impl XBee {
    /// Open a driver around an already-connected transport.
    ///
    /// Spawns the reader task (so this must be called within a tokio
    /// runtime) and returns the driver plus the receiving end of the
    /// event channel carrying unsolicited traffic: modem status
    /// changes, received packets, transmit statuses, and frames no
    /// request was waiting for.
    pub fn open(transport: Box<dyn Transport>) -> (XBee, mpsc::Receiver<Event>) {
        Self::open_with_capacity(transport, EVENT_CHANNEL_CAPACITY)
    }

    /// Like [`XBee::open`], with a caller-chosen event channel capacity.
    pub fn open_with_capacity(
        transport: Box<dyn Transport>,
        event_capacity: usize,
    ) -> (XBee, mpsc::Receiver<Event>) {
        let (event_tx, event_rx) = mpsc::channel(event_capacity);
        let waiters = Arc::new(WaiterTable::new());
        let handle = reader::spawn_reader(transport, Arc::clone(&waiters), event_tx);
        let driver = XBee {
            cmd_tx: handle.cmd_tx,
            waiters,
            reader_task: Mutex::new(Some(handle.task)),
        };
        (driver, event_rx)
    }

    /// Shut the driver down: close the transport, stop the reader task,
    /// and fail any outstanding requests with
    /// [`Error::ConnectionLost`]. The event channel closes once the
    /// reader exits. Idempotent.
    pub async fn close(&self) {
        let task = self.reader_task.lock().await.take();
        if let Some(task) = task {
            let (done_tx, done_rx) = oneshot::channel();
            if self
                .cmd_tx
                .send(IoRequest::Shutdown { done: done_tx })
                .await
                .is_ok()
            {
                let _ = done_rx.await;
            }
            let _ = task.await;
        }
    }

    // -----------------------------------------------------------------
    // Request plumbing
    // -----------------------------------------------------------------

    /// Hand one encoded frame to the reader task for writing.
    async fn write_frame(&self, bytes: Vec<u8>) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.cmd_tx
            .send(IoRequest::WriteFrame {
                bytes,
                done: done_tx,
            })
            .await
            .map_err(|_| Error::ConnectionLost)?;
        done_rx.await.map_err(|_| Error::ConnectionLost)?
    }

    /// Register a waiter and send an AT command frame carrying its id.
    async fn send_at_frame(
        &self,
        frame_kind: u8,
        command: AtCommand,
        parameter: &[u8],
    ) -> Result<Waiter> {
        if parameter.len() > MAX_AT_PARAMETER {
            return Err(Error::TooLarge {
                what: "AT parameter",
                len: parameter.len(),
                max: MAX_AT_PARAMETER,
            });
        }
        // Register before writing so even an immediate response finds
        // its waiter.
        let waiter = self.waiters.register();
        let mut payload = Vec::with_capacity(3 + parameter.len());
        payload.push(waiter.frame_id());
        payload.extend_from_slice(&command.as_bytes());
        payload.extend_from_slice(parameter);
        self.write_frame(frame::encode_frame(frame_kind, &payload))
            .await?;
        Ok(waiter)
    }

    async fn at_request(
        &self,
        frame_kind: u8,
        command: AtCommand,
        parameter: &[u8],
    ) -> Result<Bytes> {
        let mut waiter = self.send_at_frame(frame_kind, command, parameter).await?;
        let event = waiter.recv().await.ok_or(Error::ConnectionLost)?;
        let response = expect_at_response(event)?;
        validate_response(command, response).map(|res| res.data)
    }

    /// Issue a raw AT command and return the response data.
    ///
    /// The typed methods below cover the common registers; this is the
    /// escape hatch for everything else. An empty `parameter` queries
    /// the register, a non-empty one sets it.
    pub async fn at_command(&self, command: AtCommand, parameter: &[u8]) -> Result<Bytes> {
        self.at_request(kind::AT_COMMAND, command, parameter).await
    }

    /// Issue a raw AT command whose register change is queued until
    /// changes are applied (`AC`) instead of taking effect immediately.
    pub async fn at_command_queued(&self, command: AtCommand, parameter: &[u8]) -> Result<Bytes> {
        self.at_request(kind::AT_COMMAND_QUEUE, command, parameter)
            .await
    }

    /// Issue a gathering AT command and collect one parsed record per
    /// response frame until the deadline.
    async fn gather<T>(
        &self,
        command: AtCommand,
        wait: Duration,
        parse: impl Fn(&[u8]) -> Result<T>,
    ) -> (Vec<T>, Option<Error>) {
        let mut records = Vec::new();
        let mut waiter = match self.send_at_frame(kind::AT_COMMAND, command, &[]).await {
            Ok(waiter) => waiter,
            Err(e) => return (records, Some(e)),
        };

        let deadline = tokio::time::sleep(wait);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => return (records, None),
                event = waiter.recv() => {
                    let Some(event) = event else {
                        return (records, Some(Error::ConnectionLost));
                    };
                    let response = match expect_at_response(event)
                        .and_then(|res| validate_response(command, res))
                    {
                        Ok(res) => res,
                        Err(e) => return (records, Some(e)),
                    };
                    match parse(&response.data) {
                        Ok(record) => records.push(record),
                        Err(e) => return (records, Some(e)),
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------

    /// Discover the modules on the PAN.
    ///
    /// Issues `ND` and gathers responses for `wait` (the network's
    /// discovery window is `NT`; see
    /// [`node_discovery_timeout`](XBee::node_discovery_timeout)).
    /// Returns every node heard from before the deadline; if a response
    /// failed validation or parsing, the error comes back alongside the
    /// nodes accumulated up to that point.
    pub async fn node_discover(&self, wait: Duration) -> (Vec<Node>, Option<Error>) {
        self.gather(at::ND, wait, |data| commands::parse_node_record(data))
            .await
    }

    /// Scan the neighborhood for beacon responses.
    ///
    /// Issues `AS` and gathers one record per beacon heard before the
    /// deadline, with the same partial-result contract as
    /// [`node_discover`](XBee::node_discover).
    pub async fn active_scan(&self, wait: Duration) -> (Vec<ActiveScanDevice>, Option<Error>) {
        self.gather(at::AS, wait, |data| commands::parse_scan_record(data))
            .await
    }

    // -----------------------------------------------------------------
    // Transmit
    // -----------------------------------------------------------------

    /// Transmit `data` to a remote module and return the frame id.
    ///
    /// `dest` is the 64-bit destination ([`ADDR_BROADCAST`] to
    /// broadcast, [`ADDR_COORDINATOR`] for the coordinator), `network`
    /// the 16-bit network address ([`NET_ADDR_UNKNOWN`] when not
    /// known). A `broadcast_radius` of 0 uses the network maximum.
    ///
    /// Fire-and-forget: the radio performs its own retries and reports
    /// the outcome asynchronously as an [`Event::TransmitStatus`] on
    /// the event channel, carrying the frame id returned here.
    ///
    /// [`ADDR_BROADCAST`]: beeline_core::types::ADDR_BROADCAST
    /// [`ADDR_COORDINATOR`]: beeline_core::types::ADDR_COORDINATOR
    /// [`NET_ADDR_UNKNOWN`]: beeline_core::types::NET_ADDR_UNKNOWN
    pub async fn transmit(
        &self,
        dest: u64,
        network: u16,
        broadcast_radius: u8,
        options: TransmitOptions,
        data: &[u8],
    ) -> Result<u8> {
        if data.len() > MAX_TRANSMIT_DATA {
            return Err(Error::TooLarge {
                what: "transmit data",
                len: data.len(),
                max: MAX_TRANSMIT_DATA,
            });
        }
        let frame_id = self.waiters.allocate_id();
        let mut payload = Vec::with_capacity(13 + data.len());
        payload.push(frame_id);
        payload.extend_from_slice(&dest.to_be_bytes());
        payload.extend_from_slice(&network.to_be_bytes());
        payload.push(broadcast_radius);
        payload.push(options.bits());
        payload.extend_from_slice(data);
        self.write_frame(frame::encode_frame(kind::TRANSMIT_REQUEST, &payload))
            .await?;
        Ok(frame_id)
    }

    // -----------------------------------------------------------------
    // Addressing
    // -----------------------------------------------------------------

    /// Read the 64-bit destination address (`DH` + `DL`).
    pub async fn destination_address(&self) -> Result<u64> {
        let dh = self.at_command(at::DH, &[]).await?;
        let dl = self.at_command(at::DL, &[]).await?;
        Ok((commands::decode_uint(&dh) << 32) | commands::decode_uint(&dl))
    }

    /// Set the 64-bit destination address (`DH` + `DL`).
    pub async fn set_destination_address(&self, addr: u64) -> Result<()> {
        self.at_command(at::DH, &((addr >> 32) as u32).to_be_bytes())
            .await?;
        self.at_command(at::DL, &(addr as u32).to_be_bytes())
            .await?;
        Ok(())
    }

    /// Read the module's 16-bit network address (`MY`);
    /// [`NET_ADDR_UNKNOWN`](beeline_core::types::NET_ADDR_UNKNOWN)
    /// means it has not joined a network.
    pub async fn network_address(&self) -> Result<u16> {
        let data = self.at_command(at::MY, &[]).await?;
        Ok(commands::decode_uint(&data) as u16)
    }

    /// Read the parent's 16-bit network address (`MP`).
    pub async fn parent_network_address(&self) -> Result<u16> {
        let data = self.at_command(at::MP, &[]).await?;
        Ok(commands::decode_uint(&data) as u16)
    }

    /// Read how many more end device children can join (`NC`).
    pub async fn children_remaining(&self) -> Result<u8> {
        let data = self.at_command(at::NC, &[]).await?;
        Ok(commands::decode_uint(&data) as u8)
    }

    /// Read the factory-set 64-bit serial number (`SH` + `SL`).
    pub async fn serial_number(&self) -> Result<u64> {
        let high = self.at_command(at::SH, &[]).await?;
        if high.len() != 4 {
            return Err(Error::UnexpectedLength {
                command: at::SH,
                len: high.len(),
            });
        }
        let low = self.at_command(at::SL, &[]).await?;
        if low.len() != 4 {
            return Err(Error::UnexpectedLength {
                command: at::SL,
                len: low.len(),
            });
        }
        Ok((commands::decode_uint(&high) << 32) | commands::decode_uint(&low))
    }

    /// Read the node identifier string (`NI`).
    pub async fn node_identifier(&self) -> Result<String> {
        let data = self.at_command(at::NI, &[]).await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Set the node identifier string (`NI`), truncated to the
    /// register's 20-byte limit.
    pub async fn set_node_identifier(&self, node_id: &str) -> Result<()> {
        let bytes = node_id.as_bytes();
        let bytes = &bytes[..bytes.len().min(NODE_ID_MAX)];
        self.at_command(at::NI, bytes).await?;
        Ok(())
    }

    /// Read the maximum RF payload for a unicast transmission (`NP`).
    pub async fn max_rf_payload_bytes(&self) -> Result<usize> {
        let data = self.at_command(at::NP, &[]).await?;
        Ok(commands::decode_uint(&data) as usize)
    }

    /// Read the device type identifier (`DD`).
    pub async fn device_type_identifier(&self) -> Result<u32> {
        let data = self.at_command(at::DD, &[]).await?;
        Ok(commands::decode_uint(&data) as u32)
    }

    /// Read the PAN id conflict report threshold (`CR`).
    pub async fn conflict_report(&self) -> Result<u8> {
        let data = self.at_command(at::CR, &[]).await?;
        Ok(commands::decode_uint(&data) as u8)
    }

    /// Set the PAN id conflict report threshold (`CR`).
    pub async fn set_conflict_report(&self, reports: u8) -> Result<()> {
        self.at_command(at::CR, &[reports]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Networking
    // -----------------------------------------------------------------

    /// Read the configured 64-bit extended PAN id (`ID`).
    pub async fn extended_pan_id(&self) -> Result<u64> {
        let data = self.at_command(at::ID, &[]).await?;
        Ok(commands::decode_uint(&data))
    }

    /// Set the 64-bit extended PAN id (`ID`). Persist with
    /// [`write_changes`](XBee::write_changes) to survive power cycles.
    pub async fn set_extended_pan_id(&self, id: u64) -> Result<()> {
        self.at_command(at::ID, &id.to_be_bytes()).await?;
        Ok(())
    }

    /// Read the extended PAN id the module is operating on (`OP`).
    pub async fn operating_extended_pan_id(&self) -> Result<u64> {
        let data = self.at_command(at::OP, &[]).await?;
        Ok(commands::decode_uint(&data))
    }

    /// Read the node discovery window (`NT`, stored in 100 ms units).
    pub async fn node_discovery_timeout(&self) -> Result<Duration> {
        let data = self.at_command(at::NT, &[]).await?;
        Ok(commands::decode_discovery_timeout(&data))
    }

    /// Set the node discovery window (`NT`); the duration must fit the
    /// register's single byte of 100 ms units.
    pub async fn set_node_discovery_timeout(&self, timeout: Duration) -> Result<()> {
        let units = commands::encode_discovery_timeout(timeout)?;
        self.at_command(at::NT, &[units]).await?;
        Ok(())
    }

    /// Read the network discovery options (`NO`).
    pub async fn node_discovery_options(&self) -> Result<NodeDiscoveryOptions> {
        let data = self.at_command(at::NO, &[]).await?;
        Ok(NodeDiscoveryOptions(commands::decode_uint(&data) as u8))
    }

    /// Set the network discovery options (`NO`).
    pub async fn set_node_discovery_options(&self, options: NodeDiscoveryOptions) -> Result<()> {
        self.at_command(at::NO, &[options.bits()]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Security
    // -----------------------------------------------------------------

    /// Read whether network encryption is enabled (`EE`).
    pub async fn encryption_enabled(&self) -> Result<bool> {
        let data = self.at_command(at::EE, &[]).await?;
        Ok(!data.is_empty() && data[0] != 0)
    }

    /// Enable or disable network encryption (`EE`).
    pub async fn set_encryption_enabled(&self, enabled: bool) -> Result<()> {
        self.at_command(at::EE, &[u8::from(enabled)]).await?;
        Ok(())
    }

    /// Read the encryption options (`EO`).
    pub async fn encryption_options(&self) -> Result<SecurityOptions> {
        let data = self.at_command(at::EO, &[]).await?;
        Ok(SecurityOptions(commands::decode_uint(&data) as u8))
    }

    /// Set the encryption options (`EO`).
    pub async fn set_encryption_options(&self, options: SecurityOptions) -> Result<()> {
        self.at_command(at::EO, &[options.bits()]).await?;
        Ok(())
    }

    /// Set the 128-bit network encryption key (`NK`, write-only).
    ///
    /// An empty key sends 16 zero bytes, which makes the module pick a
    /// random key. Any other length than 16 bytes is rejected.
    pub async fn set_network_encryption_key(&self, key: &[u8]) -> Result<()> {
        let zeroes = [0u8; KEY_LEN];
        let key = match key.len() {
            0 => &zeroes[..],
            KEY_LEN => key,
            len => return Err(Error::KeyLength(len * 8)),
        };
        self.at_command(at::NK, key).await?;
        Ok(())
    }

    /// Set the 128-bit link key (`KY`, write-only). The key must be
    /// exactly 16 bytes.
    pub async fn set_link_key(&self, key: &[u8]) -> Result<()> {
        if key.len() != KEY_LEN {
            return Err(Error::KeyLength(key.len() * 8));
        }
        self.at_command(at::KY, key).await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Serial interfacing
    // -----------------------------------------------------------------

    /// Report whether the module is configured for escaped API
    /// operation (`AP` = 2).
    ///
    /// This driver only speaks unescaped framing (`AP` = 1); the value
    /// is read for diagnostics, e.g. to explain a module that frames
    /// its responses differently than expected.
    pub async fn api_enabled(&self) -> Result<bool> {
        let data = self.at_command(at::AP, &[]).await?;
        if data.is_empty() {
            return Err(Error::UnexpectedLength {
                command: at::AP,
                len: 0,
            });
        }
        Ok(commands::decode_uint(&data) == 2)
    }

    /// Read the serial interface data rate (`BD`) as a baud rate.
    pub async fn interface_data_rate(&self) -> Result<u32> {
        let data = self.at_command(at::BD, &[]).await?;
        Ok(commands::decode_data_rate(&data))
    }

    /// Set the serial interface data rate (`BD`).
    ///
    /// Standard rates are sent as their table index, anything else as a
    /// literal 32-bit rate. The UART keeps its old rate until changes
    /// are applied.
    pub async fn set_interface_data_rate(&self, baud: u32) -> Result<()> {
        self.at_command(at::BD, &commands::encode_data_rate(baud))
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------

    /// Read the two-byte firmware version (`VR`).
    pub async fn firmware_version(&self) -> Result<u16> {
        let data = self.at_command(at::VR, &[]).await?;
        if data.len() != 2 {
            return Err(Error::UnexpectedLength {
                command: at::VR,
                len: data.len(),
            });
        }
        Ok(u16::from_be_bytes([data[0], data[1]]))
    }

    /// Read the two-byte hardware version (`HV`).
    pub async fn hardware_version(&self) -> Result<u16> {
        let data = self.at_command(at::HV, &[]).await?;
        if data.len() != 2 {
            return Err(Error::UnexpectedLength {
                command: at::HV,
                len: data.len(),
            });
        }
        Ok(u16::from_be_bytes([data[0], data[1]]))
    }

    /// Read the association indication (`AI`); 0 means the module has
    /// formed or joined a network.
    pub async fn association_indication(&self) -> Result<u8> {
        let data = self.at_command(at::AI, &[]).await?;
        Ok(commands::decode_uint(&data) as u8)
    }

    // -----------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------

    /// Apply queued register changes (`AC`).
    pub async fn apply_changes(&self) -> Result<()> {
        self.at_command(at::AC, &[]).await?;
        Ok(())
    }

    /// Write the current configuration to non-volatile memory (`WR`).
    pub async fn write_changes(&self) -> Result<()> {
        self.at_command(at::WR, &[]).await?;
        Ok(())
    }

    /// Restore factory default parameters (`RE`).
    pub async fn restore_defaults(&self) -> Result<()> {
        self.at_command(at::RE, &[]).await?;
        Ok(())
    }

    /// Software-reset the module (`FR`). The module acknowledges
    /// immediately and resets about two seconds later.
    pub async fn software_reset(&self) -> Result<()> {
        self.at_command(at::FR, &[]).await?;
        Ok(())
    }
}

/// Unwrap the AT response out of a delivered event.
fn expect_at_response(event: Event) -> Result<AtResponse> {
    match event {
        Event::AtResponse(response) => Ok(response),
        other => {
            warn!(event = ?other, "wrong frame while waiting for AT response");
            Err(Error::UnexpectedFrame)
        }
    }
}

/// Check a response against the command that was sent and map its
/// status to the corresponding error.
fn validate_response(command: AtCommand, response: AtResponse) -> Result<AtResponse> {
    if response.command != command {
        return Err(Error::CommandMismatch {
            expected: command,
            actual: response.command,
        });
    }
    match response.status {
        CommandStatus::Ok => Ok(response),
        CommandStatus::Error => Err(Error::CommandFailed),
        CommandStatus::InvalidCommand => Err(Error::InvalidCommand(command)),
        CommandStatus::InvalidParameter => Err(Error::InvalidParameter),
        CommandStatus::TxFailure => Err(Error::TxFailure),
        CommandStatus::Other(status) => Err(Error::CommandStatus(status)),
    }
}
