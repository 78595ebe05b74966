//! The background reader task.
//!
//! One task per driver owns the transport outright. It serves two
//! duties through a biased `select!`: executing outbound frame writes
//! sent over its command channel (which serialises writes by
//! construction), and draining inbound bytes into frames.
//!
//! Each decoded frame is classified and routed: frames carrying a
//! registered frame id go to that request's waiter, everything else to
//! the driver's bounded event channel. Both deliveries are
//! non-blocking; the reader reports and drops rather than stalling
//! behind a slow consumer, because the module cannot be told to pause.

use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use beeline_core::error::{Error, Result};
use beeline_core::events::Event;
use beeline_core::transport::Transport;

use crate::frame::{self, DecodeResult, DiscardReason};
use crate::frames;
use crate::registry::WaiterTable;

/// How long one idle `receive` waits before giving the command channel
/// another look. Short enough to keep write latency low.
const IDLE_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Depth of the write-command channel.
const COMMAND_CHANNEL_DEPTH: usize = 16;

/// A request sent from driver methods to the reader task.
pub(crate) enum IoRequest {
    /// Write one encoded frame to the transport.
    WriteFrame {
        bytes: Vec<u8>,
        done: oneshot::Sender<Result<()>>,
    },
    /// Close the transport and exit the reader loop.
    Shutdown { done: oneshot::Sender<()> },
}

/// Handle to the spawned reader task.
pub(crate) struct ReaderHandle {
    pub cmd_tx: mpsc::Sender<IoRequest>,
    pub task: JoinHandle<()>,
}

/// Spawn the reader task for a driver instance.
pub(crate) fn spawn_reader(
    transport: Box<dyn Transport>,
    waiters: Arc<WaiterTable>,
    event_tx: mpsc::Sender<Event>,
) -> ReaderHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_DEPTH);
    let task = tokio::spawn(reader_loop(transport, waiters, event_tx, cmd_rx));
    ReaderHandle { cmd_tx, task }
}

async fn reader_loop(
    mut transport: Box<dyn Transport>,
    waiters: Arc<WaiterTable>,
    event_tx: mpsc::Sender<Event>,
    mut cmd_rx: mpsc::Receiver<IoRequest>,
) {
    let mut acc = BytesMut::with_capacity(4096);
    let mut buf = [0u8; 1024];

    loop {
        tokio::select! {
            biased;

            // Priority: outbound writes and shutdown.
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(IoRequest::WriteFrame { bytes, done }) => {
                        let _ = done.send(transport.send(&bytes).await);
                    }
                    Some(IoRequest::Shutdown { done }) => {
                        let _ = transport.close().await;
                        debug!("shutdown requested, exiting reader loop");
                        let _ = done.send(());
                        break;
                    }
                    None => {
                        // All driver handles dropped.
                        debug!("command channel closed, exiting reader loop");
                        break;
                    }
                }
            }

            // Idle: pull inbound bytes and drain complete frames.
            received = transport.receive(&mut buf, IDLE_READ_TIMEOUT) => {
                match received {
                    Ok(0) => {
                        warn!("byte stream reached end of file, reader task terminating");
                        break;
                    }
                    Ok(n) => {
                        acc.extend_from_slice(&buf[..n]);
                        drain_frames(&mut acc, &waiters, &event_tx);
                    }
                    Err(Error::Timeout) => {}
                    Err(e) => {
                        warn!(error = %e, "reader task terminated with error");
                        break;
                    }
                }
            }
        }
    }

    // Outstanding requests fail fast instead of waiting on a reader
    // that no longer exists.
    waiters.close_all();
}

/// Decode and dispatch every complete frame in the accumulator.
fn drain_frames(acc: &mut BytesMut, waiters: &WaiterTable, event_tx: &mpsc::Sender<Event>) {
    loop {
        match frame::decode_frame(acc) {
            DecodeResult::Frame(raw) => dispatch(raw, waiters, event_tx),
            DecodeResult::Incomplete => break,
            DecodeResult::Discard(DiscardReason::Resync(byte)) => {
                debug!("received {byte:#04x} while looking for frame delimiter");
            }
            DecodeResult::Discard(DiscardReason::BadChecksum(sum)) => {
                warn!("bad frame checksum {sum:#04x}, dropping frame");
            }
            DecodeResult::Discard(DiscardReason::TinyFrame) => {
                warn!("tiny frame received, dropping");
            }
        }
    }
}

/// Route one classified frame to its waiter or the event channel.
fn dispatch(raw: frame::RawFrame, waiters: &WaiterTable, event_tx: &mpsc::Sender<Event>) {
    let (frame_id, event) = frames::classify(raw);

    if let Some(id) = frame_id.filter(|&id| id != 0) {
        if let Some(waiter_tx) = waiters.lookup(id) {
            match waiter_tx.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    // Waiters drain between deliveries; a full slot is a
                    // routing bug, not backpressure.
                    warn!(frame_id = id, "internal event channel full, dropping frame");
                }
                Err(TrySendError::Closed(event)) => {
                    // The request was abandoned between lookup and
                    // delivery; treat its response as unsolicited.
                    deliver_event(event, event_tx);
                }
            }
            return;
        }
    }

    deliver_event(event, event_tx);
}

fn deliver_event(event: Event, event_tx: &mpsc::Sender<Event>) {
    match event_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            warn!("event channel full, dropping event");
        }
        Err(TrySendError::Closed(_)) => {
            // Consumer is gone (driver closed); nothing to report to.
            debug!("event channel closed, dropping event");
        }
    }
}
