//! Mock transport for deterministic testing of the protocol engine.
//!
//! [`MockTransport`] implements the [`Transport`] trait against a
//! script of expected writes and canned responses. Because the driver
//! moves its transport into a background reader task at open, the mock
//! is steered from outside through a [`MockController`] handle that
//! shares its state: tests pre-load expectations, inject unsolicited
//! frames mid-run, and inspect everything that was sent.
//!
//! # Example
//!
//! ```
//! use beeline_test_harness::MockTransport;
//!
//! let (transport, ctl) = MockTransport::new();
//! // When the driver sends this request, return this response.
//! ctl.expect(
//!     &[0x7E, 0x00, 0x04, 0x08, 0x01, 0x53, 0x48, 0x5B],
//!     &[0x7E, 0x00, 0x09, 0x88, 0x01, 0x53, 0x48, 0x00, 0x00, 0x13, 0xA2, 0x00, 0x26],
//! );
//! // Unsolicited traffic can be pushed at any time.
//! ctl.inject(&[0x7E, 0x00, 0x02, 0x8A, 0x02, 0x73]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use beeline_core::error::{Error, Result};
use beeline_core::transport::Transport;

/// A pre-loaded expectation: the exact bytes of one write, and the
/// inbound chunks it triggers (possibly none).
#[derive(Debug, Clone)]
struct Expectation {
    request: Vec<u8>,
    responses: Vec<Vec<u8>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Ordered queue of expected writes.
    expectations: VecDeque<Expectation>,
    /// Inbound byte chunks waiting to be read.
    inbound: VecDeque<Vec<u8>>,
    /// Log of all bytes sent through this transport.
    sent: Vec<Vec<u8>>,
    connected: bool,
    /// When set, `receive` reports end-of-file once the inbound queue
    /// is drained.
    eof: bool,
}

/// A mock [`Transport`] for testing the driver without hardware.
///
/// Expectations are consumed in order: each `send()` is matched
/// against the next expectation and queues that expectation's response
/// chunks for `receive()`. Unmatched or unexpected sends fail.
#[derive(Debug)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    notify: Arc<Notify>,
}

/// Test-side handle to a [`MockTransport`]'s shared state.
///
/// Remains usable after the transport itself has been moved into the
/// driver's reader task.
#[derive(Debug, Clone)]
pub struct MockController {
    state: Arc<Mutex<MockState>>,
    notify: Arc<Notify>,
}

impl MockTransport {
    /// Create a connected mock transport and its controller.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (MockTransport, MockController) {
        let state = Arc::new(Mutex::new(MockState {
            connected: true,
            ..MockState::default()
        }));
        let notify = Arc::new(Notify::new());
        let transport = MockTransport {
            state: Arc::clone(&state),
            notify: Arc::clone(&notify),
        };
        let controller = MockController { state, notify };
        (transport, controller)
    }
}

impl MockController {
    /// Expect a write of exactly `request`, answered with one inbound
    /// chunk of `response`.
    pub fn expect(&self, request: &[u8], response: &[u8]) {
        self.expect_burst(request, &[response]);
    }

    /// Expect a write of exactly `request`, answered with several
    /// inbound chunks delivered across successive reads.
    pub fn expect_burst(&self, request: &[u8], responses: &[impl AsRef<[u8]>]) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(Expectation {
            request: request.to_vec(),
            responses: responses.iter().map(|r| r.as_ref().to_vec()).collect(),
        });
    }

    /// Expect a write of exactly `request` with no response at all.
    pub fn expect_write(&self, request: &[u8]) {
        self.expect_burst(request, &[] as &[&[u8]]);
    }

    /// Push unsolicited inbound bytes, as if the module had spoken on
    /// its own.
    pub fn inject(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.state.lock().unwrap().inbound.push_back(bytes.to_vec());
        self.notify.notify_one();
    }

    /// All bytes sent through the transport, one element per `send()`.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }

    /// The number of expectations not yet consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.state.lock().unwrap().expectations.len()
    }

    /// Drop the connection: in-flight and future reads and writes fail
    /// with [`Error::NotConnected`].
    pub fn disconnect(&self) {
        self.state.lock().unwrap().connected = false;
        self.notify.notify_one();
    }

    /// Mark the stream as ended: once the pending inbound chunks are
    /// drained, reads report end-of-file.
    pub fn end_of_stream(&self) {
        self.state.lock().unwrap().eof = true;
        self.notify.notify_one();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Err(Error::NotConnected);
        }
        state.sent.push(data.to_vec());

        let Some(expectation) = state.expectations.pop_front() else {
            return Err(Error::Transport(format!(
                "unexpected send, no expectations left: {data:02X?}"
            )));
        };
        if data != expectation.request.as_slice() {
            return Err(Error::Transport(format!(
                "unexpected send data: expected {:02X?}, got {:02X?}",
                expectation.request, data
            )));
        }
        // An empty chunk would read as end-of-file; only queue real data.
        state
            .inbound
            .extend(expectation.responses.into_iter().filter(|r| !r.is_empty()));
        drop(state);
        self.notify.notify_one();
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            {
                let mut state = self.state.lock().unwrap();
                if !state.connected {
                    return Err(Error::NotConnected);
                }
                if let Some(chunk) = state.inbound.pop_front() {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        // Put the remainder back for the next read.
                        state.inbound.push_front(chunk[n..].to_vec());
                    }
                    return Ok(n);
                }
                if state.eof {
                    return Ok(0);
                }
            }
            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(Error::Timeout);
            }
            // Woken early by inject/disconnect/end_of_stream, or by
            // the deadline.
            let _ = tokio::time::timeout_at(deadline, self.notify.notified()).await;
        }
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.connected = false;
        state.inbound.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_queues_the_matching_response() {
        let (mut transport, ctl) = MockTransport::new();
        let request = [0x7E, 0x00, 0x04, 0x08, 0x01, 0x53, 0x48, 0x5B];
        let response = [0x7E, 0x00, 0x02, 0x8A, 0x02, 0x73];
        ctl.expect(&request, &response);

        transport.send(&request).await.unwrap();

        let mut buf = [0u8; 64];
        let n = transport
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &response);
    }

    #[tokio::test]
    async fn burst_responses_arrive_across_reads() {
        let (mut transport, ctl) = MockTransport::new();
        ctl.expect_burst(&[0x01], &[&[0xAA, 0xBB][..], &[0xCC][..]]);

        transport.send(&[0x01]).await.unwrap();

        let mut buf = [0u8; 64];
        let n = transport
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[0xAA, 0xBB]);
        let n = transport
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[0xCC]);
    }

    #[tokio::test]
    async fn partial_reads_resume_where_they_left_off() {
        let (mut transport, ctl) = MockTransport::new();
        ctl.inject(&[0xAA, 0xBB, 0xCC, 0xDD]);

        let mut buf = [0u8; 2];
        let n = transport
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[0xAA, 0xBB]);
        let n = transport
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[0xCC, 0xDD]);
    }

    #[tokio::test]
    async fn wrong_send_data_errors() {
        let (mut transport, ctl) = MockTransport::new();
        ctl.expect(&[0x01], &[0xFF]);

        let err = transport.send(&[0x99]).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn unexpected_send_errors() {
        let (mut transport, _ctl) = MockTransport::new();
        let err = transport.send(&[0x01]).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn receive_with_nothing_pending_times_out() {
        let (mut transport, _ctl) = MockTransport::new();
        let mut buf = [0u8; 8];
        let err = transport
            .receive(&mut buf, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn inject_wakes_a_pending_receive() {
        let (mut transport, ctl) = MockTransport::new();

        let receive = async {
            let mut buf = [0u8; 8];
            let n = transport
                .receive(&mut buf, Duration::from_secs(5))
                .await
                .unwrap();
            buf[..n].to_vec()
        };
        let (got, ()) = tokio::join!(receive, async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            ctl.inject(&[0x42]);
        });
        assert_eq!(got, vec![0x42]);
    }

    #[tokio::test]
    async fn disconnect_fails_reads_and_writes() {
        let (mut transport, ctl) = MockTransport::new();
        assert!(transport.is_connected());
        ctl.disconnect();
        assert!(!transport.is_connected());

        let err = transport.send(&[0x01]).await.unwrap_err();
        assert!(matches!(err, Error::NotConnected));

        let mut buf = [0u8; 8];
        let err = transport
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotConnected));
    }

    #[tokio::test]
    async fn end_of_stream_reports_zero_after_draining() {
        let (mut transport, ctl) = MockTransport::new();
        ctl.inject(&[0x01]);
        ctl.end_of_stream();

        let mut buf = [0u8; 8];
        let n = transport
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(n, 1);
        let n = transport
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn sent_data_logs_every_write() {
        let (mut transport, ctl) = MockTransport::new();
        ctl.expect(&[0x01, 0x02], &[0xFF]);
        ctl.expect(&[0x03], &[0xFE]);

        transport.send(&[0x01, 0x02]).await.unwrap();
        transport.send(&[0x03]).await.unwrap();

        let sent = ctl.sent_data();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], vec![0x01, 0x02]);
        assert_eq!(sent[1], vec![0x03]);
        assert_eq!(ctl.remaining_expectations(), 0);
    }
}
