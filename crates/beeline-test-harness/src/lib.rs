//! beeline-test-harness: scripted transports for driver tests.
//!
//! Provides [`MockTransport`], a [`Transport`](beeline_core::Transport)
//! implementation driven by pre-loaded request/response scripts and an
//! out-of-band [`MockController`] for injecting unsolicited frames and
//! inspecting sent bytes. No hardware required.

pub mod mock_serial;

pub use mock_serial::{MockController, MockTransport};
